//! Pixel-exact collision detection.
//!
//! Two objects collide only when at least one opaque pixel of each occupies
//! the same display coordinate. Bounding boxes are only a broad phase.

use face_invaders_core::PixelRect;

use crate::{
    entities::{Body, Bullet, Ship, BULLET_RADIUS},
    sprite::{Sprite, SpriteAtlas},
};

/// Pixels an object occupies for collision purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Footprint<'a> {
    /// Opaque pixels of a placed sprite.
    Mask(&'a Sprite),
    /// Single pixel centred in a small square box.
    Point {
        /// Horizontal pixel coordinate.
        x: i32,
        /// Vertical pixel coordinate.
        y: i32,
        /// Half-width of the bounding box.
        radius: i32,
    },
}

impl Footprint<'_> {
    /// Bounding box of the footprint.
    #[must_use]
    pub fn bounds(&self, atlas: &SpriteAtlas) -> PixelRect {
        match *self {
            Footprint::Mask(sprite) => sprite.bounds(atlas.sheet(sprite.key())),
            Footprint::Point { x, y, radius } => {
                PixelRect::new(x - radius, x + radius, y - radius, y + radius)
            }
        }
    }

    /// Appends the occupied pixels that fall inside `region`.
    pub fn pixels(&self, atlas: &SpriteAtlas, region: PixelRect, out: &mut Vec<(i32, i32)>) {
        match *self {
            Footprint::Mask(sprite) => {
                sprite.opaque_pixels(atlas.sheet(sprite.key()), region, out);
            }
            Footprint::Point { x, y, .. } => {
                if region.contains(x, y) {
                    out.push((x, y));
                }
            }
        }
    }
}

/// Object that takes part in hit detection.
pub trait Collidable {
    /// Pixels currently occupied by the object.
    fn footprint(&self) -> Footprint<'_>;

    /// Records that the object was struck.
    fn mark_hit(&mut self);
}

impl Collidable for Ship {
    fn footprint(&self) -> Footprint<'_> {
        Footprint::Mask(self.sprite())
    }

    fn mark_hit(&mut self) {
        self.strike();
    }
}

impl Collidable for Body {
    fn footprint(&self) -> Footprint<'_> {
        Footprint::Mask(self.sprite())
    }

    fn mark_hit(&mut self) {
        self.strike();
    }
}

impl Collidable for Bullet {
    fn footprint(&self) -> Footprint<'_> {
        let (x, y) = self.pixel();
        Footprint::Point {
            x,
            y,
            radius: BULLET_RADIUS,
        }
    }

    fn mark_hit(&mut self) {
        self.strike();
    }
}

/// Reports whether the footprints of `a` and `b` share an occupied pixel.
#[must_use]
pub fn overlaps(atlas: &SpriteAtlas, a: Footprint<'_>, b: Footprint<'_>) -> bool {
    let Some(region) = a.bounds(atlas).overlap(&b.bounds(atlas)) else {
        return false;
    };

    let mut first = Vec::new();
    a.pixels(atlas, region, &mut first);
    if first.is_empty() {
        return false;
    }
    let mut second = Vec::new();
    b.pixels(atlas, region, &mut second);

    first.iter().any(|pixel| second.contains(pixel))
}

/// Tests two objects for a pixel-exact hit and marks both on success.
pub fn detect_hit<A, B>(atlas: &SpriteAtlas, a: &mut A, b: &mut B) -> bool
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    if !overlaps(atlas, a.footprint(), b.footprint()) {
        return false;
    }
    a.mark_hit();
    b.mark_hit();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_invaders_core::{Skin, SpriteKey};

    #[test]
    fn points_collide_only_on_the_exact_pixel() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let a = Footprint::Point {
            x: 5,
            y: 5,
            radius: 1,
        };
        let b = Footprint::Point {
            x: 5,
            y: 5,
            radius: 1,
        };
        let c = Footprint::Point {
            x: 5,
            y: 4,
            radius: 1,
        };
        assert!(overlaps(&atlas, a, b));
        assert!(!overlaps(&atlas, a, c));
    }

    #[test]
    fn point_bounds_are_half_open() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let point = Footprint::Point {
            x: 10,
            y: 20,
            radius: 1,
        };
        assert_eq!(point.bounds(&atlas), PixelRect::new(9, 11, 19, 21));
    }

    #[test]
    fn sprites_far_apart_never_collide() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let mut near = Sprite::new(SpriteKey::BodySmall);
        near.move_to(0, 0);
        let mut far = Sprite::new(SpriteKey::BodySmall);
        far.move_to(100, 100);
        assert!(!overlaps(&atlas, Footprint::Mask(&near), Footprint::Mask(&far)));
        assert!(overlaps(&atlas, Footprint::Mask(&near), Footprint::Mask(&near)));
    }
}
