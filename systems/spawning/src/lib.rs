#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system that produces body and particle blueprints.
//!
//! The director never touches world state. It turns wave requests, destroyed
//! bodies, and collision sites into [`BodySeed`] and [`ParticleSeed`] values
//! that the world instantiates. All randomness flows through a seeded ChaCha
//! generator so that replays with the same seed and inputs are identical.

use face_invaders_core::{
    BodySeed, BodySize, ParticleColor, ParticleSeed, ParticleShape, ScreenSize, SpriteKey,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WAVE_SPEED_RANGE: (i32, i32) = (10, 30);
const FRAGMENT_DEFLECTION_DEGREES: (i32, i32) = (15, 70);
const FRAGMENT_BASE_SPEEDUP: f32 = 1.1;
const FRAGMENT_LEVEL_SPEEDUP: f32 = 0.05;
const FRAGMENT_CHILDREN: usize = 2;

const BURST_DOTS: usize = 5;
const BURST_LINES: usize = 3;
const BURST_SPEED_RANGE: (i32, i32) = (10, 15);
/// Particle lifetimes in half seconds, so bursts last 1.0 or 1.5 s.
const BURST_LIFETIME_HALVES: (i32, i32) = (2, 4);
const DEBRIS_LENGTH: f32 = 6.0;

/// Configuration parameters required to construct the spawn director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeded with the provided value.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Entity whose destruction produces a particle burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstSource {
    /// Centre of the destroyed entity along the horizontal axis.
    pub x: f32,
    /// Centre of the destroyed entity along the vertical axis.
    pub y: f32,
    /// Rendered width of the entity in pixels.
    pub width: u32,
    /// Rendered height of the entity in pixels.
    pub height: u32,
    /// What kind of entity was destroyed.
    pub kind: BurstKind,
}

/// Distinguishes the particle styles emitted for ships and bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstKind {
    /// The player ship: highlight-colored dots plus line debris.
    Ship,
    /// An enemy body: dots colored from the body's own palette.
    Body {
        /// Sprite sheet of the destroyed body.
        sprite: SpriteKey,
        /// Number of entries in the sheet's palette.
        palette_len: u8,
    },
}

/// Seeded director that generates waves, fragments, and explosion bursts.
#[derive(Debug)]
pub struct Director {
    rng: ChaCha8Rng,
}

impl Director {
    /// Creates a new director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits `count` large bodies positioned just outside a random screen edge.
    ///
    /// `tile_width` and `tile_height` describe the rendered size of a large
    /// body; the spawn line sits half a sprite beyond the visible area so the
    /// body drifts in rather than popping into view.
    pub fn spawn_wave(
        &mut self,
        count: u32,
        screen: ScreenSize,
        tile_width: u32,
        tile_height: u32,
        out: &mut Vec<BodySeed>,
    ) {
        let border_x = (tile_width / 2) as i32;
        let border_y = (tile_height / 2) as i32;
        let x_min = -border_x;
        let x_max = screen.width() as i32 + border_x;
        let y_min = -border_y;
        let y_max = screen.height() as i32 + border_y;

        for _ in 0..count {
            let (x, y) = match self.rng.gen_range(0..4) {
                0 => (self.uniform(x_min, x_max), y_min),
                1 => (self.uniform(x_min, x_max), y_max),
                2 => (x_min, self.uniform(y_min, y_max)),
                _ => (x_max, self.uniform(y_min, y_max)),
            };
            let v = self.uniform(WAVE_SPEED_RANGE.0, WAVE_SPEED_RANGE.1) as f32;
            let angle = self.random_heading();
            let flip_x = self.rng.gen_bool(0.5);

            out.push(BodySeed {
                x: x as f32,
                y: y as f32,
                v,
                angle,
                size: BodySize::Large,
                flip_x,
            });
        }
    }

    /// Emits the children of a destroyed body.
    ///
    /// Large and medium bodies split into two bodies of the next tier that
    /// inherit the parent's position, travel faster as the level climbs, and
    /// deflect to opposite sides of the parent's heading. Small bodies leave
    /// nothing behind.
    pub fn fragment(&mut self, parent: &BodySeed, level: u32, out: &mut Vec<BodySeed>) {
        let Some(size) = parent.size.fragment() else {
            return;
        };

        let v = parent.v * (FRAGMENT_BASE_SPEEDUP + level as f32 * FRAGMENT_LEVEL_SPEEDUP);
        for child in 0..FRAGMENT_CHILDREN {
            let sign = if child == 0 { -1.0 } else { 1.0 };
            let deflection = self.uniform(
                FRAGMENT_DEFLECTION_DEGREES.0,
                FRAGMENT_DEFLECTION_DEGREES.1,
            ) as f32;
            let flip_x = self.rng.gen_bool(0.5);

            out.push(BodySeed {
                x: parent.x,
                y: parent.y,
                v,
                angle: parent.angle + (sign * deflection).to_radians(),
                size,
                flip_x,
            });
        }
    }

    /// Emits the decorative debris for a destroyed ship or body.
    pub fn burst_particles(&mut self, source: BurstSource, out: &mut Vec<ParticleSeed>) {
        let jitter_x = spread(source.width, 3);
        let jitter_y = spread(source.height, 3);

        for _ in 0..BURST_DOTS {
            let x = source.x + self.uniform(jitter_x.0, jitter_x.1) as f32;
            let y = source.y + self.uniform(jitter_y.0, jitter_y.1) as f32;
            let v = self.uniform(BURST_SPEED_RANGE.0, BURST_SPEED_RANGE.1) as f32;
            let max_age = self.lifetime();
            let angle = self.random_heading();
            let color = match source.kind {
                BurstKind::Ship => ParticleColor::Highlight,
                BurstKind::Body {
                    sprite,
                    palette_len,
                } => ParticleColor::Palette {
                    sprite,
                    index: self.uniform(0, i32::from(palette_len)) as u8,
                },
            };

            out.push(ParticleSeed {
                x,
                y,
                v,
                angle,
                max_age,
                shape: ParticleShape::Dot,
                color,
            });
        }

        if source.kind != BurstKind::Ship {
            return;
        }

        let debris_x = spread(source.width, 10);
        let debris_y = spread(source.height, 10);
        for _ in 0..BURST_LINES {
            let rotation = self.random_heading();
            let x = source.x + self.uniform(debris_x.0, debris_x.1) as f32;
            let y = source.y + self.uniform(debris_y.0, debris_y.1) as f32;
            let v = self.uniform(BURST_SPEED_RANGE.0, BURST_SPEED_RANGE.1) as f32;
            let angle = self.random_heading();
            let max_age = self.lifetime();

            out.push(ParticleSeed {
                x,
                y,
                v,
                angle,
                max_age,
                shape: ParticleShape::Line {
                    dx: DEBRIS_LENGTH * rotation.cos(),
                    dy: DEBRIS_LENGTH * rotation.sin(),
                },
                color: ParticleColor::Highlight,
            });
        }
    }

    fn uniform(&mut self, low: i32, high: i32) -> i32 {
        assert!(low < high, "degenerate random range {low}..{high}");
        self.rng.gen_range(low..high)
    }

    fn lifetime(&mut self) -> f32 {
        let (low, high) = BURST_LIFETIME_HALVES;
        self.uniform(low, high) as f32 / 2.0
    }

    fn random_heading(&mut self) -> f32 {
        (self.uniform(0, 360) as f32).to_radians()
    }
}

/// Offset range `[-extent / divisor, extent / divisor)` with the lower bound
/// rounded towards negative infinity.
fn spread(extent: u32, divisor: i32) -> (i32, i32) {
    let extent = i32::try_from(extent).unwrap_or(i32::MAX);
    ((-extent).div_euclid(divisor), extent / divisor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "degenerate random range")]
    fn degenerate_ranges_are_fatal() {
        let mut director = Director::new(Config::new(1));
        let _ = director.uniform(5, 5);
    }

    #[test]
    fn spreads_floor_the_lower_bound() {
        assert_eq!(spread(20, 3), (-7, 6));
        assert_eq!(spread(30, 3), (-10, 10));
        assert_eq!(spread(40, 10), (-4, 4));
        assert_eq!(spread(2, 3), (-1, 0));
    }

    #[test]
    fn headings_stay_within_a_full_turn() {
        let mut director = Director::new(Config::new(7));
        for _ in 0..500 {
            let heading = director.random_heading();
            assert!((0.0..std::f32::consts::TAU).contains(&heading));
        }
    }
}
