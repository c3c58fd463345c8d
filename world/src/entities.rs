//! Moving objects of the playfield.

use std::f32::consts::PI;

use face_invaders_core::{
    BodySeed, BodySize, ParticleColor, ParticleSeed, ParticleShape, ScreenSize, SpriteKey,
};

use crate::sprite::{Sprite, SpriteSheet};

/// Speed cap applied to each velocity axis while thrusting.
pub const SHIP_MAX_SPEED: f32 = 110.0;
/// Acceleration applied while thrusting, in pixels per second squared.
pub const SHIP_THRUST: f32 = 80.0;
/// Fraction of the velocity retained after one second of coasting.
pub const SHIP_DRAG: f32 = 0.5;
/// Rotation speed in radians per second.
pub const SHIP_TURN_RATE: f32 = 5.0 * PI / 3.0;

/// Muzzle speed of a bullet in pixels per second.
pub const BULLET_SPEED: f32 = SHIP_MAX_SPEED + 20.0;
/// Seconds a bullet survives before expiring.
pub const BULLET_LIFETIME: f32 = 0.6;
/// Radius of a bullet in pixels.
pub const BULLET_RADIUS: i32 = 1;

const THRUST_BLINK_PERIOD: f32 = 0.1;
const MUZZLE_OFFSET: f32 = 0.4;

/// Wraps a coordinate so that an object of `extent` pixels re-enters on the
/// opposite edge once it has fully left the screen.
///
/// The result always lies in `[-extent / 2, span + extent / 2)`.
#[must_use]
pub fn wrap(position: f32, span: u32, extent: f32) -> f32 {
    let period = span as f32 + extent;
    if period <= 0.0 {
        return position;
    }
    let mut shifted = (position + extent / 2.0).rem_euclid(period);
    if shifted >= period {
        shifted = 0.0;
    }
    shifted - extent / 2.0
}

/// Position, scalar speed, and heading shared by everything that drifts.
///
/// Headings are measured in radians from straight up, clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    x: f32,
    y: f32,
    v: f32,
    angle: f32,
}

impl Motion {
    /// Creates a motion state.
    #[must_use]
    pub const fn new(x: f32, y: f32, v: f32, angle: f32) -> Self {
        Self { x, y, v, angle }
    }

    /// Horizontal position.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical position.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Scalar speed in pixels per second.
    #[must_use]
    pub const fn v(&self) -> f32 {
        self.v
    }

    /// Heading of travel in radians.
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Velocity decomposed into screen axes.
    #[must_use]
    pub fn velocity(&self) -> (f32, f32) {
        (self.v * self.angle.sin(), -self.v * self.angle.cos())
    }

    fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.v = vx.hypot(vy);
        self.angle = vx.atan2(-vy);
    }

    fn advance(&mut self, dt: f32, screen: ScreenSize, extent: (f32, f32)) {
        let (vx, vy) = self.velocity();
        self.x = wrap(self.x + vx * dt, screen.width(), extent.0);
        self.y = wrap(self.y + vy * dt, screen.height(), extent.1);
    }
}

/// Player-controlled ship.
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    motion: Motion,
    heading: f32,
    thrusting: bool,
    turning: i8,
    hit: bool,
    visible: bool,
    sprite: Sprite,
    width: u32,
    height: u32,
    frames: u32,
}

impl Ship {
    /// Creates a hidden ship resting at the provided centre.
    #[must_use]
    pub fn new(sheet: &SpriteSheet, x: f32, y: f32, screen: ScreenSize) -> Self {
        let mut ship = Self {
            motion: Motion::new(x, y, 0.0, 0.0),
            heading: 0.0,
            thrusting: false,
            turning: 0,
            hit: false,
            visible: false,
            sprite: Sprite::new(SpriteKey::Ship),
            width: sheet.tile_width(),
            height: sheet.tile_height(),
            frames: sheet.tiles_per_row(),
        };
        ship.update(0.0, screen, 0.0);
        ship
    }

    /// Advances rotation, thrust, drag, and position by `dt` seconds.
    ///
    /// `clock` is the simulation time in seconds, used to blink the flame.
    pub fn update(&mut self, dt: f32, screen: ScreenSize, clock: f32) {
        self.heading = (self.heading + f32::from(self.turning) * SHIP_TURN_RATE * dt)
            .rem_euclid(2.0 * PI);

        let (mut vx, mut vy) = self.motion.velocity();
        if self.thrusting {
            // each axis is capped on its own
            let cap = SHIP_MAX_SPEED;
            vx = (vx + SHIP_THRUST * dt * self.heading.sin()).clamp(-cap, cap);
            vy = (vy - SHIP_THRUST * dt * self.heading.cos()).clamp(-cap, cap);
        } else {
            let drag = SHIP_DRAG.powf(dt);
            vx *= drag;
            vy *= drag;
        }
        self.motion.set_velocity(vx, vy);
        self.motion
            .advance(dt, screen, (self.width as f32, self.height as f32));

        let step = 360.0 / self.frames as f32;
        let mut tile = (self.heading.to_degrees() / step).round() as u32 % self.frames;
        if self.thrusting && clock.rem_euclid(THRUST_BLINK_PERIOD) < THRUST_BLINK_PERIOD / 2.0 {
            tile += self.frames;
        }
        self.sprite.set_tile(tile);
        self.place_sprite();
    }

    /// Returns the ship to a stationary, upright, un-hit state at the position.
    pub fn reset(&mut self, x: f32, y: f32, screen: ScreenSize) {
        self.motion = Motion::new(x, y, 0.0, 0.0);
        self.heading = 0.0;
        self.thrusting = false;
        self.turning = 0;
        self.hit = false;
        self.update(0.0, screen, 0.0);
    }

    /// Starts or stops thrusting.
    pub fn set_thrusting(&mut self, thrusting: bool) {
        self.thrusting = thrusting;
    }

    /// Sets the rotation direction; only the sign of `turning` matters.
    pub fn set_turning(&mut self, turning: i8) {
        self.turning = turning.signum();
    }

    /// Shows or hides the ship.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Current motion state.
    #[must_use]
    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Facing direction in radians, independent of travel direction.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Whether the engine is firing.
    #[must_use]
    pub const fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    /// Rotation direction: `-1`, `0`, or `1`.
    #[must_use]
    pub const fn turning(&self) -> i8 {
        self.turning
    }

    /// Whether the ship has been destroyed and awaits a respawn.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        self.hit
    }

    /// Whether the ship is drawn and controllable.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sprite placed at the ship's position.
    #[must_use]
    pub const fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Rendered width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Rendered height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Bullet leaving the nose of the ship.
    #[must_use]
    pub fn fire(&self) -> Bullet {
        let (sin, cos) = self.heading.sin_cos();
        let x = (self.motion.x + MUZZLE_OFFSET * self.width as f32 * sin).round() - 1.0;
        let y = (self.motion.y - MUZZLE_OFFSET * self.height as f32 * cos).round() - 1.0;
        Bullet::new(Motion::new(x, y, BULLET_SPEED, self.heading))
    }

    pub(crate) fn strike(&mut self) {
        self.hit = true;
    }

    fn place_sprite(&mut self) {
        self.sprite.move_to(
            (self.motion.x - self.width as f32 / 2.0) as i32,
            (self.motion.y - self.height as f32 / 2.0) as i32,
        );
    }
}

/// Drifting enemy body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    motion: Motion,
    size: BodySize,
    hit: bool,
    sprite: Sprite,
    width: u32,
    height: u32,
}

impl Body {
    /// Instantiates a body from a spawn blueprint.
    #[must_use]
    pub fn from_seed(seed: BodySeed, sheet: &SpriteSheet) -> Self {
        let mut sprite = Sprite::new(seed.size.sprite());
        sprite.set_flip(seed.flip_x, false);
        let mut body = Self {
            motion: Motion::new(seed.x, seed.y, seed.v, seed.angle),
            size: seed.size,
            hit: false,
            sprite,
            width: sheet.tile_width(),
            height: sheet.tile_height(),
        };
        body.place_sprite();
        body
    }

    /// Drifts the body by `dt` seconds.
    pub fn update(&mut self, dt: f32, screen: ScreenSize) {
        self.motion
            .advance(dt, screen, (self.width as f32, self.height as f32));
        self.place_sprite();
    }

    /// Blueprint describing the body's current state, used to fragment it.
    #[must_use]
    pub fn seed(&self) -> BodySeed {
        BodySeed {
            x: self.motion.x,
            y: self.motion.y,
            v: self.motion.v,
            angle: self.motion.angle,
            size: self.size,
            flip_x: self.sprite.flip_x(),
        }
    }

    /// Current motion state.
    #[must_use]
    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Size tier.
    #[must_use]
    pub const fn size(&self) -> BodySize {
        self.size
    }

    /// Whether the body was destroyed this tick.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        self.hit
    }

    /// Sprite placed at the body's position.
    #[must_use]
    pub const fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Rendered width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Rendered height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn strike(&mut self) {
        self.hit = true;
    }

    fn place_sprite(&mut self) {
        self.sprite.move_to(
            (self.motion.x - self.width as f32 / 2.0) as i32,
            (self.motion.y - self.height as f32 / 2.0) as i32,
        );
    }
}

/// Short-lived projectile fired by the ship.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    motion: Motion,
    age: f32,
    hit: bool,
}

impl Bullet {
    fn new(motion: Motion) -> Self {
        Self {
            motion,
            age: 0.0,
            hit: false,
        }
    }

    /// Moves the bullet and ages it by `dt` seconds.
    pub fn update(&mut self, dt: f32, screen: ScreenSize) {
        self.motion.advance(dt, screen, (0.0, 0.0));
        self.age += dt;
    }

    /// Current motion state.
    #[must_use]
    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Integer pixel that represents the bullet in collisions.
    #[must_use]
    pub fn pixel(&self) -> (i32, i32) {
        (self.motion.x as i32, self.motion.y as i32)
    }

    /// Whether the bullet outlived its range.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age > BULLET_LIFETIME
    }

    /// Whether the bullet struck a body.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        self.hit
    }

    pub(crate) fn strike(&mut self) {
        self.hit = true;
    }
}

/// Purely decorative explosion debris.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    motion: Motion,
    shape: ParticleShape,
    anchor: (f32, f32),
    color: ParticleColor,
    age: f32,
    max_age: f32,
}

impl Particle {
    /// Instantiates a particle from a spawn blueprint.
    ///
    /// Line particles are positioned by the top-left corner of the segment's
    /// bounding box so that they wrap like any other sized object.
    #[must_use]
    pub fn from_seed(seed: ParticleSeed) -> Self {
        let (x, y, anchor) = match seed.shape {
            ParticleShape::Dot => (seed.x, seed.y, (0.0, 0.0)),
            ParticleShape::Line { dx, dy } => {
                let x = seed.x.min(seed.x + dx);
                let y = seed.y.min(seed.y + dy);
                (x, y, (seed.x - x, seed.y - y))
            }
        };
        Self {
            motion: Motion::new(x, y, seed.v, seed.angle),
            shape: seed.shape,
            anchor,
            color: seed.color,
            age: 0.0,
            max_age: seed.max_age,
        }
    }

    /// Drifts and ages the particle by `dt` seconds.
    pub fn update(&mut self, dt: f32, screen: ScreenSize) {
        self.motion.advance(dt, screen, self.extent());
        self.age += dt;
    }

    /// Whether the particle outlived its lifetime.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age > self.max_age
    }

    /// Current motion state.
    #[must_use]
    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    /// Geometry of the particle.
    #[must_use]
    pub const fn shape(&self) -> ParticleShape {
        self.shape
    }

    /// Color source of the particle.
    #[must_use]
    pub const fn color(&self) -> ParticleColor {
        self.color
    }

    /// Endpoints of the particle in display coordinates; dots share both.
    #[must_use]
    pub fn endpoints(&self) -> ((f32, f32), (f32, f32)) {
        let start = (
            self.motion.x + self.anchor.0,
            self.motion.y + self.anchor.1,
        );
        match self.shape {
            ParticleShape::Dot => (start, start),
            ParticleShape::Line { dx, dy } => (start, (start.0 + dx, start.1 + dy)),
        }
    }

    /// Size of the particle's bounding box used for wrapping.
    #[must_use]
    pub fn extent(&self) -> (f32, f32) {
        match self.shape {
            ParticleShape::Dot => (0.0, 0.0),
            ParticleShape::Line { dx, dy } => (dx.abs(), dy.abs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::{SpriteAtlas, SHIP_FRAMES};
    use face_invaders_core::Skin;

    const SCREEN: ScreenSize = ScreenSize::new(160, 128);

    #[test]
    fn wrap_reenters_on_the_opposite_edge() {
        assert_eq!(wrap(-11.0, 160, 20.0), 169.0);
        assert_eq!(wrap(171.0, 160, 20.0), -9.0);
        assert_eq!(wrap(50.0, 160, 20.0), 50.0);
        assert_eq!(wrap(-0.5, 160, 0.0), 159.5);
    }

    #[test]
    fn wrap_never_reaches_the_upper_bound() {
        for step in 0..2000 {
            let position = -500.0 + step as f32 * 0.37;
            let wrapped = wrap(position, 160, 40.0);
            assert!((-20.0..180.0).contains(&wrapped), "{position} -> {wrapped}");
        }
    }

    #[test]
    fn thrust_is_capped_per_axis() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let mut ship = Ship::new(atlas.sheet(SpriteKey::Ship), 80.0, 64.0, SCREEN);
        ship.set_thrusting(true);
        for _ in 0..600 {
            ship.update(0.02, SCREEN, 0.0);
            assert!(ship.motion().v() <= SHIP_MAX_SPEED + 1e-3);
        }
        assert!(ship.motion().v() > 0.0);
    }

    #[test]
    fn coasting_halves_speed_every_second() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let mut ship = Ship::new(atlas.sheet(SpriteKey::Ship), 80.0, 64.0, SCREEN);
        ship.set_thrusting(true);
        ship.update(0.5, SCREEN, 0.0);
        ship.set_thrusting(false);
        let before = ship.motion().v();
        ship.update(1.0, SCREEN, 0.0);
        assert!((ship.motion().v() - before * 0.5).abs() < 1e-3);
    }

    #[test]
    fn flame_frames_blink_while_thrusting() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let mut ship = Ship::new(atlas.sheet(SpriteKey::Ship), 80.0, 64.0, SCREEN);
        ship.set_thrusting(true);
        ship.update(0.0, SCREEN, 0.02);
        assert_eq!(ship.sprite().tile_at(0, 0), SHIP_FRAMES);
        ship.update(0.0, SCREEN, 0.07);
        assert_eq!(ship.sprite().tile_at(0, 0), 0);
    }

    #[test]
    fn turning_selects_the_nearest_heading_frame() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let mut ship = Ship::new(atlas.sheet(SpriteKey::Ship), 80.0, 64.0, SCREEN);
        ship.set_turning(5);
        assert_eq!(ship.turning(), 1);
        // 90 degrees clockwise
        ship.update(0.3, SCREEN, 0.0);
        assert_eq!(ship.sprite().tile_at(0, 0), 6);
    }

    #[test]
    fn bullets_leave_the_nose() {
        let atlas = SpriteAtlas::for_skin(Skin::FaceInvaders);
        let ship = Ship::new(atlas.sheet(SpriteKey::Ship), 80.0, 64.0, SCREEN);
        let bullet = ship.fire();
        assert_eq!(bullet.pixel(), (79, 55));
        assert_eq!(bullet.motion().v(), BULLET_SPEED);
    }

    #[test]
    fn line_particles_are_anchored_at_their_bounding_box() {
        let particle = Particle::from_seed(ParticleSeed {
            x: 10.0,
            y: 10.0,
            v: 0.0,
            angle: 0.0,
            max_age: 1.0,
            shape: ParticleShape::Line { dx: -6.0, dy: 0.0 },
            color: ParticleColor::Highlight,
        });
        assert_eq!(particle.motion().x(), 4.0);
        assert_eq!(particle.endpoints(), ((10.0, 10.0), (4.0, 10.0)));
        assert_eq!(particle.extent(), (6.0, 0.0));
    }
}
