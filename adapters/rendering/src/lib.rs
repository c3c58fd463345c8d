#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Face Invaders adapters.
//!
//! Backends never look inside the world. They receive an immutable [`Scene`]
//! captured once per frame and draw it however their medium allows.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use face_invaders_core::{
    Color as PaletteColor, GameState, OptionKind, ParticleColor, ScoreEntry, ScreenSize, SpriteKey,
    UiGroup, HIGHLIGHT_COLOR,
};
use face_invaders_world::{
    entities::Particle,
    query,
    sprite::{Sprite, SpriteAtlas},
    World,
};
use glam::{IVec2, UVec2, Vec2};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the color darkened towards black by a display brightness factor.
    #[must_use]
    pub fn dimmed(self, brightness: f32) -> Self {
        let brightness = brightness.clamp(0.0, 1.0);

        Self {
            red: self.red * brightness,
            green: self.green * brightness,
            blue: self.blue * brightness,
            alpha: self.alpha,
        }
    }
}

impl From<PaletteColor> for Color {
    fn from(color: PaletteColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// One lit display pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePixel {
    /// Display coordinate.
    pub position: IVec2,
    /// Resolved color, already dimmed by the display brightness.
    pub color: Color,
}

impl ScenePixel {
    fn lit(x: i32, y: i32, color: PaletteColor, brightness: f32) -> Self {
        Self {
            position: IVec2::new(x, y),
            color: Color::from(color).dimmed(brightness),
        }
    }
}

/// Immutable snapshot of one placed sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSprite {
    /// Sheet the sprite draws from.
    pub key: SpriteKey,
    /// Sheet tile shown by the sprite.
    pub tile: u32,
    /// Whether the sprite is mirrored horizontally.
    pub flip_x: bool,
    /// Top-left corner in display pixels.
    pub origin: IVec2,
    /// Width and height in display pixels.
    pub size: UVec2,
    /// Opaque display pixels covered by the sprite.
    pub pixels: Vec<ScenePixel>,
}

impl SceneSprite {
    fn capture(sprite: &Sprite, atlas: &SpriteAtlas, brightness: f32) -> Self {
        let sheet = atlas.sheet(sprite.key());
        let bounds = sprite.bounds(sheet);
        let mut opaque = Vec::new();
        sprite.opaque_pixels(sheet, bounds, &mut opaque);
        let pixels = opaque
            .into_iter()
            .map(|(x, y)| {
                let color = sprite
                    .sample(sheet, x, y)
                    .and_then(|index| sheet.color(index))
                    .unwrap_or(HIGHLIGHT_COLOR);
                ScenePixel::lit(x, y, color, brightness)
            })
            .collect();

        Self {
            key: sprite.key(),
            tile: sprite.tile_at(0, 0),
            flip_x: sprite.flip_x(),
            origin: IVec2::new(sprite.x(), sprite.y()),
            size: UVec2::new(bounds.width() as u32, bounds.height() as u32),
            pixels,
        }
    }
}

/// Immutable snapshot of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParticle {
    /// First endpoint in display pixels.
    pub from: Vec2,
    /// Second endpoint; equal to `from` for dots.
    pub to: Vec2,
    /// Resolved color, already dimmed by the display brightness.
    pub color: Color,
}

impl SceneParticle {
    fn capture(particle: &Particle, atlas: &SpriteAtlas, brightness: f32) -> Self {
        let (from, to) = particle.endpoints();
        let color = match particle.color() {
            ParticleColor::Palette { sprite, index } => atlas
                .sheet(sprite)
                .color(index)
                .unwrap_or(HIGHLIGHT_COLOR),
            ParticleColor::Highlight => HIGHLIGHT_COLOR,
        };

        Self {
            from: Vec2::new(from.0, from.1),
            to: Vec2::new(to.0, to.1),
            color: Color::from(color).dimmed(brightness),
        }
    }
}

/// Score, lives, and level indicators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Current score.
    pub score: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Current level.
    pub level: u32,
}

/// Values shown by the options overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneOptions {
    /// Display brightness percentage.
    pub brightness: u8,
    /// Audio volume percentage.
    pub volume: u8,
    /// Entry under the cursor.
    pub selected: OptionKind,
}

/// Everything a backend needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Display resolution.
    pub screen: ScreenSize,
    /// State of the menu machine when the scene was captured.
    pub state: GameState,
    /// Display brightness factor in the range 0.0..=1.0.
    pub brightness: f32,
    /// The ship, when visible.
    pub ship: Option<SceneSprite>,
    /// Live bodies.
    pub bodies: Vec<SceneSprite>,
    /// Bullet centre pixels.
    pub bullets: Vec<ScenePixel>,
    /// Explosion debris.
    pub particles: Vec<SceneParticle>,
    /// Score and lives indicators.
    pub hud: Hud,
    /// Visible UI groups in draw order.
    pub groups: Vec<UiGroup>,
    /// Options overlay values.
    pub options: SceneOptions,
    /// Initials being entered, blanks shown as `_`.
    pub initials: String,
    /// Slot under the initials cursor.
    pub initials_cursor: usize,
    /// Leaderboard rows in rank order.
    pub leaderboard: Vec<ScoreEntry>,
}

impl Scene {
    /// Captures the current world state.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let atlas = query::atlas(world);
        let options = query::options(world);
        let brightness = f32::from(options.brightness()) / 100.0;
        let ship = query::ship(world);
        let initials = query::initials(world);

        Self {
            screen: query::screen(world),
            state: query::state(world),
            brightness,
            ship: ship
                .is_visible()
                .then(|| SceneSprite::capture(ship.sprite(), atlas, brightness)),
            bodies: query::bodies(world)
                .iter()
                .map(|body| SceneSprite::capture(body.sprite(), atlas, brightness))
                .collect(),
            bullets: query::bullets(world)
                .iter()
                .map(|bullet| {
                    let (x, y) = bullet.pixel();
                    ScenePixel::lit(x, y, HIGHLIGHT_COLOR, brightness)
                })
                .collect(),
            particles: query::particles(world)
                .iter()
                .map(|particle| SceneParticle::capture(particle, atlas, brightness))
                .collect(),
            hud: Hud {
                score: query::score(world),
                lives: query::lives(world),
                level: query::level(world),
            },
            groups: query::visible_groups(world),
            options: SceneOptions {
                brightness: options.brightness(),
                volume: options.volume(),
                selected: options.selected(),
            },
            initials: initials.text(),
            initials_cursor: initials.cursor(),
            leaderboard: query::leaderboard(world).entries().to_vec(),
        }
    }

    /// Whether `group` is shown.
    #[must_use]
    pub fn is_visible(&self, group: UiGroup) -> bool {
        self.groups.contains(&group)
    }
}

/// Destination capable of presenting captured scenes.
pub trait DrawTarget {
    /// Draws one frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

const EMPTY: char = ' ';
const BULLET: char = '*';
const DEBRIS: char = '.';

fn glyph(key: SpriteKey) -> char {
    match key {
        SpriteKey::Ship => 'A',
        SpriteKey::BodyLarge => '@',
        SpriteKey::BodyMedium => 'O',
        SpriteKey::BodySmall => 'o',
    }
}

/// Draw target that prints a downsampled ASCII frame followed by the visible
/// UI text.
#[derive(Debug)]
pub struct TextTarget<W> {
    out: W,
    cell: u32,
    frames: u64,
}

impl<W: Write> TextTarget<W> {
    /// Creates a target where each character covers `cell × cell` display pixels.
    pub fn new(out: W, cell: u32) -> Self {
        Self {
            out,
            cell: cell.max(1),
            frames: 0,
        }
    }

    /// Number of frames presented so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Releases the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn rasterize(&self, scene: &Scene) -> Vec<Vec<char>> {
        let cell = self.cell as i32;
        let columns = scene.screen.width().div_ceil(self.cell) as usize;
        let rows = scene.screen.height().div_ceil(self.cell) as usize;
        let mut grid = vec![vec![EMPTY; columns]; rows];
        let mut plot = |point: IVec2, mark: char| {
            if point.x < 0 || point.y < 0 {
                return;
            }
            let row = (point.y / cell) as usize;
            let column = (point.x / cell) as usize;
            if let Some(slot) = grid.get_mut(row).and_then(|line| line.get_mut(column)) {
                *slot = mark;
            }
        };

        for particle in &scene.particles {
            plot(particle.from.as_ivec2(), DEBRIS);
            plot(particle.to.as_ivec2(), DEBRIS);
        }
        for sprite in scene.bodies.iter().chain(scene.ship.iter()) {
            for pixel in &sprite.pixels {
                plot(pixel.position, glyph(sprite.key));
            }
        }
        for bullet in &scene.bullets {
            plot(bullet.position, BULLET);
        }

        grid
    }

    fn write_frame(&mut self, scene: &Scene) -> std::io::Result<()> {
        let grid = self.rasterize(scene);
        let border = format!("+{}+", "-".repeat(grid.first().map_or(0, Vec::len)));

        writeln!(self.out, "{border}")?;
        for line in &grid {
            writeln!(self.out, "|{}|", line.iter().collect::<String>())?;
        }
        writeln!(self.out, "{border}")?;

        for group in &scene.groups {
            self.write_group(scene, *group)?;
        }
        self.out.flush()
    }

    fn write_group(&mut self, scene: &Scene, group: UiGroup) -> std::io::Result<()> {
        match group {
            UiGroup::StartMenu => writeln!(self.out, "FACE INVADERS    Press A to Start"),
            UiGroup::Hud => writeln!(
                self.out,
                "SCORE {}    LIVES {}    LEVEL {}",
                scene.hud.score, scene.hud.lives, scene.hud.level
            ),
            UiGroup::GameOver => writeln!(self.out, "GAME OVER"),
            UiGroup::GameOverPrompt => writeln!(self.out, "Press A to Continue"),
            UiGroup::ScoreInput => {
                writeln!(self.out, "NEW HIGH SCORE {}", scene.hud.score)?;
                writeln!(self.out, "{}", scene.initials)?;
                writeln!(self.out, "{:>width$}", "^", width = scene.initials_cursor + 1)
            }
            UiGroup::HighScores => {
                writeln!(self.out, "HIGH SCORES")?;
                for (rank, row) in scene.leaderboard.iter().enumerate() {
                    writeln!(self.out, "{}. {:<3} {:>6}", rank + 1, row.initials, row.score)?;
                }
                Ok(())
            }
            UiGroup::OptionsMenu => {
                writeln!(self.out, "OPTIONS")?;
                for (kind, label, value) in [
                    (OptionKind::Brightness, "Brightness", scene.options.brightness),
                    (OptionKind::Volume, "Volume", scene.options.volume),
                ] {
                    let cursor = if kind == scene.options.selected { '>' } else { ' ' };
                    writeln!(self.out, "{cursor} {label:<10} {value:>3}")?;
                }
                Ok(())
            }
            UiGroup::ControlsMenu => {
                writeln!(self.out, "CONTROLS")?;
                writeln!(self.out, "A fire    B thrust    LEFT/RIGHT turn")?;
                writeln!(self.out, "SELECT options    START controls")
            }
        }
    }
}

impl<W: Write> DrawTarget for TextTarget<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        self.write_frame(scene)
            .with_context(|| format!("failed to present frame {}", self.frames))?;
        self.frames += 1;
        Ok(())
    }
}
