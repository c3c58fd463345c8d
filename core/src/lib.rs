#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Face Invaders engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing button presses and elapsed time, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that adapters translate into sound, persistence, and screen refreshes.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Face Invaders.";

/// Number of lives granted at the start of each game.
pub const MAX_LIVES: u32 = 3;

/// Maximum number of entries retained on the leaderboard.
pub const NUM_HIGH_SCORES: usize = 5;

/// Number of characters that make up a player's initials.
pub const NUM_INITIALS: usize = 3;

/// Discrete screens and gameplay phases the session moves between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Title screen with drifting background bodies.
    StartMenu,
    /// Live gameplay with a controllable ship.
    ActiveGame,
    /// Modal overlay for brightness and volume.
    OptionsMenu,
    /// Modal overlay listing the button bindings.
    ControlsMenu,
    /// Game over banner, optionally followed by a continue prompt.
    GameOver,
    /// Initials entry for a qualifying score.
    ScoreInput,
    /// Leaderboard view.
    HighScores,
}

impl GameState {
    /// Reports whether the state is a modal overlay that freezes the simulation.
    #[must_use]
    pub const fn is_overlay(self) -> bool {
        matches!(self, Self::OptionsMenu | Self::ControlsMenu)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StartMenu => "start-menu",
            Self::ActiveGame => "active-game",
            Self::OptionsMenu => "options-menu",
            Self::ControlsMenu => "controls-menu",
            Self::GameOver => "game-over",
            Self::ScoreInput => "score-input",
            Self::HighScores => "high-scores",
        };
        f.write_str(label)
    }
}

/// Logical buttons exposed by the handheld input pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// `A` button: fire, confirm, continue.
    Fire,
    /// `B` button: thrust while held, step back during initials entry.
    Thrust,
    /// Toggles the controls overlay.
    Start,
    /// Toggles the options overlay.
    Select,
    /// Rotates clockwise or increases the selected option.
    Right,
    /// Cycles options or initials backwards.
    Down,
    /// Cycles options or initials forwards.
    Up,
    /// Rotates counter-clockwise or decreases the selected option.
    Left,
}

/// Named sound effects understood by the audio adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    /// Menu confirmation chime.
    Continue,
    /// Played once when the last life is lost.
    GameOver,
    /// Played when a ship enters play.
    NewShip,
    /// Played when a bullet is fired.
    Bullet,
    /// Played when an option or initial changes.
    Click,
    /// Looping engine noise while thrusting.
    ShipThrust,
    /// Played when the ship is destroyed.
    ShipExplosion,
    /// Played when a small body is destroyed.
    ExplosionSmall,
    /// Played when a medium body is destroyed.
    ExplosionMedium,
    /// Played when a large body is destroyed.
    ExplosionLarge,
}

impl Sound {
    /// Every sound in the closed registry.
    pub const ALL: [Sound; 10] = [
        Sound::Continue,
        Sound::GameOver,
        Sound::NewShip,
        Sound::Bullet,
        Sound::Click,
        Sound::ShipThrust,
        Sound::ShipExplosion,
        Sound::ExplosionSmall,
        Sound::ExplosionMedium,
        Sound::ExplosionLarge,
    ];

    /// Asset name of the sound, matching the wave file stem.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::GameOver => "game_over",
            Self::NewShip => "new_ship",
            Self::Bullet => "bullet",
            Self::Click => "click",
            Self::ShipThrust => "ship_thrust",
            Self::ShipExplosion => "ship_explosion",
            Self::ExplosionSmall => "explosion_small",
            Self::ExplosionMedium => "explosion_medium",
            Self::ExplosionLarge => "explosion_large",
        }
    }

    /// Resolves a sound from its asset name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sound| sound.name() == name)
    }

    /// Explosion sound matching the size tier of a destroyed body.
    #[must_use]
    pub const fn explosion_for(size: BodySize) -> Self {
        match size {
            BodySize::Large => Self::ExplosionLarge,
            BodySize::Medium => Self::ExplosionMedium,
            BodySize::Small => Self::ExplosionSmall,
        }
    }
}

/// Playback request forwarded to the audio mixer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Starts playing a sound, optionally looping until ended.
    Play {
        /// Sound to start.
        sound: Sound,
        /// Whether the sound repeats until explicitly ended.
        looping: bool,
    },
    /// Stops a sound immediately.
    Stop {
        /// Sound to silence.
        sound: Sound,
    },
    /// Lets a looping sound finish its current iteration and then stop.
    End {
        /// Sound to end.
        sound: Sound,
    },
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Delivers a press or release of a logical button.
    Button {
        /// Button whose state changed.
        button: Button,
        /// `true` for a press, `false` for a release.
        pressed: bool,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces a transition between game states.
    StateChanged {
        /// State active before the transition.
        from: GameState,
        /// State active after the transition.
        to: GameState,
    },
    /// Requests sound playback from the audio adapter.
    Audio(AudioCue),
    /// Reports that the ship collided with a body.
    ShipDestroyed {
        /// Lives remaining after the collision.
        lives: u32,
    },
    /// Reports that the ship re-entered play after a respawn wait.
    ShipRespawned,
    /// Reports that a body was destroyed.
    BodyDestroyed {
        /// Size tier of the destroyed body.
        size: BodySize,
        /// Points awarded for the body.
        points: u32,
    },
    /// Reports the updated session score.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Reports that a new wave of bodies entered the field.
    WaveSpawned {
        /// Level the wave belongs to.
        level: u32,
        /// Number of large bodies spawned.
        count: u32,
    },
    /// Reports that the game over prompt became visible.
    GameOverPromptShown,
    /// Carries the full leaderboard after a new entry was committed.
    LeaderboardChanged(Vec<ScoreEntry>),
    /// Reports the updated display brightness percentage.
    BrightnessChanged {
        /// Brightness percentage in `10..=100`.
        level: u8,
    },
    /// Reports the updated audio volume percentage.
    VolumeChanged {
        /// Volume percentage in `0..=100`.
        level: u8,
    },
    /// Signals that the frame is complete and the screen should refresh.
    FrameReady,
}

/// Size tier of an enemy body; lower tiers are larger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodySize {
    /// Tier 1: spawned by waves.
    Large,
    /// Tier 2: produced by fragmenting a large body.
    Medium,
    /// Tier 3: produced by fragmenting a medium body; leaves no children.
    Small,
}

impl BodySize {
    /// Size of the children produced when this body fragments.
    #[must_use]
    pub const fn fragment(self) -> Option<Self> {
        match self {
            Self::Large => Some(Self::Medium),
            Self::Medium => Some(Self::Small),
            Self::Small => None,
        }
    }

    /// Sprite sheet used to draw bodies of this size.
    #[must_use]
    pub const fn sprite(self) -> SpriteKey {
        match self {
            Self::Large => SpriteKey::BodyLarge,
            Self::Medium => SpriteKey::BodyMedium,
            Self::Small => SpriteKey::BodySmall,
        }
    }
}

/// Closed registry of sprite sheets loaded by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpriteKey {
    /// Player ship, one tile per heading with a thrust row beneath.
    Ship,
    /// Tier 1 body.
    BodyLarge,
    /// Tier 2 body.
    BodyMedium,
    /// Tier 3 body.
    BodySmall,
}

/// Cosmetic sprite set selected at boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skin {
    /// Rocky asteroids.
    Asteroids,
    /// Grinning faces.
    #[default]
    FaceInvaders,
}

/// Fixed resolution of the display in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenSize {
    width: u32,
    height: u32,
}

impl ScreenSize {
    /// Creates a new screen size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the screen in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the screen in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Integer centre of the screen.
    #[must_use]
    pub const fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(160, 128)
    }
}

/// Half-open axis-aligned rectangle in integer display pixels.
///
/// Covers `x_min..x_max` horizontally and `y_min..y_max` vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    /// Leftmost covered column.
    pub x_min: i32,
    /// One past the rightmost covered column.
    pub x_max: i32,
    /// Topmost covered row.
    pub y_min: i32,
    /// One past the bottom covered row.
    pub y_max: i32,
}

impl PixelRect {
    /// Creates a rectangle from its bounds.
    #[must_use]
    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Creates a rectangle anchored at a top-left corner.
    #[must_use]
    pub const fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, x + width, y, y + height)
    }

    /// Returns the intersection of two rectangles, or `None` when it is empty.
    #[must_use]
    pub fn overlap(&self, other: &PixelRect) -> Option<PixelRect> {
        let x_min = self.x_min.max(other.x_min);
        let x_max = self.x_max.min(other.x_max);
        let y_min = self.y_min.max(other.y_min);
        let y_max = self.y_max.min(other.y_max);

        if x_min < x_max && y_min < y_max {
            Some(PixelRect::new(x_min, x_max, y_min, y_max))
        } else {
            None
        }
    }

    /// Reports whether the pixel lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }

    /// Width of the rectangle in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y_max - self.y_min
    }
}

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(packed: u32) -> Self {
        Self::from_rgb(
            ((packed >> 16) & 0xff) as u8,
            ((packed >> 8) & 0xff) as u8,
            (packed & 0xff) as u8,
        )
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Foreground color used for HUD text, bullets, and ship debris.
pub const HIGHLIGHT_COLOR: Color = Color::from_hex(0xEEEEEE);

/// One leaderboard row, persisted as a two-element `[initials, score]` array.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, u32)", into = "(String, u32)")]
pub struct ScoreEntry {
    /// Player initials.
    pub initials: String,
    /// Final score of the game.
    pub score: u32,
}

impl ScoreEntry {
    /// Creates a new leaderboard row.
    #[must_use]
    pub fn new(initials: impl Into<String>, score: u32) -> Self {
        Self {
            initials: initials.into(),
            score,
        }
    }
}

impl From<(String, u32)> for ScoreEntry {
    fn from((initials, score): (String, u32)) -> Self {
        Self { initials, score }
    }
}

impl From<ScoreEntry> for (String, u32) {
    fn from(entry: ScoreEntry) -> Self {
        (entry.initials, entry.score)
    }
}

/// Blueprint for a body produced by the spawn director.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySeed {
    /// Centre position along the horizontal axis.
    pub x: f32,
    /// Centre position along the vertical axis.
    pub y: f32,
    /// Scalar speed in pixels per second.
    pub v: f32,
    /// Heading of travel in radians, 0 = up, clockwise.
    pub angle: f32,
    /// Size tier of the body.
    pub size: BodySize,
    /// Whether the sprite is mirrored horizontally.
    pub flip_x: bool,
}

/// Color source for a decorative particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleColor {
    /// Entry of a sprite sheet's palette.
    Palette {
        /// Sprite sheet whose palette provides the color.
        sprite: SpriteKey,
        /// Palette index.
        index: u8,
    },
    /// The fixed highlight color.
    Highlight,
}

/// Geometry of a decorative particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleShape {
    /// Single 1×1 dot.
    Dot,
    /// Line segment from the particle position to the offset endpoint.
    Line {
        /// Horizontal offset of the second endpoint.
        dx: f32,
        /// Vertical offset of the second endpoint.
        dy: f32,
    },
}

/// Blueprint for a decorative particle produced by the spawn director.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSeed {
    /// Starting point along the horizontal axis.
    pub x: f32,
    /// Starting point along the vertical axis.
    pub y: f32,
    /// Scalar speed in pixels per second.
    pub v: f32,
    /// Heading of travel in radians.
    pub angle: f32,
    /// Lifetime in seconds.
    pub max_age: f32,
    /// Geometry of the particle.
    pub shape: ParticleShape,
    /// Color of the particle.
    pub color: ParticleColor,
}

/// On-screen groups whose visibility the world toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UiGroup {
    /// Logo and "Press A to Start".
    StartMenu,
    /// Score and lives indicators.
    Hud,
    /// "GAME OVER" banner.
    GameOver,
    /// "Press A to Continue" beneath the game over banner.
    GameOverPrompt,
    /// Initials entry screen.
    ScoreInput,
    /// Leaderboard screen.
    HighScores,
    /// Options overlay.
    OptionsMenu,
    /// Controls overlay.
    ControlsMenu,
}

/// Adjustable entries of the options overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Display brightness percentage.
    Brightness,
    /// Audio volume percentage.
    Volume,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_of_disjoint_rects_is_empty() {
        let left = PixelRect::from_origin(0, 0, 10, 10);
        let right = PixelRect::from_origin(10, 0, 10, 10);
        assert_eq!(left.overlap(&right), None);
    }

    #[test]
    fn overlap_returns_shared_region() {
        let first = PixelRect::from_origin(0, 0, 10, 10);
        let second = PixelRect::from_origin(6, -4, 10, 8);
        assert_eq!(first.overlap(&second), Some(PixelRect::new(6, 10, 0, 4)));
        assert_eq!(second.overlap(&first), first.overlap(&second));
    }

    #[test]
    fn fragmentation_chain_ends_at_small() {
        assert_eq!(BodySize::Large.fragment(), Some(BodySize::Medium));
        assert_eq!(BodySize::Medium.fragment(), Some(BodySize::Small));
        assert_eq!(BodySize::Small.fragment(), None);
    }

    #[test]
    fn sound_names_resolve_back_to_sounds() {
        for sound in Sound::ALL {
            assert_eq!(Sound::from_name(sound.name()), Some(sound));
        }
        assert_eq!(Sound::from_name("laser"), None);
    }

    #[test]
    fn score_entry_serializes_as_pair() {
        let entry = ScoreEntry::new("ABC", 1500);
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(json, r#"["ABC",1500]"#);
        let restored: ScoreEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, entry);
    }

    #[test]
    fn overlays_are_flagged() {
        assert!(GameState::OptionsMenu.is_overlay());
        assert!(GameState::ControlsMenu.is_overlay());
        assert!(!GameState::ActiveGame.is_overlay());
    }
}
