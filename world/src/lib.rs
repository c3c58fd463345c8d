#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Face Invaders.
//!
//! The [`World`] owns every live entity, the session counters, and the menu
//! state machine. It is mutated exclusively through [`apply`], which reports
//! everything adapters need to know as [`Event`] values, and read through the
//! [`query`] module.

pub mod collision;
pub mod entities;
mod input;
pub mod options;
pub mod sprite;
mod tick;
pub mod timers;

use std::{collections::BTreeSet, time::Duration};

use face_invaders_core::{
    AudioCue, Button, Command, Event, GameState, ScreenSize, Skin, Sound, SpriteKey, UiGroup,
    WELCOME_BANNER,
};
use face_invaders_system_scoring::{InitialsEntry, Leaderboard, PointTable, Session};
use face_invaders_system_spawning::{Config as SpawnConfig, Director};
use tracing::{debug, info};

use crate::{
    entities::{Body, Bullet, Particle, Ship},
    options::Options,
    sprite::SpriteAtlas,
    timers::Countdown,
};

const DEFAULT_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;
const ATTRACT_WAVE: u32 = 3;

/// Delay between losing a ship and the earliest respawn.
pub const RESPAWN_DELAY: Duration = Duration::from_millis(2500);
/// Delay before the game over screen offers to continue.
pub const GAME_OVER_PROMPT_DELAY: Duration = Duration::from_secs(2);
/// Minimum interval between two bullets.
pub const BULLET_COOLDOWN: Duration = Duration::from_millis(250);
/// Half-width of the square around the respawn point that must be free of bodies.
pub const RESPAWN_BUFFER: f32 = 30.0;

/// Parameters used to build a [`World`].
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Display resolution.
    pub screen: ScreenSize,
    /// Sprite set drawn for ship and bodies.
    pub skin: Skin,
    /// Seed for every random decision of the session.
    pub seed: u64,
    /// Points per destroyed body.
    pub points: PointTable,
    /// Leaderboard loaded from storage.
    pub leaderboard: Leaderboard,
    /// Initial display brightness percentage.
    pub brightness: u8,
    /// Initial audio volume percentage.
    pub volume: u8,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let options = Options::default();
        Self {
            screen: ScreenSize::default(),
            skin: Skin::default(),
            seed: DEFAULT_SEED,
            points: PointTable::default(),
            leaderboard: Leaderboard::default(),
            brightness: options.brightness(),
            volume: options.volume(),
        }
    }
}

/// Represents the authoritative Face Invaders world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    screen: ScreenSize,
    atlas: SpriteAtlas,
    state: GameState,
    previous_state: GameState,
    session: Session,
    leaderboard: Leaderboard,
    initials: InitialsEntry,
    options: Options,
    ship: Ship,
    bodies: Vec<Body>,
    bullets: Vec<Bullet>,
    particles: Vec<Particle>,
    director: Director,
    groups: BTreeSet<UiGroup>,
    respawn: Countdown,
    game_over_prompt: Countdown,
    bullet_cooldown: Countdown,
    clock: Duration,
    tick_index: u64,
}

impl World {
    /// Creates a world resting in the start menu with its attract wave drifting.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let atlas = SpriteAtlas::for_skin(config.skin);
        Self::with_atlas(config, atlas)
    }

    /// Creates a world that draws its ship and bodies from the provided sheets.
    #[must_use]
    pub fn with_atlas(config: WorldConfig, atlas: SpriteAtlas) -> Self {
        let (center_x, center_y) = config.screen.center();
        let ship = Ship::new(
            atlas.sheet(SpriteKey::Ship),
            center_x as f32,
            center_y as f32,
            config.screen,
        );

        let mut world = Self {
            banner: WELCOME_BANNER,
            screen: config.screen,
            atlas,
            state: GameState::StartMenu,
            previous_state: GameState::StartMenu,
            session: Session::new(config.points),
            leaderboard: config.leaderboard,
            initials: InitialsEntry::new(),
            options: Options::new(config.brightness, config.volume),
            ship,
            bodies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            director: Director::new(SpawnConfig::new(config.seed)),
            groups: BTreeSet::new(),
            respawn: Countdown::elapsed(),
            game_over_prompt: Countdown::elapsed(),
            bullet_cooldown: Countdown::elapsed(),
            clock: Duration::ZERO,
            tick_index: 0,
        };

        let mut boot_events = Vec::new();
        world.enter_start_menu(&mut boot_events);
        world
    }

    fn center(&self) -> (f32, f32) {
        let (x, y) = self.screen.center();
        (x as f32, y as f32)
    }

    fn transition(&mut self, to: GameState, out_events: &mut Vec<Event>) {
        let from = self.state;
        self.state = to;
        info!(%from, %to, "state changed");
        out_events.push(Event::StateChanged { from, to });
    }

    fn show(&mut self, group: UiGroup) {
        let _ = self.groups.insert(group);
    }

    fn hide(&mut self, group: UiGroup) {
        let _ = self.groups.remove(&group);
    }

    fn show_only(&mut self, group: UiGroup) {
        for screen in [
            UiGroup::StartMenu,
            UiGroup::Hud,
            UiGroup::GameOver,
            UiGroup::ScoreInput,
            UiGroup::HighScores,
        ] {
            self.hide(screen);
        }
        self.show(group);
    }

    fn clear_entities(&mut self) {
        self.bodies.clear();
        self.bullets.clear();
        self.particles.clear();
    }

    pub(crate) fn spawn_wave(&mut self, count: u32, out_events: &mut Vec<Event>) {
        let sheet = self.atlas.sheet(SpriteKey::BodyLarge);
        let mut seeds = Vec::new();
        self.director.spawn_wave(
            count,
            self.screen,
            sheet.tile_width(),
            sheet.tile_height(),
            &mut seeds,
        );
        self.bodies
            .extend(seeds.into_iter().map(|seed| Body::from_seed(seed, sheet)));

        let level = self.session.level();
        info!(level, count, "wave spawned");
        out_events.push(Event::WaveSpawned { level, count });
    }

    pub(crate) fn play(&self, sound: Sound, out_events: &mut Vec<Event>) {
        out_events.push(Event::Audio(AudioCue::Play {
            sound,
            looping: false,
        }));
    }

    pub(crate) fn enter_start_menu(&mut self, out_events: &mut Vec<Event>) {
        self.transition(GameState::StartMenu, out_events);
        self.clear_entities();
        self.spawn_wave(ATTRACT_WAVE, out_events);
        self.show_only(UiGroup::StartMenu);
    }

    pub(crate) fn new_game(&mut self, out_events: &mut Vec<Event>) {
        self.transition(GameState::ActiveGame, out_events);
        self.show_only(UiGroup::Hud);
        self.hide(UiGroup::GameOverPrompt);

        let (x, y) = self.center();
        self.ship.reset(x, y, self.screen);
        self.ship.set_visible(true);

        self.session.reset();
        self.clear_entities();
        self.initials.rewind();
        self.bullet_cooldown = Countdown::elapsed();
        out_events.push(Event::ScoreChanged { score: 0 });

        let level = self.session.level();
        self.spawn_wave(level, out_events);
    }

    pub(crate) fn enter_game_over(&mut self, out_events: &mut Vec<Event>) {
        self.game_over_prompt.start(GAME_OVER_PROMPT_DELAY);
        self.transition(GameState::GameOver, out_events);
        self.show_only(UiGroup::GameOver);
        info!(score = self.session.score(), "game over");
        self.play(Sound::GameOver, out_events);
    }

    pub(crate) fn enter_score_input(&mut self, out_events: &mut Vec<Event>) {
        self.transition(GameState::ScoreInput, out_events);
        self.show_only(UiGroup::ScoreInput);
    }

    pub(crate) fn enter_high_scores(&mut self, out_events: &mut Vec<Event>) {
        self.transition(GameState::HighScores, out_events);
        self.show_only(UiGroup::HighScores);
    }

    /// Opens `overlay` or, when it is already open, returns to the saved state.
    ///
    /// Only one previous state is remembered, so overlays cannot nest. The
    /// button handlers never open one overlay from within the other.
    pub(crate) fn toggle_overlay(
        &mut self,
        overlay: GameState,
        group: UiGroup,
        out_events: &mut Vec<Event>,
    ) {
        if self.state == overlay {
            let previous = self.previous_state;
            self.transition(previous, out_events);
            self.hide(group);
        } else {
            self.previous_state = self.state;
            self.transition(overlay, out_events);
            self.show(group);
        }
    }

    /// Cancels thrust and rotation before an overlay freezes the simulation.
    pub(crate) fn release_controls(&mut self, out_events: &mut Vec<Event>) {
        if self.ship.is_thrusting() {
            self.ship.set_thrusting(false);
            out_events.push(Event::Audio(AudioCue::End {
                sound: Sound::ShipThrust,
            }));
        }
        self.ship.set_turning(0);
    }

    pub(crate) fn try_fire(&mut self, out_events: &mut Vec<Event>) {
        if !self.bullet_cooldown.is_elapsed() {
            debug!(remaining = ?self.bullet_cooldown.remaining(), "bullet on cooldown");
            return;
        }
        self.bullet_cooldown.start(BULLET_COOLDOWN);
        self.bullets.push(self.ship.fire());
        self.play(Sound::Bullet, out_events);
    }

    pub(crate) fn commit_initials(&mut self, initials: String, out_events: &mut Vec<Event>) {
        let score = self.session.score();
        info!(%initials, score, "high score committed");
        self.leaderboard.commit(initials, score);
        out_events.push(Event::LeaderboardChanged(self.leaderboard.entries().to_vec()));
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Button { button, pressed } => {
            debug!(?button, pressed, state = %world.state, "button");
            match button {
                Button::Fire => input::fire(world, pressed, out_events),
                Button::Thrust => input::thrust(world, pressed, out_events),
                Button::Start => input::start(world, pressed, out_events),
                Button::Select => input::select(world, pressed, out_events),
                Button::Left => input::left(world, pressed, out_events),
                Button::Right => input::right(world, pressed, out_events),
                Button::Up => input::up(world, pressed, out_events),
                Button::Down => input::down(world, pressed, out_events),
            }
        }
        Command::Tick { dt } => tick::advance(world, dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use face_invaders_core::{GameState, ScreenSize, UiGroup};
    use face_invaders_system_scoring::{InitialsEntry, Leaderboard};

    use super::World;
    use crate::{
        entities::{Body, Bullet, Particle, Ship},
        options::Options,
        sprite::SpriteAtlas,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current screen or gameplay phase.
    #[must_use]
    pub fn state(world: &World) -> GameState {
        world.state
    }

    /// Display resolution the world simulates.
    #[must_use]
    pub fn screen(world: &World) -> ScreenSize {
        world.screen
    }

    /// Sprite sheets used by the ship and bodies.
    #[must_use]
    pub fn atlas(world: &World) -> &SpriteAtlas {
        &world.atlas
    }

    /// Score of the current or most recent game.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.session.score()
    }

    /// Lives remaining.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.session.lives()
    }

    /// Current level.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.session.level()
    }

    /// The player's ship.
    #[must_use]
    pub fn ship(world: &World) -> &Ship {
        &world.ship
    }

    /// Live bodies.
    #[must_use]
    pub fn bodies(world: &World) -> &[Body] {
        &world.bodies
    }

    /// Live bullets.
    #[must_use]
    pub fn bullets(world: &World) -> &[Bullet] {
        &world.bullets
    }

    /// Live particles.
    #[must_use]
    pub fn particles(world: &World) -> &[Particle] {
        &world.particles
    }

    /// Whether an on-screen group is shown.
    #[must_use]
    pub fn is_visible(world: &World, group: UiGroup) -> bool {
        world.groups.contains(&group)
    }

    /// Shown groups in back-to-front order.
    #[must_use]
    pub fn visible_groups(world: &World) -> Vec<UiGroup> {
        world.groups.iter().copied().collect()
    }

    /// Brightness and volume settings.
    #[must_use]
    pub fn options(world: &World) -> &Options {
        &world.options
    }

    /// Initials being entered for the leaderboard.
    #[must_use]
    pub fn initials(world: &World) -> &InitialsEntry {
        &world.initials
    }

    /// Ranked high scores.
    #[must_use]
    pub fn leaderboard(world: &World) -> &Leaderboard {
        &world.leaderboard
    }

    /// Whether the current score would earn a leaderboard row.
    #[must_use]
    pub fn is_high_score(world: &World) -> bool {
        world.leaderboard.is_high_score(world.session.score())
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
