//! Headless frame loop wiring the world to its adapters.

use std::time::Instant;

use anyhow::{Context, Result};
use face_invaders_audio::{AudioMixer, AudioService};
use face_invaders_core::{Command, Event, GameState};
use face_invaders_rendering::{DrawTarget, Scene};
use face_invaders_storage::{save_changes, ScoreStore};
use face_invaders_world::{apply, query, timers::FrameClock, World, WorldConfig};
use tracing::{info, warn};

use crate::{autopilot::Autopilot, config::GameConfig};

/// Final counters of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub(crate) frames: u64,
    pub(crate) presented: u64,
    pub(crate) state: GameState,
    pub(crate) score: u32,
    pub(crate) level: u32,
}

/// Runs `config.frames` frames with the autopilot at the controls.
pub(crate) fn run<S, M, T>(
    config: &GameConfig,
    seed: u64,
    store: &mut S,
    audio: &mut AudioService<M>,
    target: &mut T,
) -> Result<Outcome>
where
    S: ScoreStore,
    M: AudioMixer,
    T: DrawTarget,
{
    let mut world = World::new(WorldConfig {
        screen: config.screen,
        skin: config.skin,
        seed,
        leaderboard: store.load(),
        brightness: config.brightness,
        volume: config.volume,
        ..WorldConfig::default()
    });
    info!("{}", query::welcome_banner(&world));
    let mut pilot = Autopilot::new(seed);
    let mut clock = FrameClock::new();
    let start = Instant::now();
    let step = config.frame_delta();
    let mut commands = Vec::new();
    let mut events = Vec::new();
    let mut presented = 0;

    for frame in 0..config.frames {
        pilot.commands(&world, &mut commands);
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }

        // instants advance by a fixed step so runs replay exactly
        let now = start + step * u32::try_from(frame).unwrap_or(u32::MAX);
        let dt = clock.delta(now);
        apply(&mut world, Command::Tick { dt }, &mut events);

        audio.dispatch(&events);
        if let Err(error) = save_changes(store, &events) {
            warn!("high scores not saved: {error}");
        }

        let last = frame + 1 == config.frames;
        let scheduled = config.render_every > 0 && frame % config.render_every == 0;
        if events.contains(&Event::FrameReady) && (scheduled || last) {
            target
                .present(&Scene::capture(&world))
                .with_context(|| format!("failed to draw frame {frame}"))?;
            presented += 1;
        }
        events.clear();
    }

    let outcome = Outcome {
        frames: config.frames,
        presented,
        state: query::state(&world),
        score: query::score(&world),
        level: query::level(&world),
    };
    info!(
        frames = outcome.frames,
        ticks = query::tick_index(&world),
        state = %outcome.state,
        score = outcome.score,
        level = outcome.level,
        "session finished"
    );
    Ok(outcome)
}
