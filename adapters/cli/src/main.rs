#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Face Invaders headless.

mod autopilot;
mod config;
mod session;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use face_invaders_audio::{AudioService, TracingMixer};
use face_invaders_core::Skin;
use face_invaders_rendering::TextTarget;
use face_invaders_storage::JsonFileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::GameConfig;

/// Display pixels per character of the text renderer.
const TEXT_CELL: u32 = 4;

#[derive(Parser, Debug)]
#[command(name = "face-invaders")]
#[command(about = "Headless Face Invaders session driven by a seeded autopilot")]
struct Cli {
    /// TOML configuration file; missing files fall back to defaults
    #[arg(long, default_value = "face-invaders.toml")]
    config: PathBuf,
    /// RNG seed shared by the world and the autopilot
    #[arg(long)]
    seed: Option<u64>,
    /// Sprite set
    #[arg(long, value_enum)]
    skin: Option<CliSkin>,
    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<u64>,
    /// High-score table location
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Print every n-th frame; 0 prints only the last one
    #[arg(long)]
    render_every: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliSkin {
    Asteroids,
    FaceInvaders,
}

impl From<CliSkin> for Skin {
    fn from(skin: CliSkin) -> Self {
        match skin {
            CliSkin::Asteroids => Skin::Asteroids,
            CliSkin::FaceInvaders => Skin::FaceInvaders,
        }
    }
}

impl Cli {
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(skin) = self.skin {
            config.skin = skin.into();
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(scores) = &self.scores {
            config.scores = scores.clone();
        }
        if let Some(render_every) = self.render_every {
            config.render_every = render_every;
        }
    }
}

/// Entry point for the Face Invaders command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = GameConfig::load(&cli.config).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, skin = ?config.skin, frames = config.frames, "starting session");

    let mut store = JsonFileStore::new(&config.scores);
    let mut audio = AudioService::new(TracingMixer::new(), config.volume);
    let mut target = TextTarget::new(io::stdout().lock(), TEXT_CELL);

    let outcome = session::run(&config, seed, &mut store, &mut audio, &mut target)
        .context("headless session failed")?;
    println!(
        "{} frames, {} drawn, score {} on level {} ({})",
        outcome.frames, outcome.presented, outcome.score, outcome.level, outcome.state
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_lists_the_game_flags() {
        let help = Cli::command().render_long_help().to_string();

        assert!(help.contains("--skin"));
        assert!(help.contains("face-invaders"));
        assert!(help.contains("--seed"));
        assert!(help.contains("--render-every"));
    }

    #[test]
    fn flags_override_the_loaded_configuration() {
        let cli = Cli::try_parse_from([
            "face-invaders",
            "--seed",
            "7",
            "--skin",
            "asteroids",
            "--frames",
            "60",
        ])
        .expect("valid arguments");
        let mut config = GameConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.skin, Skin::Asteroids);
        assert_eq!(config.frames, 60);
        assert_eq!(config.render_every, GameConfig::default().render_every);
    }

    #[test]
    fn unknown_skins_are_rejected() {
        assert!(Cli::try_parse_from(["face-invaders", "--skin", "pong"]).is_err());
    }
}
