//! TOML configuration for headless sessions.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use face_invaders_core::{ScreenSize, Skin};
use face_invaders_storage::DEFAULT_SCORES_PATH;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading the configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Configuration file path.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for one run of the game.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Display resolution.
    pub(crate) screen: ScreenSize,
    /// Sprite set.
    pub(crate) skin: Skin,
    /// RNG seed; drawn from entropy when absent.
    pub(crate) seed: Option<u64>,
    /// High-score table location.
    pub(crate) scores: PathBuf,
    /// Initial display brightness percentage.
    pub(crate) brightness: u8,
    /// Initial audio volume percentage.
    pub(crate) volume: u8,
    /// Number of frames simulated before exiting.
    pub(crate) frames: u64,
    /// Simulated time between frames, in milliseconds.
    pub(crate) frame_ms: u64,
    /// Print every n-th frame; 0 prints only the last one.
    pub(crate) render_every: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenSize::default(),
            skin: Skin::default(),
            seed: None,
            scores: PathBuf::from(DEFAULT_SCORES_PATH),
            brightness: 100,
            volume: 0,
            frames: 3_000,
            frame_ms: 20,
            render_every: 0,
        }
    }
}

impl GameConfig {
    /// Reads the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Simulated time between frames, never zero.
    pub(crate) fn frame_delta(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(GameConfig::parse("").expect("valid"), GameConfig::default());
    }

    #[test]
    fn values_override_defaults() {
        let config = GameConfig::parse(
            r#"
            skin = "asteroids"
            seed = 7
            scores = "saves/high.json"
            volume = 40
            frames = 120

            [screen]
            width = 320
            height = 240
            "#,
        )
        .expect("valid");

        assert_eq!(config.skin, Skin::Asteroids);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scores, PathBuf::from("saves/high.json"));
        assert_eq!(config.volume, 40);
        assert_eq!(config.brightness, 100);
        assert_eq!(config.frames, 120);
        assert_eq!(config.screen, ScreenSize::new(320, 240));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(GameConfig::parse("lives = 9").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = GameConfig::load(&dir.path().join("face-invaders.toml")).expect("defaults");

        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("face-invaders.toml");
        fs::write(&path, "frames = \"many\"").expect("write fixture");

        let error = GameConfig::load(&path).expect_err("type mismatch");

        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("face-invaders.toml"));
    }

    #[test]
    fn zero_frame_delta_is_bumped() {
        let config = GameConfig {
            frame_ms: 0,
            ..GameConfig::default()
        };

        assert_eq!(config.frame_delta(), Duration::from_millis(1));
    }
}
