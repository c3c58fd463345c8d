#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! High-score persistence for Face Invaders adapters.
//!
//! Loading never fails: a missing or corrupt table starts the session with an
//! empty leaderboard. Saving reports its errors so the caller can decide how
//! loudly to complain.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use face_invaders_core::{Event, ScoreEntry, NUM_INITIALS};
use face_invaders_system_scoring::Leaderboard;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default location of the high-score table.
pub const DEFAULT_SCORES_PATH: &str = "scores.json";

/// Errors raised while persisting the high-score table.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File that could not be accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The table could not be converted to or from JSON.
    #[error("malformed score table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Backing store for the leaderboard.
pub trait ScoreStore {
    /// Loads the stored table, falling back to an empty one on any failure.
    fn load(&self) -> Leaderboard;

    /// Replaces the stored table with `rows`.
    fn save(&mut self, rows: &[ScoreEntry]) -> Result<(), StorageError>;
}

/// Persists every leaderboard change found in `events`.
///
/// Returns the number of tables written.
pub fn save_changes<S: ScoreStore + ?Sized>(
    store: &mut S,
    events: &[Event],
) -> Result<usize, StorageError> {
    let mut written = 0;
    for event in events {
        if let Event::LeaderboardChanged(rows) = event {
            store.save(rows)?;
            written += 1;
        }
    }
    Ok(written)
}

/// Leaderboard stored as a JSON array of `[initials, score]` pairs.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Value>, StorageError> {
        let bytes = fs::read(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORES_PATH)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Leaderboard {
        match self.read() {
            Ok(rows) => {
                let board = Leaderboard::from_entries(normalize(rows));
                info!(
                    path = %self.path.display(),
                    rows = board.entries().len(),
                    "high scores loaded"
                );
                board
            }
            Err(StorageError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no high score table yet");
                Leaderboard::default()
            }
            Err(error) => {
                warn!(path = %self.path.display(), "ignoring unreadable high scores: {error}");
                Leaderboard::default()
            }
        }
    }

    fn save(&mut self, rows: &[ScoreEntry]) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let bytes = serde_json::to_vec(rows)?;
        fs::write(&self.path, bytes).map_err(io_error)?;
        debug!(path = %self.path.display(), rows = rows.len(), "high scores saved");
        Ok(())
    }
}

/// Keeps the table in memory; used by tests and sessions without a save file.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    rows: Vec<ScoreEntry>,
    saves: usize,
}

impl MemoryStore {
    /// Creates a store preloaded with `rows`.
    #[must_use]
    pub fn with_rows(rows: Vec<ScoreEntry>) -> Self {
        Self { rows, saves: 0 }
    }

    /// Rows as last saved.
    #[must_use]
    pub fn rows(&self) -> &[ScoreEntry] {
        &self.rows
    }

    /// Number of successful saves.
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Leaderboard {
        let rows = self.rows.iter().cloned().filter_map(normalize_entry).collect();
        Leaderboard::from_entries(rows)
    }

    fn save(&mut self, rows: &[ScoreEntry]) -> Result<(), StorageError> {
        self.rows = rows.to_vec();
        self.saves += 1;
        Ok(())
    }
}

fn normalize(rows: Vec<Value>) -> Vec<ScoreEntry> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<ScoreEntry>(row) {
            Ok(entry) => normalize_entry(entry),
            Err(error) => {
                debug!("dropping malformed score row: {error}");
                None
            }
        })
        .collect()
}

/// Upper-cases the initials and drops rows whose initials are not 1 to 3 letters.
fn normalize_entry(entry: ScoreEntry) -> Option<ScoreEntry> {
    let initials = entry.initials.trim().to_ascii_uppercase();
    let valid = !initials.is_empty()
        && initials.len() <= NUM_INITIALS
        && initials.bytes().all(|byte| byte.is_ascii_uppercase());
    if !valid {
        debug!(initials = %entry.initials, "dropping score row with invalid initials");
        return None;
    }
    Some(ScoreEntry::new(initials, entry.score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_are_upper_cased() {
        let entry = normalize_entry(ScoreEntry::new(" abc ", 10));
        assert_eq!(entry, Some(ScoreEntry::new("ABC", 10)));
    }

    #[test]
    fn invalid_initials_are_dropped() {
        assert_eq!(normalize_entry(ScoreEntry::new("", 10)), None);
        assert_eq!(normalize_entry(ScoreEntry::new("ABCD", 10)), None);
        assert_eq!(normalize_entry(ScoreEntry::new("A1", 10)), None);
    }

    #[test]
    fn malformed_rows_are_skipped_individually() {
        let rows: Vec<Value> =
            serde_json::from_str(r#"[["AAA", 30], "oops", ["BB", -4], ["cc", 7]]"#)
                .expect("valid json");

        assert_eq!(
            normalize(rows),
            vec![ScoreEntry::new("AAA", 30), ScoreEntry::new("CC", 7)]
        );
    }
}
