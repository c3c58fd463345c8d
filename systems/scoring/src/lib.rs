#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure score, lives, and leaderboard bookkeeping for Face Invaders.

use face_invaders_core::{BodySize, ScoreEntry, MAX_LIVES, NUM_HIGH_SCORES, NUM_INITIALS};

/// Alphabet cycled through while entering initials.
pub const CHARACTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Placeholder shown for an initial that has not been chosen yet.
pub const BLANK_INITIAL: char = '_';

/// Largest wave spawned when the field is cleared.
pub const MAX_WAVE_SIZE: u32 = 3;

/// Points awarded per destroyed body, by size tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointTable {
    large: u32,
    medium: u32,
    small: u32,
}

impl PointTable {
    /// Creates a point table with explicit values per tier.
    #[must_use]
    pub const fn new(large: u32, medium: u32, small: u32) -> Self {
        Self {
            large,
            medium,
            small,
        }
    }

    /// Points awarded for destroying a body of the given size.
    #[must_use]
    pub const fn points(&self, size: BodySize) -> u32 {
        match size {
            BodySize::Large => self.large,
            BodySize::Medium => self.medium,
            BodySize::Small => self.small,
        }
    }
}

impl Default for PointTable {
    fn default() -> Self {
        Self::new(20, 50, 100)
    }
}

/// Score, lives, and level of the game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    score: u32,
    lives: u32,
    level: u32,
    points: PointTable,
}

impl Session {
    /// Creates a fresh session scored with the provided table.
    #[must_use]
    pub fn new(points: PointTable) -> Self {
        Self {
            score: 0,
            lives: MAX_LIVES,
            level: 1,
            points,
        }
    }

    /// Restores the starting score, lives, and level.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = MAX_LIVES;
        self.level = 1;
    }

    /// Adds the value of a destroyed body to the score and returns the award.
    pub fn award_hit(&mut self, size: BodySize) -> u32 {
        let points = self.points.points(size);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Removes one life, never dropping below zero, and returns the remainder.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Advances to the next level and returns how many bodies its wave holds.
    pub fn advance_level(&mut self) -> u32 {
        self.level = self.level.saturating_add(1);
        self.level.min(MAX_WAVE_SIZE)
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Remaining lives.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Reports whether the player has run out of lives.
    #[must_use]
    pub const fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

/// Descending table of the best scores, capped at [`NUM_HIGH_SCORES`] rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Builds a leaderboard from stored rows, restoring order and capacity.
    #[must_use]
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    /// Reports whether `score` earns a place on the table.
    ///
    /// A table with free rows accepts any score; a full table accepts scores
    /// that beat at least one existing row.
    #[must_use]
    pub fn is_high_score(&self, score: u32) -> bool {
        self.entries.len() < NUM_HIGH_SCORES || self.entries.iter().any(|row| score > row.score)
    }

    /// Inserts a row, keeping the table sorted and capped.
    ///
    /// Rows with equal scores keep their insertion order, so a tie never
    /// displaces an older entry.
    pub fn commit(&mut self, initials: impl Into<String>, score: u32) {
        self.entries.push(ScoreEntry::new(initials, score));
        self.normalize();
    }

    /// Rows in rank order.
    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(NUM_HIGH_SCORES);
    }
}

/// Outcome of confirming the initial under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The current slot is still blank, so nothing happened.
    Blank,
    /// The cursor moved on to the next slot.
    Advanced,
    /// The last slot was confirmed; carries the finished initials.
    Complete(String),
}

/// Three-slot initials editor with a movable cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitialsEntry {
    slots: [Option<usize>; NUM_INITIALS],
    cursor: usize,
}

impl InitialsEntry {
    /// Creates an editor with every slot blank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the current slot forward through the alphabet, wrapping after `Z`.
    pub fn increment(&mut self) {
        let slot = &mut self.slots[self.cursor];
        *slot = Some(match *slot {
            None => 0,
            Some(index) => (index + 1) % CHARACTERS.len(),
        });
    }

    /// Moves the current slot backward through the alphabet, wrapping before `A`.
    pub fn decrement(&mut self) {
        let slot = &mut self.slots[self.cursor];
        *slot = Some(match *slot {
            None => CHARACTERS.len() - 1,
            Some(index) => (index + CHARACTERS.len() - 1) % CHARACTERS.len(),
        });
    }

    /// Confirms the current slot.
    pub fn confirm(&mut self) -> ConfirmOutcome {
        if self.slots[self.cursor].is_none() {
            return ConfirmOutcome::Blank;
        }

        if self.cursor + 1 < NUM_INITIALS {
            self.cursor += 1;
            ConfirmOutcome::Advanced
        } else {
            ConfirmOutcome::Complete(self.text())
        }
    }

    /// Moves the cursor back one slot, stopping at the first.
    pub fn back(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Returns the cursor to the first slot without clearing any letters.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Index of the slot under the cursor.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Displayable initials, with [`BLANK_INITIAL`] for unset slots.
    #[must_use]
    pub fn text(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Some(index) => char::from(CHARACTERS[*index]),
                None => BLANK_INITIAL,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_table_rewards_smaller_bodies_more() {
        let table = PointTable::default();
        assert_eq!(table.points(BodySize::Large), 20);
        assert_eq!(table.points(BodySize::Medium), 50);
        assert_eq!(table.points(BodySize::Small), 100);
    }

    #[test]
    fn lives_never_go_negative() {
        let mut session = Session::new(PointTable::default());
        for _ in 0..5 {
            let _ = session.lose_life();
        }
        assert_eq!(session.lives(), 0);
        assert!(session.is_out_of_lives());
    }

    #[test]
    fn wave_size_caps_at_three() {
        let mut session = Session::new(PointTable::default());
        let waves: Vec<u32> = (0..5).map(|_| session.advance_level()).collect();
        assert_eq!(waves, vec![2, 3, 3, 3, 3]);
        assert_eq!(session.level(), 6);
    }

    #[test]
    fn reset_restores_starting_values() {
        let mut session = Session::new(PointTable::default());
        let _ = session.award_hit(BodySize::Small);
        let _ = session.lose_life();
        let _ = session.advance_level();
        session.reset();
        assert_eq!(session, Session::new(PointTable::default()));
    }

    #[test]
    fn blank_initials_cannot_be_confirmed() {
        let mut entry = InitialsEntry::new();
        assert_eq!(entry.confirm(), ConfirmOutcome::Blank);
        assert_eq!(entry.cursor(), 0);
        assert_eq!(entry.text(), "___");
    }
}
