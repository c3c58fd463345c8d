//! Simulation-time countdowns and the wall-clock frame delta source.

use std::time::{Duration, Instant};

/// Delta reported for the very first frame, before any previous instant exists.
pub const NOMINAL_FRAME: Duration = Duration::from_millis(20);

/// Countdown driven by the `dt` of each tick rather than the wall clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    /// Creates a countdown that has already elapsed.
    #[must_use]
    pub const fn elapsed() -> Self {
        Self {
            remaining: Duration::ZERO,
        }
    }

    /// Restarts the countdown.
    pub fn start(&mut self, duration: Duration) {
        self.remaining = duration;
    }

    /// Consumes `dt` of the remaining time.
    pub fn advance(&mut self, dt: Duration) {
        self.remaining = self.remaining.saturating_sub(dt);
    }

    /// Whether the full duration has passed.
    #[must_use]
    pub const fn is_elapsed(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Time left before the countdown elapses.
    #[must_use]
    pub const fn remaining(&self) -> Duration {
        self.remaining
    }
}

/// Measures the time between consecutive frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Creates a clock that has not observed any frame yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns the time since the previous call, or [`NOMINAL_FRAME`] on the first.
    pub fn delta(&mut self, now: Instant) -> Duration {
        let delta = match self.last {
            Some(previous) => now.saturating_duration_since(previous),
            None => NOMINAL_FRAME,
        };
        self.last = Some(now);
        delta
    }
}
