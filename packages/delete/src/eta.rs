//! Remaining-time estimate for the batch loop.
//!
//! Plain linear extrapolation: if `current` of `total` batches took
//! `elapsed`, the whole run takes `elapsed * total / current`.

use std::fmt;
use std::time::{Duration, Instant};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Estimated time until the last batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eta {
    /// Nothing completed yet, so there is nothing to extrapolate from.
    Infinite,
    /// Remaining time, truncated to whole seconds.
    Remaining(Duration),
}

impl Eta {
    /// Estimates the remaining time after `current` of `total` batches
    /// completed in `elapsed`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(elapsed: Duration, current: usize, total: usize) -> Self {
        if current == 0 {
            return Self::Infinite;
        }

        let elapsed_secs = elapsed.as_secs_f64();
        let estimated_total = elapsed_secs * (total as f64 / current as f64);
        let remaining = (estimated_total - elapsed_secs).max(0.0);

        Self::Remaining(Duration::from_secs(Duration::from_secs_f64(remaining).as_secs()))
    }

    /// Same as [`Eta::estimate`] with the elapsed time measured from
    /// `started`.
    #[must_use]
    pub fn since(started: Instant, current: usize, total: usize) -> Self {
        Self::estimate(started.elapsed(), current, total)
    }
}

impl fmt::Display for Eta {
    /// `Infinity`, or `H:MM:SS` with whole days dropped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infinite => f.write_str("Infinity"),
            Self::Remaining(remaining) => {
                let secs = remaining.as_secs() % SECS_PER_DAY;
                write!(f, "{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
            }
        }
    }
}
