//! Correctness tracking for mutation strategies.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts how many samples of a strategy were judged valid or invalid.
///
/// The tracker never evaluates anything itself; the engine reports each
/// verdict. Counters only grow and are safe to update from many threads.
#[derive(Debug, Default)]
pub struct CorrectnessTracker {
    valid: AtomicU64,
    invalid: AtomicU64,
}

impl CorrectnessTracker {
    /// Create a tracker with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a semantically valid sample.
    pub fn produced_valid_sample(&self) {
        self.valid.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a semantically invalid sample.
    pub fn produced_invalid_sample(&self) {
        self.invalid.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of valid samples recorded.
    pub fn valid_count(&self) -> u64 {
        self.valid.load(Ordering::Relaxed)
    }

    /// Number of invalid samples recorded.
    pub fn invalid_count(&self) -> u64 {
        self.invalid.load(Ordering::Relaxed)
    }

    /// Total samples recorded.
    pub fn total(&self) -> u64 {
        self.valid_count() + self.invalid_count()
    }

    /// Fraction of valid samples, `1.0` before any feedback.
    ///
    /// Unseen strategies start at the optimistic end so a weighted selection
    /// policy does not starve them.
    pub fn correctness_rate(&self) -> f64 {
        rate(self.valid_count(), self.invalid_count())
    }

    /// Snapshot the counters under `name`.
    pub fn snapshot(&self, name: &str) -> MutatorStats {
        let valid = self.valid_count();
        let invalid = self.invalid_count();
        MutatorStats {
            name: name.to_string(),
            valid,
            invalid,
            correctness_rate: rate(valid, invalid),
        }
    }
}

fn rate(valid: u64, invalid: u64) -> f64 {
    let total = valid + invalid;
    if total == 0 {
        return 1.0;
    }
    valid as f64 / total as f64
}

/// Point-in-time statistics of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutatorStats {
    /// Strategy name
    pub name: String,
    /// Valid samples
    pub valid: u64,
    /// Invalid samples
    pub invalid: u64,
    /// `valid / (valid + invalid)`, or 1.0 when nothing was recorded
    pub correctness_rate: f64,
}
