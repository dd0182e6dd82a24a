//! A strategy paired with its correctness tracker.

use crate::{CorrectnessTracker, Mutator, MutatorStats};
use fuzzkit_core::{FuzzContext, Program};
use tracing::trace;

/// A registered mutation strategy.
///
/// This is the unit the engine works with: it selects a tracked mutator,
/// asks it for a sample, judges the sample and reports the verdict back to
/// the same instance.
pub struct TrackedMutator {
    strategy: Box<dyn Mutator>,
    tracker: CorrectnessTracker,
}

impl TrackedMutator {
    /// Wrap a strategy with a fresh tracker.
    pub fn new(strategy: Box<dyn Mutator>) -> Self {
        Self {
            strategy,
            tracker: CorrectnessTracker::new(),
        }
    }

    /// Strategy name.
    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Run the strategy.
    pub fn mutate(&self, program: &Program, ctx: &mut FuzzContext) -> Option<Program> {
        let mutated = self.strategy.mutate(program, ctx);
        if mutated.is_none() {
            trace!(mutator = self.name(), program = %program.id(), "no mutation possible");
        }
        mutated
    }

    /// Record a semantically valid sample.
    pub fn produced_valid_sample(&self) {
        self.tracker.produced_valid_sample();
    }

    /// Record a semantically invalid sample.
    pub fn produced_invalid_sample(&self) {
        self.tracker.produced_invalid_sample();
    }

    /// Current correctness rate.
    pub fn correctness_rate(&self) -> f64 {
        self.tracker.correctness_rate()
    }

    /// Get the tracker.
    pub fn tracker(&self) -> &CorrectnessTracker {
        &self.tracker
    }

    /// Snapshot the statistics.
    pub fn stats(&self) -> MutatorStats {
        self.tracker.snapshot(self.name())
    }
}

impl std::fmt::Debug for TrackedMutator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedMutator")
            .field("name", &self.name())
            .field("tracker", &self.tracker)
            .finish()
    }
}
