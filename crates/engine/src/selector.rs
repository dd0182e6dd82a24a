//! Mutator selection strategies.

use fuzzkit_core::FuzzContext;
use fuzzkit_mutators::TrackedMutator;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Policy for choosing the mutator of the next trial.
pub trait SelectionPolicy: Send + Sync {
    /// Select a mutator. Returns `None` only for an empty slice.
    fn select<'a>(
        &self,
        mutators: &'a [Arc<TrackedMutator>],
        ctx: &mut FuzzContext,
    ) -> Option<&'a Arc<TrackedMutator>>;
}

/// Every mutator is equally likely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl SelectionPolicy for Uniform {
    fn select<'a>(
        &self,
        mutators: &'a [Arc<TrackedMutator>],
        ctx: &mut FuzzContext,
    ) -> Option<&'a Arc<TrackedMutator>> {
        ctx.choose(mutators)
    }
}

/// Mutators are weighted by their correctness rate.
///
/// The floor keeps a mutator with a rate of zero selectable.
#[derive(Debug, Clone, Copy)]
pub struct CorrectnessWeighted {
    floor: f64,
}

impl CorrectnessWeighted {
    /// Create a weighted selector with the default floor.
    pub fn new() -> Self {
        Self { floor: 0.05 }
    }

    /// Set the minimum weight.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor.clamp(f64::MIN_POSITIVE, 1.0);
        self
    }

    fn weight(&self, mutator: &TrackedMutator) -> f64 {
        mutator.correctness_rate().max(self.floor)
    }
}

impl Default for CorrectnessWeighted {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPolicy for CorrectnessWeighted {
    fn select<'a>(
        &self,
        mutators: &'a [Arc<TrackedMutator>],
        ctx: &mut FuzzContext,
    ) -> Option<&'a Arc<TrackedMutator>> {
        let weights: Vec<f64> = mutators.iter().map(|m| self.weight(m)).collect();
        let distribution = WeightedIndex::new(&weights).ok()?;
        mutators.get(distribution.sample(ctx.rng()))
    }
}

/// Selector strategies available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    /// Uniform selection
    #[default]
    Uniform,
    /// Correctness-weighted selection
    Weighted,
}

impl SelectorKind {
    /// Instantiate the policy.
    pub fn build(self) -> Arc<dyn SelectionPolicy> {
        match self {
            Self::Uniform => Arc::new(Uniform),
            Self::Weighted => Arc::new(CorrectnessWeighted::new()),
        }
    }
}

impl std::str::FromStr for SelectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "weighted" => Ok(Self::Weighted),
            other => Err(format!("unknown selector: {}", other)),
        }
    }
}
