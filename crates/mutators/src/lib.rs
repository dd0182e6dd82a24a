//! Mutation strategies and their correctness tracking.
//!
//! A [`Mutator`] turns one program into a randomized variant of it. Every
//! registered mutator carries a [`CorrectnessTracker`] that the engine feeds
//! with its verdicts, so selection policies can favour strategies that tend
//! to produce valid samples.

#![warn(missing_docs)]

mod config;
mod error;
mod mutator;
mod registry;
mod tracked;
mod tracker;

pub mod strategies;

pub use config::MutatorConfig;
pub use error::{MutatorError, Result};
pub use mutator::Mutator;
pub use registry::MutatorRegistry;
pub use tracked::TrackedMutator;
pub use tracker::{CorrectnessTracker, MutatorStats};
