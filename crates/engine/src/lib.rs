//! Fuzzing engine - mutator selection, sample evaluation and feedback.

#![warn(missing_docs)]

pub mod selector;
pub mod evaluator;
pub mod engine;
mod error;

pub use selector::{SelectionPolicy, Uniform, CorrectnessWeighted, SelectorKind};
pub use evaluator::{Evaluator, StructuralEvaluator, Verdict};
pub use engine::{FuzzEngine, EngineConfig, EngineReport, TrialOutcome};
pub use error::{EngineError, Result};
