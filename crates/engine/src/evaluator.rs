//! Sample evaluation.

use fuzzkit_core::Program;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Verdict on a produced sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Semantically valid
    Valid,
    /// Semantically invalid
    Invalid,
}

/// Judges whether a sample is semantically valid.
pub trait Evaluator: Send + Sync {
    /// Evaluate one sample.
    fn evaluate(&self, program: &Program) -> Verdict;
}

/// Accepts well-formed programs within an optional size limit.
#[derive(Debug, Clone, Default)]
pub struct StructuralEvaluator {
    max_instructions: Option<usize>,
}

impl StructuralEvaluator {
    /// Create an evaluator without a size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject programs longer than `max` instructions.
    pub fn with_max_instructions(mut self, max: usize) -> Self {
        self.max_instructions = Some(max);
        self
    }
}

impl Evaluator for StructuralEvaluator {
    fn evaluate(&self, program: &Program) -> Verdict {
        if let Some(max) = self.max_instructions {
            if program.len() > max {
                trace!(program = %program.id(), len = program.len(), max, "sample too large");
                return Verdict::Invalid;
            }
        }

        match program.check() {
            Ok(()) => Verdict::Valid,
            Err(e) => {
                trace!(program = %program.id(), error = %e, "malformed sample");
                Verdict::Invalid
            }
        }
    }
}
