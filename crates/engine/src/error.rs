//! Engine errors.

use fuzzkit_core::ProgramError;
use fuzzkit_mutators::MutatorError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that stop the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Mutator setup failed
    #[error(transparent)]
    Mutator(#[from] MutatorError),

    /// No seed programs
    #[error("seed corpus is empty")]
    EmptyCorpus,

    /// A seed program is malformed
    #[error("seed {index} is invalid: {source}")]
    InvalidSeed {
        /// Position in the corpus
        index: usize,
        /// Validation error
        source: ProgramError,
    },

    /// A worker panicked or was cancelled
    #[error("worker failed: {0}")]
    Worker(String),
}
