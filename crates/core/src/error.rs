//! Program errors.

use crate::id::Variable;

/// Result type for program operations.
pub type Result<T> = std::result::Result<T, ProgramError>;

/// Errors raised while loading or validating programs.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An instruction reads a variable that is not defined before it
    #[error("instruction {index} uses undefined variable {variable}")]
    UndefinedVariable {
        /// Instruction index
        index: usize,
        /// Offending variable
        variable: Variable,
    },

    /// Wrong number of inputs for the operation
    #[error("instruction {index} expects {expected} inputs, found {found}")]
    ArityMismatch {
        /// Instruction index
        index: usize,
        /// Inputs required by the operation
        expected: usize,
        /// Inputs present
        found: usize,
    },

    /// Output presence does not match the operation
    #[error("instruction {index} output does not match its operation")]
    OutputMismatch {
        /// Instruction index
        index: usize,
    },

    /// Outputs must be numbered densely in definition order
    #[error("instruction {index} defines {found}, expected {expected}")]
    NonSequentialOutput {
        /// Instruction index
        index: usize,
        /// Next free variable
        expected: Variable,
        /// Variable actually defined
        found: Variable,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
