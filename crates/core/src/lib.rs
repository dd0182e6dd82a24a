//! fuzzkit core data models.
//!
//! This crate defines the program representation that mutation strategies
//! operate on, and the fuzzing context that supplies them with randomness
//! and code generation helpers.

#![warn(missing_docs)]

// Core identities
mod id;

// Programs
mod program;
mod error;

// Fuzzing context
mod context;
pub mod codegen;

// Re-exports
pub use id::*;
pub use program::{BinaryOperator, Comparator, Instruction, Operation, Program, ProgramBuilder};
pub use error::{ProgramError, Result};
pub use context::FuzzContext;
