//! Mutator errors.

/// Result type for mutator setup.
pub type Result<T> = std::result::Result<T, MutatorError>;

/// Errors raised while assembling mutators.
#[derive(Debug, thiserror::Error)]
pub enum MutatorError {
    /// Two strategies share a name
    #[error("mutator name already registered: {0}")]
    DuplicateName(&'static str),

    /// Configuration names a strategy that does not exist
    #[error("unknown mutator: {0}")]
    UnknownMutator(String),

    /// No strategy enabled
    #[error("no mutators enabled")]
    NoMutators,

    /// Configuration value out of range
    #[error("invalid mutator configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
