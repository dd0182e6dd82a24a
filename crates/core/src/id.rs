//! Unique identifiers for fuzzkit entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a Program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramId(Ulid);

impl ProgramId {
    /// Generate a new ProgramId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Build a ProgramId from its raw 128-bit value
    pub fn from_bits(bits: u128) -> Self {
        Self(Ulid(bits))
    }
}

impl Default for ProgramId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProgramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ProgramId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// A variable defined by an instruction.
///
/// Variables are numbered densely in definition order, so `Variable(n)` is
/// the output of the n-th value-producing instruction of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(pub u32);

impl Variable {
    /// Position of this variable in definition order.
    pub fn number(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}
