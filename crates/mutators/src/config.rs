//! Mutator configuration.

use crate::error::{MutatorError, Result};
use crate::strategies;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which strategies to register and how they are tuned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutatorConfig {
    /// Strategy names, in registration order
    pub enabled: Vec<String>,
    /// Upper bound of instructions inserted by `InsertionMutator`
    pub max_insertions: usize,
    /// Upper bound of the slice copied by `SpliceMutator`
    pub max_splice_len: usize,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            enabled: strategies::ALL.iter().map(|s| s.to_string()).collect(),
            max_insertions: 3,
            max_splice_len: 5,
        }
    }
}

impl MutatorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_insertions == 0 {
            return Err(MutatorError::InvalidConfig(
                "max_insertions must be at least 1".to_string(),
            ));
        }
        if self.max_splice_len == 0 {
            return Err(MutatorError::InvalidConfig(
                "max_splice_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the enabled strategies.
    pub fn with_enabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the insertion bound.
    pub fn with_max_insertions(mut self, max: usize) -> Self {
        self.max_insertions = max;
        self
    }

    /// Set the splice bound.
    pub fn with_max_splice_len(mut self, max: usize) -> Self {
        self.max_splice_len = max;
        self
    }
}
