//! Mutator registry.

use crate::error::{MutatorError, Result};
use crate::{strategies, Mutator, MutatorConfig, MutatorStats, TrackedMutator};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns every mutation strategy of a fuzzing session.
///
/// Names are unique: registering a second strategy under an existing name
/// fails, so statistics keyed by name never mix two strategies.
#[derive(Debug, Default)]
pub struct MutatorRegistry {
    mutators: Vec<Arc<TrackedMutator>>,
    by_name: HashMap<&'static str, usize>,
}

impl MutatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration.
    pub fn from_config(config: &MutatorConfig) -> Result<Self> {
        config.validate()?;
        if config.enabled.is_empty() {
            return Err(MutatorError::NoMutators);
        }

        let mut registry = Self::new();
        for name in &config.enabled {
            let strategy = strategies::build(name, config)
                .ok_or_else(|| MutatorError::UnknownMutator(name.clone()))?;
            registry.register(strategy)?;
        }

        info!(mutators = ?registry.names(), "registered mutators");
        Ok(registry)
    }

    /// Register a strategy.
    pub fn register(&mut self, strategy: Box<dyn Mutator>) -> Result<Arc<TrackedMutator>> {
        let name = strategy.name();
        if self.by_name.contains_key(name) {
            return Err(MutatorError::DuplicateName(name));
        }

        let tracked = Arc::new(TrackedMutator::new(strategy));
        self.by_name.insert(name, self.mutators.len());
        self.mutators.push(Arc::clone(&tracked));
        debug!(mutator = name, "registered mutator");

        Ok(tracked)
    }

    /// Get a mutator by name.
    pub fn get(&self, name: &str) -> Option<&Arc<TrackedMutator>> {
        self.by_name.get(name).map(|&i| &self.mutators[i])
    }

    /// All mutators, in registration order.
    pub fn mutators(&self) -> &[Arc<TrackedMutator>] {
        &self.mutators
    }

    /// Iterate over the mutators.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TrackedMutator>> {
        self.mutators.iter()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.mutators.iter().map(|m| m.name()).collect()
    }

    /// Number of registered mutators.
    pub fn len(&self) -> usize {
        self.mutators.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.mutators.is_empty()
    }

    /// Statistics of every mutator, in registration order.
    pub fn stats(&self) -> Vec<MutatorStats> {
        self.mutators.iter().map(|m| m.stats()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::{InputMutator, OperationMutator};
    use std::collections::HashSet;

    #[test]
    fn test_register_and_get() {
        let mut registry = MutatorRegistry::new();
        registry.register(Box::new(InputMutator::new())).unwrap();
        registry.register(Box::new(OperationMutator::new())).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["InputMutator", "OperationMutator"]);
        assert!(registry.get("InputMutator").is_some());
        assert!(registry.get("SpliceMutator").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = MutatorRegistry::new();
        registry.register(Box::new(InputMutator::new())).unwrap();

        let result = registry.register(Box::new(InputMutator::new()));
        assert!(matches!(result, Err(MutatorError::DuplicateName("InputMutator"))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_from_default_config_has_unique_names() {
        let registry = MutatorRegistry::from_config(&MutatorConfig::default()).unwrap();
        let names: HashSet<_> = registry.names().into_iter().collect();

        assert_eq!(registry.len(), strategies::ALL.len());
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn test_from_config_unknown_name() {
        let config = MutatorConfig::default().with_enabled(["InputMutator", "ShuffleMutator"]);
        let result = MutatorRegistry::from_config(&config);
        assert!(matches!(result, Err(MutatorError::UnknownMutator(name)) if name == "ShuffleMutator"));
    }

    #[test]
    fn test_from_config_duplicate_entry() {
        let config = MutatorConfig::default().with_enabled(["CombineMutator", "CombineMutator"]);
        let result = MutatorRegistry::from_config(&config);
        assert!(matches!(result, Err(MutatorError::DuplicateName("CombineMutator"))));
    }

    #[test]
    fn test_from_config_empty() {
        let config = MutatorConfig::default().with_enabled(Vec::<String>::new());
        assert!(matches!(MutatorRegistry::from_config(&config), Err(MutatorError::NoMutators)));
    }

    #[test]
    fn test_stats_follow_feedback() {
        let registry = MutatorRegistry::from_config(
            &MutatorConfig::default().with_enabled(["InputMutator", "OperationMutator"]),
        )
        .unwrap();

        let input = registry.get("InputMutator").unwrap();
        input.produced_valid_sample();
        input.produced_invalid_sample();

        let stats = registry.stats();
        assert_eq!(stats[0].name, "InputMutator");
        assert_eq!(stats[0].correctness_rate, 0.5);
        assert_eq!(stats[1].name, "OperationMutator");
        assert_eq!(stats[1].correctness_rate, 1.0);
    }
}
