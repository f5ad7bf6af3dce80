//! Contract registry.

use indexmap::IndexMap;

use crate::config::schema::ContractDescriptor;
use crate::config::validation::ConfigError;

/// Immutable, insertion-ordered map of contract name to descriptor.
///
/// Only [`insert`](Self::insert) and [`build`](Self::build) add entries, and
/// both reject duplicate names before touching the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractRegistry {
    entries: IndexMap<String, ContractDescriptor>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors in order.
    pub fn build<I>(descriptors: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ContractDescriptor>,
    {
        let mut registry = Self::new();
        for (index, descriptor) in descriptors.into_iter().enumerate() {
            registry.insert(index, descriptor)?;
        }
        Ok(registry)
    }

    /// Register `descriptor`, found at `index` of the settings list.
    pub(crate) fn insert(&mut self, index: usize, descriptor: ContractDescriptor) -> Result<(), ConfigError> {
        if self.entries.contains_key(&descriptor.contract_name) {
            return Err(ConfigError::DuplicateContract {
                name: descriptor.contract_name,
                index,
            });
        }
        self.entries.insert(descriptor.contract_name.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ContractDescriptor> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ContractDescriptor> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
