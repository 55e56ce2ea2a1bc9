//! Property registry
//!
//! Holds the properties of one logger in registration order, with a name
//! index for lookups. Names are unique: a duplicate is rejected when it is
//! inserted.

use super::Property;
use crate::types::{EvaluationSnapshot, LoggerError, Result};
use std::collections::HashMap;

/// Name-indexed collection of properties
#[derive(Default)]
pub struct PropertyRegistry {
    /// Properties in registration order
    properties: Vec<Box<dyn Property>>,

    /// Key: property name, Value: index in `properties`
    lookup: HashMap<String, usize>,
}

impl PropertyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list, failing on the first duplicate name
    pub fn from_properties(properties: Vec<Box<dyn Property>>) -> Result<Self> {
        let mut registry = Self::new();
        for property in properties {
            registry.insert(property)?;
        }
        Ok(registry)
    }

    /// Register a property
    pub fn insert(&mut self, property: Box<dyn Property>) -> Result<()> {
        let name = property.name().to_string();
        if self.lookup.contains_key(&name) {
            return Err(LoggerError::DuplicateProperty(name));
        }

        log::debug!("Watching property: {}", name);
        self.lookup.insert(name, self.properties.len());
        self.properties.push(property);
        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// True if a property with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Get a property by name
    pub fn get(&self, name: &str) -> Option<&dyn Property> {
        self.lookup
            .get(name)
            .and_then(|idx| self.properties.get(*idx))
            .map(|p| p.as_ref())
    }

    /// Read a property against the last delivered snapshot
    ///
    /// # Returns
    /// * `Err(PropertyNotFound)` if the name was never registered
    /// * `Ok(None)` if it is registered but has no value yet
    pub fn read(&self, name: &str, snapshot: Option<&EvaluationSnapshot>) -> Result<Option<f64>> {
        let property = self
            .get(name)
            .ok_or_else(|| LoggerError::PropertyNotFound(name.to_string()))?;
        Ok(snapshot.and_then(|s| property.value(s)))
    }

    /// Read every property, in registration order
    pub fn read_all(&self, snapshot: &EvaluationSnapshot) -> Vec<Option<f64>> {
        self.properties.iter().map(|p| p.value(snapshot)).collect()
    }

    /// Property names, in registration order
    pub fn names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Every stored property is indexed exactly once, under its own name
    fn is_consistent(&self) -> bool {
        self.lookup.len() == self.properties.len()
            && self
                .lookup
                .iter()
                .all(|(name, idx)| self.properties.get(*idx).map(|p| p.name()) == Some(name.as_str()))
    }
}

impl std::fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyRegistry")
            .field("names", &self.names())
            .finish()
    }
}
