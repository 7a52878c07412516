//! Compound — a node in the reaction graph.

use serde::{Deserialize, Serialize};
use super::{PropertyMap, PropertyMapExt, Value};

/// A compound, identified by its formula.
///
/// Serializes flat: `{"formula": "CH3OH", "name": "Methanol", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub formula: String,
    #[serde(flatten)]
    pub properties: PropertyMap,
}

impl Compound {
    pub fn new(formula: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Common name (`name` property), if set.
    pub fn name(&self) -> Option<&str> {
        self.properties.get_str("name")
    }

    /// Case-insensitive substring match on formula or name.
    pub fn matches(&self, needle: &str) -> bool {
        if self.formula.contains(needle) {
            return true;
        }
        let needle = needle.to_lowercase();
        self.name().is_some_and(|n| n.to_lowercase().contains(&needle))
    }

    /// Prefix match on formula, or case-insensitive prefix match on name.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        if self.formula.starts_with(prefix) {
            return true;
        }
        let prefix = prefix.to_lowercase();
        self.name().is_some_and(|n| n.to_lowercase().starts_with(&prefix))
    }
}
