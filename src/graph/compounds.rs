//! CompoundStore — compounds keyed by formula.

use std::collections::BTreeMap;

use crate::model::{Compound, PropertyMap, PropertyMapExt, Value};
use crate::{Error, Result};

/// Owns every compound. Formula order is the iteration order, which keeps
/// `search` and `suggest` deterministic across identical calls.
#[derive(Debug, Clone, Default)]
pub struct CompoundStore {
    compounds: BTreeMap<String, Compound>,
}

impl CompoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-merge.
    ///
    /// A new formula gets exactly `props`; an existing one has `props`
    /// overlaid onto its bag. A `formula` key in `props` must repeat the
    /// formula itself and is dropped.
    pub fn upsert(&mut self, formula: &str, mut props: PropertyMap) -> Result<&Compound> {
        if formula.trim().is_empty() {
            return Err(Error::InvalidArgument("formula must be a non-empty identifier".into()));
        }
        match props.remove("formula") {
            None => {}
            Some(Value::String(ref echoed)) if echoed == formula => {}
            Some(other) => {
                return Err(Error::InvalidArgument(format!(
                    "formula property {other} does not match compound '{formula}'"
                )));
            }
        }

        let compound = self
            .compounds
            .entry(formula.to_owned())
            .or_insert_with(|| Compound::new(formula));
        compound.properties.overlay(props);
        Ok(compound)
    }

    pub fn get(&self, formula: &str) -> Option<&Compound> {
        self.compounds.get(formula)
    }

    pub fn contains(&self, formula: &str) -> bool {
        self.compounds.contains_key(formula)
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Compound> {
        self.compounds.values()
    }

    /// All compounds whose formula contains `needle`, or whose name contains
    /// it case-insensitively. An empty needle matches everything.
    pub fn search(&self, needle: &str) -> Vec<Compound> {
        self.compounds
            .values()
            .filter(|c| c.matches(needle))
            .cloned()
            .collect()
    }

    /// Up to `limit` compounds whose formula starts with `prefix`, or whose
    /// name starts with it case-insensitively.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<Compound> {
        self.compounds
            .values()
            .filter(|c| c.matches_prefix(prefix))
            .take(limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::props;

    fn store() -> CompoundStore {
        let mut s = CompoundStore::new();
        s.upsert("CH3OH", props([("name", "Methanol")])).unwrap();
        s.upsert("CH3CH2OH", props([("name", "Ethanol")])).unwrap();
        s.upsert("CH3CHO", props([("name", "Acetaldehyde")])).unwrap();
        s.upsert("HCOOH", props([("name", "Formic Acid")])).unwrap();
        s
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut s = CompoundStore::new();
        s.upsert("CH3OH", props([("name", "Methanol")])).unwrap();
        s.upsert("CH3OH", props([("name", "Methanol")])).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.get("CH3OH").unwrap().name(), Some("Methanol"));
    }

    #[test]
    fn test_upsert_overlays() {
        let mut s = CompoundStore::new();
        s.upsert("X", props([("a", 1)])).unwrap();
        let c = s.upsert("X", props([("b", 2)])).unwrap();
        assert_eq!(c.get("a"), Some(&Value::Int(1)));
        assert_eq!(c.get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_upsert_rejects_empty_formula() {
        let mut s = CompoundStore::new();
        assert!(matches!(s.upsert("", PropertyMap::new()), Err(Error::InvalidArgument(_))));
        assert!(matches!(s.upsert("  ", PropertyMap::new()), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_formula_property_must_match() {
        let mut s = CompoundStore::new();
        let c = s.upsert("CH4", props([("formula", "CH4"), ("name", "Methane")])).unwrap();
        assert!(c.get("formula").is_none());

        let err = s.upsert("CH4", props([("formula", "C2H6")])).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_search_formula_and_name() {
        let s = store();
        let by_formula: Vec<String> = s.search("CHO").into_iter().map(|c| c.formula).collect();
        assert_eq!(by_formula, vec!["CH3CHO"]);

        let by_name: Vec<String> = s.search("ETHAN").into_iter().map(|c| c.formula).collect();
        assert_eq!(by_name, vec!["CH3CH2OH", "CH3OH"]);

        assert_eq!(s.search("").len(), 4);
    }

    #[test]
    fn test_suggest_prefix_and_limit() {
        let s = store();
        assert_eq!(s.suggest("CH3", 10).len(), 3);
        assert_eq!(s.suggest("CH3", 2).len(), 2);
        assert_eq!(s.suggest("formic", 10)[0].formula, "HCOOH");
        assert_eq!(s.suggest("CH3", 2), s.suggest("CH3", 2));
    }
}
