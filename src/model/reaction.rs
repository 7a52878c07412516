//! Reaction edge — a directed, labeled edge between two compounds.

use serde::{Deserialize, Serialize};
use super::{PropertyMap, Value};

/// Reagent recorded for edges whose properties carry none.
pub const UNKNOWN_REAGENT: &str = "unknown";

/// Opaque reaction identifier, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReactionId(pub u64);

impl std::fmt::Display for ReactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What tells parallel edges between the same two compounds apart.
///
/// Caller-supplied ids and reagents live in separate namespaces: an edge
/// with id `R1` and an edge whose reagent is `R1` are different edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discriminator {
    Id(String),
    Reagent(String),
}

impl Discriminator {
    pub fn value(&self) -> &str {
        match self {
            Discriminator::Id(s) | Discriminator::Reagent(s) => s,
        }
    }
}

impl std::fmt::Display for Discriminator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discriminator::Id(id) => write!(f, "id:{id}"),
            Discriminator::Reagent(reagent) => write!(f, "reagent:{reagent}"),
        }
    }
}

/// Merge identity of an edge: `(reactant, product, discriminator)`.
///
/// The discriminator is the caller-supplied identifier when one is given,
/// otherwise the reagent (or [`UNKNOWN_REAGENT`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionKey {
    pub reactant: String,
    pub product: String,
    pub discriminator: Discriminator,
}

impl ReactionKey {
    pub fn new(reactant: impl Into<String>, product: impl Into<String>, discriminator: Discriminator) -> Self {
        Self {
            reactant: reactant.into(),
            product: product.into(),
            discriminator,
        }
    }

    /// Derive the key for an insertion.
    pub fn derive(reactant: &str, product: &str, props: &PropertyMap, explicit: Option<&str>) -> Self {
        let discriminator = match explicit {
            Some(id) => Discriminator::Id(id.to_owned()),
            None => Discriminator::Reagent(reagent_of(props)),
        };
        Self::new(reactant, product, discriminator)
    }
}

impl std::fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})-[{}]->({})", self.reactant, self.discriminator, self.product)
    }
}

/// Reagent text of a property bag: a string verbatim, anything else
/// (absent, null, number, list) → [`UNKNOWN_REAGENT`].
pub(crate) fn reagent_of(props: &PropertyMap) -> String {
    match props.get("reagent") {
        Some(Value::String(s)) => s.clone(),
        _ => UNKNOWN_REAGENT.to_owned(),
    }
}

/// A reaction: reactant → product, with conditions as properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionEdge {
    pub id: ReactionId,
    pub key: ReactionKey,
    pub properties: PropertyMap,
}

impl ReactionEdge {
    pub fn new(id: ReactionId, key: ReactionKey) -> Self {
        Self {
            id,
            key,
            properties: PropertyMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn reactant(&self) -> &str {
        &self.key.reactant
    }

    pub fn product(&self) -> &str {
        &self.key.product
    }

    pub fn is_self_loop(&self) -> bool {
        self.key.reactant == self.key.product
    }

    /// The reagent as reported in path records.
    pub fn reagent(&self) -> String {
        reagent_of(&self.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::props;

    #[test]
    fn test_key_uses_reagent_or_unknown() {
        let k = ReactionKey::derive("A", "B", &props([("reagent", "R1")]), None);
        assert_eq!(k.discriminator, Discriminator::Reagent("R1".into()));

        let k = ReactionKey::derive("A", "B", &props([("temperature", 25)]), None);
        assert_eq!(k.discriminator, Discriminator::Reagent(UNKNOWN_REAGENT.into()));

        let k = ReactionKey::derive("A", "B", &props([("reagent", "R1")]), Some("rxn-7"));
        assert_eq!(k.discriminator, Discriminator::Id("rxn-7".into()));
    }

    #[test]
    fn test_id_and_reagent_keys_differ() {
        let by_id = ReactionKey::derive("A", "B", &props([("reagent", "NaBH4")]), Some("R1"));
        let by_reagent = ReactionKey::derive("A", "B", &props([("reagent", "R1")]), None);
        assert_ne!(by_id, by_reagent);
        assert_eq!(by_id.discriminator.to_string(), "id:R1");
        assert_eq!(by_reagent.discriminator.to_string(), "reagent:R1");
        assert_eq!(by_reagent.discriminator.value(), "R1");
    }

    #[test]
    fn test_non_string_reagent_is_unknown() {
        let mut bag = PropertyMap::new();
        bag.insert("reagent".into(), Value::Int(5));
        assert_eq!(reagent_of(&bag), UNKNOWN_REAGENT);

        bag.insert("reagent".into(), Value::List(vec!["H2".into(), "Pd".into()]));
        assert_eq!(reagent_of(&bag), UNKNOWN_REAGENT);

        bag.insert("reagent".into(), Value::Null);
        assert_eq!(reagent_of(&bag), UNKNOWN_REAGENT);
    }

    #[test]
    fn test_self_loop() {
        let edge = ReactionEdge::new(ReactionId(1), ReactionKey::new("A", "A", Discriminator::Reagent("catalyst".into())));
        assert!(edge.is_self_loop());
        assert_eq!(edge.reagent(), UNKNOWN_REAGENT);
    }
}
