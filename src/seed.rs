//! Bulk loading of reaction datasets.
//!
//! A dataset is a JSON array of reaction sets:
//!
//! ```text
//! [{ "name": "alcohols_oxidation",
//!    "compounds": [{ "formula": "CH3OH", "name": "Methanol", ... }],
//!    "reactions": [{ "reactant": "CH3OH", "product": "CH2O",
//!                    "conditions": { "reagent": "K2Cr2O7/H+", ... } }] }]
//! ```
//!
//! Compounds are upserted first, then reactions are merged in; loading the
//! same dataset twice leaves the graph unchanged.

use std::path::Path;

use serde::Deserialize;

use crate::model::property_map_from_json;
use crate::storage::StorageBackend;
use crate::{Error, Graph, Result};

const BUILTIN_DATASET: &str = include_str!("../data/reactions.json");

/// A named group of compounds and the reactions between them.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionSet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub compounds: Vec<SeedCompound>,
    #[serde(default)]
    pub reactions: Vec<SeedReaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCompound {
    pub formula: String,
    #[serde(flatten)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedReaction {
    pub reactant: String,
    pub product: String,
    /// Explicit edge identity; absent means the reagent identifies the edge.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub conditions: serde_json::Map<String, serde_json::Value>,
}

/// What an ingest run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Compound upserts applied.
    pub compounds: usize,
    /// Reaction upserts applied.
    pub reactions: usize,
    /// Reactions dropped because an endpoint was unknown.
    pub skipped: usize,
}

/// The dataset shipped with the crate.
pub fn builtin() -> Result<Vec<ReactionSet>> {
    parse(BUILTIN_DATASET)
}

/// Read a dataset file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<ReactionSet>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse(&text)
}

/// Parse dataset JSON.
pub fn parse(text: &str) -> Result<Vec<ReactionSet>> {
    Ok(serde_json::from_str(text)?)
}

/// Load every set into `graph`: all compounds of a set, then its reactions.
///
/// A reaction naming an unknown compound is skipped with a warning; any other
/// failure aborts the run.
pub async fn ingest<B: StorageBackend>(graph: &Graph<B>, sets: &[ReactionSet]) -> Result<IngestStats> {
    let mut stats = IngestStats::default();

    for set in sets {
        for compound in &set.compounds {
            let props = property_map_from_json(compound.properties.clone())?;
            graph.upsert_compound(&compound.formula, props).await?;
            stats.compounds += 1;
        }

        for reaction in &set.reactions {
            let props = property_map_from_json(reaction.conditions.clone())?;
            let added = match reaction.id.as_deref() {
                Some(id) => graph.add_reaction_with_id(id, &reaction.reactant, &reaction.product, props).await,
                None => graph.add_reaction(&reaction.reactant, &reaction.product, props).await,
            };
            match added {
                Ok(_) => stats.reactions += 1,
                Err(Error::UnknownCompound(formula)) => {
                    tracing::warn!(
                        set = %set.name,
                        reactant = %reaction.reactant,
                        product = %reaction.product,
                        missing = %formula,
                        "skipping reaction with unknown compound"
                    );
                    stats.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    tracing::info!(
        sets = sets.len(),
        compounds = stats.compounds,
        reactions = stats.reactions,
        skipped = stats.skipped,
        "dataset ingested"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_parses() {
        let sets = builtin().unwrap();
        assert_eq!(sets.len(), 10);
        assert_eq!(sets[0].name, "alcohols_oxidation");
        let methanol = &sets[0].compounds[0];
        assert_eq!(methanol.formula, "CH3OH");
        assert_eq!(methanol.properties["name"], "Methanol");
        // formula is a field, not a property
        assert!(!methanol.properties.contains_key("formula"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(parse("{not json"), Err(Error::Serialization(_))));
        assert!(matches!(parse(r#"[{"compounds": [{"name": "x"}]}]"#), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file("/nonexistent/chempath/dataset.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_ingest_builtin() {
        let graph = Graph::open_memory().await.unwrap();
        let stats = ingest(&graph, &builtin().unwrap()).await.unwrap();
        assert_eq!(stats, IngestStats { compounds: 33, reactions: 19, skipped: 1 });

        let health = graph.health().await.unwrap();
        assert_eq!(health.compounds, 28);
        assert_eq!(health.reactions, 17);
    }

    #[tokio::test]
    async fn test_ingest_is_idempotent() {
        let graph = Graph::open_memory().await.unwrap();
        let sets = builtin().unwrap();
        ingest(&graph, &sets).await.unwrap();
        ingest(&graph, &sets).await.unwrap();

        let health = graph.health().await.unwrap();
        assert_eq!(health.compounds, 28);
        assert_eq!(health.reactions, 17);
    }

    #[tokio::test]
    async fn test_ingest_explicit_ids_and_nested_rejection() {
        let graph = Graph::open_memory().await.unwrap();
        let sets = parse(
            r#"[{"name": "t",
                 "compounds": [{"formula": "A"}, {"formula": "B"}],
                 "reactions": [
                   {"reactant": "A", "product": "B", "id": "rx-1", "conditions": {"reagent": "R"}},
                   {"reactant": "A", "product": "B", "id": "rx-2", "conditions": {"reagent": "R"}}
                 ]}]"#,
        )
        .unwrap();
        ingest(&graph, &sets).await.unwrap();
        assert_eq!(graph.outgoing("A").await.unwrap().len(), 2);

        let bad = parse(r#"[{"compounds": [{"formula": "C", "meta": {"nested": 1}}]}]"#).unwrap();
        assert!(matches!(ingest(&graph, &bad).await, Err(Error::InvalidArgument(_))));
    }
}
