//! # Reaction Graph
//!
//! The in-memory multigraph: compounds as nodes, reactions as directed,
//! labeled edges. Parallel edges and self-loops are allowed.
//!
//! ```text
//! CompoundStore   formula → Compound
//! adjacency       formula → [ReactionEdge, ...]   (insertion order)
//! edge_index      ReactionKey → position in the reactant's list
//! ```
//!
//! Everything here is synchronous and single-threaded. Sharing across
//! threads is the job of `storage::MemoryBackend`.

pub mod compounds;
pub mod finder;
pub mod cancel;

use hashbrown::HashMap;

use crate::model::*;
use crate::{Error, Result};

pub use cancel::CancelToken;
pub use compounds::CompoundStore;
pub use finder::PathFinder;

/// Compounds plus the outgoing adjacency of every reactant.
#[derive(Debug, Clone, Default)]
pub struct ReactionGraph {
    compounds: CompoundStore,
    adjacency: HashMap<String, Vec<ReactionEdge>>,
    edge_index: HashMap<ReactionKey, usize>,
    next_reaction_id: u64,
}

impl ReactionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Compounds
    // ========================================================================

    pub fn compounds(&self) -> &CompoundStore {
        &self.compounds
    }

    pub fn upsert_compound(&mut self, formula: &str, props: PropertyMap) -> Result<Compound> {
        self.compounds.upsert(formula, props).cloned()
    }

    pub fn compound(&self, formula: &str) -> Option<&Compound> {
        self.compounds.get(formula)
    }

    // ========================================================================
    // Reactions
    // ========================================================================

    /// Insert-or-merge a reaction edge.
    ///
    /// Both endpoints must exist. The edge identity is `(reactant, product,
    /// explicit id or reagent)`; an existing edge with that identity has its
    /// properties overlaid, otherwise a new parallel edge is appended.
    pub fn add_reaction(
        &mut self,
        reactant: &str,
        product: &str,
        explicit_id: Option<&str>,
        props: PropertyMap,
    ) -> Result<ReactionEdge> {
        for formula in [reactant, product] {
            if !self.compounds.contains(formula) {
                return Err(Error::UnknownCompound(formula.to_owned()));
            }
        }
        if explicit_id.is_some_and(|id| id.trim().is_empty()) {
            return Err(Error::InvalidArgument("reaction id must not be empty".into()));
        }

        let key = ReactionKey::derive(reactant, product, &props, explicit_id);
        let edges = self.adjacency.entry(reactant.to_owned()).or_default();

        if let Some(&pos) = self.edge_index.get(&key) {
            let edge = &mut edges[pos];
            edge.properties.overlay(props);
            tracing::debug!(key = %key, id = %edge.id, "merged reaction");
            return Ok(edge.clone());
        }

        self.next_reaction_id += 1;
        let mut edge = ReactionEdge::new(ReactionId(self.next_reaction_id), key.clone());
        edge.properties = props;
        edges.push(edge.clone());
        self.edge_index.insert(key, edges.len() - 1);
        tracing::debug!(key = %edge.key, id = %edge.id, "created reaction");
        Ok(edge)
    }

    /// Outgoing edges of a compound; empty when it has none or is unknown.
    pub fn outgoing(&self, formula: &str) -> &[ReactionEdge] {
        self.adjacency.get(formula).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look an edge up by its identity.
    pub fn reaction(&self, key: &ReactionKey) -> Option<&ReactionEdge> {
        let pos = *self.edge_index.get(key)?;
        self.adjacency.get(&key.reactant)?.get(pos)
    }

    /// Every edge, grouped by reactant in formula order.
    pub fn reactions(&self) -> impl Iterator<Item = &ReactionEdge> {
        self.compounds.iter().flat_map(move |c| self.outgoing(&c.formula).iter())
    }

    pub fn compound_count(&self) -> usize {
        self.compounds.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.edge_index.len()
    }

    // ========================================================================
    // Paths
    // ========================================================================

    /// Enumerate walks from `start` to `end`; see [`PathFinder`].
    pub fn find_paths(
        &self,
        start: &str,
        end: &str,
        max_depth: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<PathRecord>> {
        PathFinder::new(self).find(start, end, max_depth, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(formulas: &[&str]) -> ReactionGraph {
        let mut g = ReactionGraph::new();
        for f in formulas {
            g.upsert_compound(f, PropertyMap::new()).unwrap();
        }
        g
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let mut g = graph_with(&["A"]);
        let err = g.add_reaction("A", "B", None, PropertyMap::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownCompound(ref f) if f == "B"));
        let err = g.add_reaction("Z", "A", None, PropertyMap::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownCompound(ref f) if f == "Z"));
        assert_eq!(g.reaction_count(), 0);
    }

    #[test]
    fn test_parallel_edges_by_reagent() {
        let mut g = graph_with(&["X", "Y"]);
        let a = g.add_reaction("X", "Y", None, props([("reagent", "R1")])).unwrap();
        let b = g.add_reaction("X", "Y", None, props([("reagent", "R2")])).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(g.outgoing("X").len(), 2);
        assert_eq!(g.outgoing("X")[0].reagent(), "R1");
        assert_eq!(g.outgoing("X")[1].reagent(), "R2");
    }

    #[test]
    fn test_same_reagent_collapses() {
        let mut g = graph_with(&["X", "Y"]);
        let a = g.add_reaction("X", "Y", None, props([("reagent", "R1"), ("temp", "a")])).unwrap();
        let b = g.add_reaction("X", "Y", None, props([("reagent", "R1"), ("temp", "b")])).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(g.reaction_count(), 1);
        assert_eq!(g.outgoing("X")[0].properties.get_str("temp"), Some("b"));
    }

    #[test]
    fn test_explicit_id_identity() {
        let mut g = graph_with(&["X", "Y"]);
        g.add_reaction("X", "Y", Some("first"), props([("reagent", "R1")])).unwrap();
        g.add_reaction("X", "Y", Some("second"), props([("reagent", "R1")])).unwrap();
        assert_eq!(g.reaction_count(), 2);

        let merged = g.add_reaction("X", "Y", Some("first"), props([("yield", "75%")])).unwrap();
        assert_eq!(merged.reagent(), "R1");
        assert_eq!(merged.properties.get_str("yield"), Some("75%"));
        assert_eq!(g.reaction_count(), 2);

        let key = ReactionKey::new("X", "Y", Discriminator::Id("second".into()));
        assert!(g.reaction(&key).is_some());
    }

    #[test]
    fn test_explicit_id_never_merges_with_reagent() {
        let mut g = graph_with(&["X", "Y"]);
        let by_id = g.add_reaction("X", "Y", Some("R1"), props([("reagent", "NaBH4")])).unwrap();
        let by_reagent = g.add_reaction("X", "Y", None, props([("reagent", "R1")])).unwrap();

        assert_ne!(by_id.id, by_reagent.id);
        assert_eq!(g.reaction_count(), 2);
        let reagents: Vec<String> = g.outgoing("X").iter().map(ReactionEdge::reagent).collect();
        assert_eq!(reagents, vec!["NaBH4", "R1"]);

        // Same the other way round.
        let mut g = graph_with(&["X", "Y"]);
        g.add_reaction("X", "Y", None, props([("reagent", "R1")])).unwrap();
        g.add_reaction("X", "Y", Some("R1"), props([("reagent", "NaBH4")])).unwrap();
        assert_eq!(g.reaction_count(), 2);
        assert_eq!(g.outgoing("X")[0].reagent(), "R1");
    }

    #[test]
    fn test_non_string_reagents_share_unknown_identity() {
        let mut g = graph_with(&["X", "Y"]);
        let a = g.add_reaction("X", "Y", None, props([("reagent", 5)])).unwrap();
        let b = g
            .add_reaction("X", "Y", None, props([("reagent", vec!["H2".to_owned(), "Pd".to_owned()])]))
            .unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(g.reaction_count(), 1);
        assert_eq!(g.outgoing("X")[0].reagent(), UNKNOWN_REAGENT);

        let paths = g.find_paths("X", "Y", 1, &CancelToken::new()).unwrap();
        assert_eq!(paths[0].reagents, vec![UNKNOWN_REAGENT]);
    }

    #[test]
    fn test_self_loop_allowed() {
        let mut g = graph_with(&["A"]);
        let edge = g.add_reaction("A", "A", None, props([("reagent", "catalyst")])).unwrap();
        assert!(edge.is_self_loop());
        assert_eq!(g.outgoing("A").len(), 1);
    }

    #[test]
    fn test_outgoing_unknown_is_empty() {
        let g = graph_with(&["A"]);
        assert!(g.outgoing("A").is_empty());
        assert!(g.outgoing("nope").is_empty());
    }

    #[test]
    fn test_compound_overlay_does_not_touch_edges() {
        let mut g = graph_with(&["X", "Y"]);
        g.add_reaction("X", "Y", None, props([("reagent", "R1")])).unwrap();
        g.upsert_compound("X", props([("name", "ex")])).unwrap();
        assert_eq!(g.outgoing("X").len(), 1);
        assert_eq!(g.compound("X").unwrap().name(), Some("ex"));
        assert_eq!(g.reactions().count(), 1);
    }
}
