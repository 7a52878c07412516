//! # Storage Backend Trait
//!
//! This is THE contract between the query service and whatever holds the
//! reaction graph. Every operation the service needs is defined here.
//!
//! ## Implementations
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryBackend` | `memory` | In-process snapshot-isolated graph |
//!
//! Argument validation (caps, defaults) happens one layer up in
//! [`crate::Graph`]; backends only enforce graph invariants.

pub mod memory;

use async_trait::async_trait;
use crate::graph::CancelToken;
use crate::model::*;
use crate::Result;

pub use memory::MemoryBackend;

// ============================================================================
// StorageBackend Trait
// ============================================================================

/// The storage contract.
///
/// A backend that can no longer serve requests (shut down, connection lost)
/// returns `Error::StoreUnavailable`; callers decide whether to retry.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Shut down the backend. Every later call fails with `StoreUnavailable`.
    async fn shutdown(&self) -> Result<()>;

    /// Liveness probe.
    async fn ping(&self) -> Result<()>;

    // ========================================================================
    // Compounds
    // ========================================================================

    /// Insert-or-merge a compound; returns the stored result.
    async fn upsert_compound(&self, formula: &str, props: PropertyMap) -> Result<Compound>;

    /// Exact lookup. `None` if absent.
    async fn get_compound(&self, formula: &str) -> Result<Option<Compound>>;

    /// Every compound, in formula order.
    async fn all_compounds(&self) -> Result<Vec<Compound>>;

    /// Formula substring or case-insensitive name substring.
    async fn search_compounds(&self, needle: &str) -> Result<Vec<Compound>>;

    /// Formula prefix or case-insensitive name prefix, at most `limit` results.
    async fn suggest_compounds(&self, prefix: &str, limit: usize) -> Result<Vec<Compound>>;

    // ========================================================================
    // Reactions
    // ========================================================================

    /// Insert-or-merge a reaction edge.
    /// Fails with `UnknownCompound` if either endpoint is absent.
    async fn add_reaction(
        &self,
        reactant: &str,
        product: &str,
        explicit_id: Option<&str>,
        props: PropertyMap,
    ) -> Result<ReactionEdge>;

    /// Outgoing edges of a compound, in insertion order.
    async fn outgoing(&self, formula: &str) -> Result<Vec<ReactionEdge>>;

    /// Every reaction edge.
    ///
    /// Default: walks all compounds and collects their outgoing edges.
    async fn all_reactions(&self) -> Result<Vec<ReactionEdge>> {
        let mut result = Vec::new();
        for compound in self.all_compounds().await? {
            result.extend(self.outgoing(&compound.formula).await?);
        }
        Ok(result)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    async fn compound_count(&self) -> Result<u64>;

    async fn reaction_count(&self) -> Result<u64>;

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Enumerate walks from `start` to `end`, ascending by step count.
    async fn find_paths(
        &self,
        start: &str,
        end: &str,
        max_depth: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<PathRecord>>;
}
