//! In-memory storage backend.
//!
//! This is the reference implementation of `StorageBackend`.
//! The whole graph sits behind one `RwLock<Arc<ReactionGraph>>`.
//!
//! ## Concurrency
//!
//! - **Reads** take the lock just long enough to clone the `Arc`, then work
//!   on that snapshot with the lock released. A path search never blocks a
//!   writer, and always sees one consistent graph.
//! - **Writes** hold the write lock for the whole merge-or-create step, so
//!   they are serialized and each one is atomic. If readers still hold the
//!   previous snapshot, `Arc::make_mut` copies the graph first.
//! - **Path searches** run on tokio's blocking pool against their snapshot,
//!   so a long search never stalls the async workers serving other requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::graph::{CancelToken, ReactionGraph};
use crate::model::*;
use crate::{Error, Result};
use super::StorageBackend;

// ============================================================================
// MemoryBackend
// ============================================================================

/// In-memory reaction graph storage. Cheap to clone; clones share the graph.
#[derive(Clone)]
pub struct MemoryBackend {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    graph: RwLock<Arc<ReactionGraph>>,
    open: AtomicBool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::from_graph(ReactionGraph::new())
    }

    /// Wrap an already-built graph.
    pub fn from_graph(graph: ReactionGraph) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                graph: RwLock::new(Arc::new(graph)),
                open: AtomicBool::new(true),
            }),
        }
    }

    /// The current graph, as an immutable snapshot.
    pub fn snapshot(&self) -> Result<Arc<ReactionGraph>> {
        self.ensure_open()?;
        Ok(Arc::clone(&self.inner.graph.read()))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.inner.open.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(Error::StoreUnavailable("memory backend has been shut down".into()))
        }
    }

    /// Run one mutation under the write lock.
    fn write<T>(&self, op: impl FnOnce(&mut ReactionGraph) -> Result<T>) -> Result<T> {
        self.ensure_open()?;
        let mut guard = self.inner.graph.write();
        op(Arc::make_mut(&mut guard))
    }
}

// ============================================================================
// StorageBackend impl
// ============================================================================

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn shutdown(&self) -> Result<()> {
        if self.inner.open.swap(false, Ordering::AcqRel) {
            tracing::info!("memory backend shut down");
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_open()
    }

    // ========================================================================
    // Compounds
    // ========================================================================

    async fn upsert_compound(&self, formula: &str, props: PropertyMap) -> Result<Compound> {
        let compound = self.write(|g| g.upsert_compound(formula, props))?;
        tracing::debug!(formula, properties = compound.properties.len(), "upserted compound");
        Ok(compound)
    }

    async fn get_compound(&self, formula: &str) -> Result<Option<Compound>> {
        Ok(self.snapshot()?.compound(formula).cloned())
    }

    async fn all_compounds(&self) -> Result<Vec<Compound>> {
        Ok(self.snapshot()?.compounds().iter().cloned().collect())
    }

    async fn search_compounds(&self, needle: &str) -> Result<Vec<Compound>> {
        Ok(self.snapshot()?.compounds().search(needle))
    }

    async fn suggest_compounds(&self, prefix: &str, limit: usize) -> Result<Vec<Compound>> {
        Ok(self.snapshot()?.compounds().suggest(prefix, limit))
    }

    // ========================================================================
    // Reactions
    // ========================================================================

    async fn add_reaction(
        &self,
        reactant: &str,
        product: &str,
        explicit_id: Option<&str>,
        props: PropertyMap,
    ) -> Result<ReactionEdge> {
        self.write(|g| g.add_reaction(reactant, product, explicit_id, props))
    }

    async fn outgoing(&self, formula: &str) -> Result<Vec<ReactionEdge>> {
        Ok(self.snapshot()?.outgoing(formula).to_vec())
    }

    async fn all_reactions(&self) -> Result<Vec<ReactionEdge>> {
        Ok(self.snapshot()?.reactions().cloned().collect())
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    async fn compound_count(&self) -> Result<u64> {
        Ok(self.snapshot()?.compound_count() as u64)
    }

    async fn reaction_count(&self) -> Result<u64> {
        Ok(self.snapshot()?.reaction_count() as u64)
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    async fn find_paths(
        &self,
        start: &str,
        end: &str,
        max_depth: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<PathRecord>> {
        let snapshot = self.snapshot()?;
        let (start, end, cancel) = (start.to_owned(), end.to_owned(), cancel.clone());
        tokio::task::spawn_blocking(move || snapshot.find_paths(&start, &end, max_depth, &cancel))
            .await
            .map_err(|e| Error::Internal(format!("path search task failed: {e}")))?
    }
}

// ============================================================================
// Tests
// ============================================================================
