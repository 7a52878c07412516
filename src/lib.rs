//! # chempath — Chemical Reaction Pathway Finder
//!
//! Compounds are nodes, named reactions are directed, labeled edges in a
//! multigraph, and "how do I get from A to B" is answered by enumerating
//! bounded-length reaction walks.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `StorageBackend` is the contract between the query service and storage
//! 2. **Clean DTOs**: `Compound`, `ReactionEdge`, `PathRecord`, `Value` cross all boundaries
//! 3. **Search owns nothing**: `PathFinder` borrows a read-only graph snapshot
//! 4. **Validation at the edge**: `Graph` applies `QueryLimits`; the core accepts any positive depth
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chempath::{Graph, props};
//!
//! # async fn example() -> chempath::Result<()> {
//! let graph = Graph::open_memory().await?;
//!
//! graph.upsert_compound("CH3CH2OH", props([("name", "Ethanol")])).await?;
//! graph.upsert_compound("CH3CHO", props([("name", "Acetaldehyde")])).await?;
//! graph.add_reaction("CH3CH2OH", "CH3CHO", props([("reagent", "K2Cr2O7/H+")])).await?;
//!
//! for path in graph.find_paths("CH3CH2OH", "CH3CHO", None).await? {
//!     println!("{} step(s) via {:?}", path.total_steps, path.reagents);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod storage;
pub mod config;
pub mod seed;
pub mod export;
#[cfg(feature = "server")]
pub mod server;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Compound, Discriminator, ReactionEdge, ReactionId, ReactionKey, PathRecord, Value, PropertyMap,
    PropertyMapExt, property_map_from_json, props,
};

// ============================================================================
// Re-exports: Graph core + storage
// ============================================================================

pub use graph::{CancelToken, CompoundStore, PathFinder, ReactionGraph};
pub use storage::{MemoryBackend, StorageBackend};
pub use config::QueryLimits;

// ============================================================================
// Top-level Graph handle
// ============================================================================

/// The query service. A `Graph` wraps a storage backend, validates every
/// request against its [`QueryLimits`], and delegates.
pub struct Graph<B: StorageBackend> {
    backend: B,
    limits: QueryLimits,
}

/// Liveness report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Health {
    pub compounds: u64,
    pub reactions: u64,
}

impl<B: StorageBackend> Graph<B> {
    /// Create a Graph with the given backend and default limits.
    pub fn with_backend(backend: B) -> Self {
        Self { backend, limits: QueryLimits::default() }
    }

    /// Replace the query limits.
    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    /// Access the underlying backend (for advanced use).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ========================================================================
    // Compounds
    // ========================================================================

    /// Insert a compound, or overlay `props` onto an existing one.
    pub async fn upsert_compound(&self, formula: &str, props: PropertyMap) -> Result<Compound> {
        let formula = require_identifier("formula", formula)?;
        self.backend.upsert_compound(formula, props).await
    }

    /// Exact lookup; `NotFound` when absent.
    pub async fn get_compound(&self, formula: &str) -> Result<Compound> {
        self.backend
            .get_compound(formula)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Compound '{formula}'")))
    }

    /// Substring search on formula and (case-insensitive) name.
    /// An empty needle lists every compound.
    pub async fn search_compounds(&self, needle: &str) -> Result<Vec<Compound>> {
        self.backend.search_compounds(needle).await
    }

    /// Autocomplete. `limit` defaults from the limits and is clamped to the cap.
    pub async fn suggest_compounds(&self, prefix: &str, limit: Option<usize>) -> Result<Vec<Compound>> {
        let prefix = require_identifier("prefix", prefix)?;
        let limit = limit.unwrap_or(self.limits.default_suggest_limit);
        if limit == 0 {
            return Err(Error::InvalidArgument("limit must be positive".into()));
        }
        let limit = limit.min(self.limits.suggest_limit_cap);
        self.backend.suggest_compounds(prefix, limit).await
    }

    // ========================================================================
    // Reactions
    // ========================================================================

    /// Add a reaction, identified by `(reactant, product, reagent)`.
    pub async fn add_reaction(&self, reactant: &str, product: &str, props: PropertyMap) -> Result<ReactionEdge> {
        self.insert_reaction(reactant, product, None, props).await
    }

    /// Add a reaction, identified by `(reactant, product, id)`.
    pub async fn add_reaction_with_id(
        &self,
        id: &str,
        reactant: &str,
        product: &str,
        props: PropertyMap,
    ) -> Result<ReactionEdge> {
        let id = require_identifier("reaction id", id)?;
        self.insert_reaction(reactant, product, Some(id), props).await
    }

    async fn insert_reaction(
        &self,
        reactant: &str,
        product: &str,
        id: Option<&str>,
        props: PropertyMap,
    ) -> Result<ReactionEdge> {
        let reactant = require_identifier("reactant", reactant)?;
        let product = require_identifier("product", product)?;
        self.backend.add_reaction(reactant, product, id, props).await
    }

    /// Outgoing reactions of a compound; `NotFound` when the compound is unknown.
    pub async fn outgoing(&self, formula: &str) -> Result<Vec<ReactionEdge>> {
        self.get_compound(formula).await?;
        self.backend.outgoing(formula).await
    }

    // ========================================================================
    // Paths
    // ========================================================================

    /// Enumerate walks from `start` to `end`, shortest first.
    ///
    /// `max_depth` defaults from the limits and must lie in `1..=max_depth_cap`.
    /// The search is aborted with `Timeout` once the configured timeout elapses.
    pub async fn find_paths(&self, start: &str, end: &str, max_depth: Option<usize>) -> Result<Vec<PathRecord>> {
        let cancel = match self.limits.path_timeout {
            Some(timeout) => CancelToken::with_timeout(timeout),
            None => CancelToken::new(),
        };
        self.find_paths_with(start, end, max_depth, &cancel).await
    }

    /// [`find_paths`](Self::find_paths) with a caller-owned cancel token
    /// (the configured timeout is not applied).
    pub async fn find_paths_with(
        &self,
        start: &str,
        end: &str,
        max_depth: Option<usize>,
        cancel: &CancelToken,
    ) -> Result<Vec<PathRecord>> {
        let max_depth = self.check_depth(max_depth)?;
        match self.backend.find_paths(start, end, max_depth, cancel).await {
            Err(e @ (Error::Cancelled | Error::Timeout { .. })) => {
                tracing::warn!(start, end, max_depth, error = %e, "path search aborted");
                Err(e)
            }
            other => other,
        }
    }

    fn check_depth(&self, max_depth: Option<usize>) -> Result<usize> {
        let depth = max_depth.unwrap_or(self.limits.default_max_depth);
        if depth == 0 || depth > self.limits.max_depth_cap {
            return Err(Error::InvalidArgument(format!(
                "max_depth must be between 1 and {}, got {depth}",
                self.limits.max_depth_cap
            )));
        }
        Ok(depth)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Liveness probe with graph size.
    pub async fn health(&self) -> Result<Health> {
        self.backend.ping().await?;
        Ok(Health {
            compounds: self.backend.compound_count().await?,
            reactions: self.backend.reaction_count().await?,
        })
    }

    /// Explicit teardown; later calls fail with `StoreUnavailable`.
    pub async fn shutdown(&self) -> Result<()> {
        self.backend.shutdown().await
    }
}

/// In-memory graph for serving and embedding.
impl Graph<MemoryBackend> {
    pub async fn open_memory() -> Result<Self> {
        Ok(Self::with_backend(MemoryBackend::new()))
    }
}

fn require_identifier<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(value)
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown compound: {0}")]
    UnknownCompound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Path search cancelled")]
    Cancelled,

    #[error("Path search timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
