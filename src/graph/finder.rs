//! PathFinder — bounded walk enumeration over the reaction multigraph.
//!
//! ## Semantics
//!
//! - Enumerates **walks**: compounds may repeat (A → B → A is legal), so the
//!   only bound on the search is `max_depth`.
//! - Every parallel edge forks the search, so two reagents for X → Y yield
//!   two records.
//! - A record is emitted each time the walk arrives at `end` having taken at
//!   least one edge; arriving does not stop the walk from continuing.
//! - Unknown `start` or `end` is "no paths", not an error.
//! - Results are ordered by step count; equal lengths keep discovery order.
//!
//! ## Algorithm
//!
//! Iterative DFS with an explicit frame stack and a parallel edge buffer, so
//! recursion depth never depends on `max_depth`. Before the search, a reverse
//! BFS from `end` computes the fewest steps from each compound to `end`; an
//! edge is only followed if its product can still reach `end` within the
//! remaining depth. Pruned subtrees contain no matches, so the output and
//! its order are identical to the unpruned search.

use std::collections::VecDeque;

use hashbrown::HashMap;
use smallvec::{SmallVec, smallvec};

use super::{CancelToken, ReactionGraph};
use crate::model::{Compound, PathRecord, ReactionEdge};
use crate::{Error, Result};

/// Edge extensions between two polls of the cancel token.
const CANCEL_POLL_INTERVAL: u64 = 256;

/// Read-only walk search over a borrowed graph.
pub struct PathFinder<'g> {
    graph: &'g ReactionGraph,
}

/// One level of the DFS: the compound reached and the next outgoing edge to try.
struct Frame<'g> {
    formula: &'g str,
    next_edge: usize,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g ReactionGraph) -> Self {
        Self { graph }
    }

    /// All walks from `start` to `end` of 1..=`max_depth` edges.
    ///
    /// Fails only for `max_depth == 0` (`InvalidArgument`) or when `cancel`
    /// fires (`Cancelled` / `Timeout`).
    pub fn find(
        &self,
        start: &str,
        end: &str,
        max_depth: usize,
        cancel: &CancelToken,
    ) -> Result<Vec<PathRecord>> {
        if max_depth == 0 {
            return Err(Error::InvalidArgument("max_depth must be positive".into()));
        }
        cancel.check()?;

        let (Some(origin), Some(target)) = (self.graph.compound(start), self.graph.compound(end)) else {
            tracing::debug!(start, end, "path search over unknown compound");
            return Ok(Vec::new());
        };

        let distance = self.distances_to(target.formula.as_str(), max_depth);
        if !distance.contains_key(start) {
            return Ok(Vec::new());
        }

        let mut frames: SmallVec<[Frame<'g>; 16]> = smallvec![Frame {
            formula: origin.formula.as_str(),
            next_edge: 0,
        }];
        let mut walk: SmallVec<[&'g ReactionEdge; 16]> = SmallVec::new();
        let mut results = Vec::new();
        let mut expanded: u64 = 0;

        while let Some(frame) = frames.last_mut() {
            let outgoing = self.graph.outgoing(frame.formula);
            if walk.len() >= max_depth || frame.next_edge >= outgoing.len() {
                frames.pop();
                walk.pop();
                continue;
            }

            let edge = &outgoing[frame.next_edge];
            frame.next_edge += 1;

            let remaining = max_depth - walk.len() - 1;
            match distance.get(edge.product()) {
                Some(&d) if d <= remaining => {}
                _ => continue,
            }

            expanded += 1;
            if expanded % CANCEL_POLL_INTERVAL == 0 {
                cancel.check()?;
            }

            walk.push(edge);
            if edge.product() == end {
                results.push(self.record(origin, &walk));
            }
            frames.push(Frame {
                formula: edge.product(),
                next_edge: 0,
            });
        }

        // Stable: equal lengths stay in discovery order.
        results.sort_by_key(|r: &PathRecord| r.total_steps);

        tracing::debug!(start, end, max_depth, expanded, found = results.len(), "path search complete");
        Ok(results)
    }

    /// Fewest edges from each compound to `end`, for compounds within `limit`.
    fn distances_to(&self, end: &'g str, limit: usize) -> HashMap<&'g str, usize> {
        let mut incoming: HashMap<&'g str, Vec<&'g str>> = HashMap::new();
        for edge in self.graph.reactions() {
            incoming.entry(edge.product()).or_default().push(edge.reactant());
        }

        let mut distance = HashMap::new();
        distance.insert(end, 0);
        let mut queue = VecDeque::from([end]);
        while let Some(node) = queue.pop_front() {
            let d = distance[node];
            if d >= limit {
                continue;
            }
            for &pred in incoming.get(node).map(Vec::as_slice).unwrap_or(&[]) {
                if !distance.contains_key(pred) {
                    distance.insert(pred, d + 1);
                    queue.push_back(pred);
                }
            }
        }
        distance
    }

    fn record(&self, origin: &Compound, walk: &[&ReactionEdge]) -> PathRecord {
        let mut compounds = Vec::with_capacity(walk.len() + 1);
        compounds.push(origin.clone());
        for edge in walk {
            let product = self
                .graph
                .compound(edge.product())
                .cloned()
                .unwrap_or_else(|| Compound::new(edge.product()));
            compounds.push(product);
        }

        PathRecord {
            compounds,
            reactions: walk.iter().map(|e| e.properties.clone()).collect(),
            reaction_ids: walk.iter().map(|e| e.id).collect(),
            reagents: walk.iter().map(|e| e.reagent()).collect(),
            total_steps: walk.len(),
        }
    }
}
