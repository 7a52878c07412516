//! PathRecord — one reaction walk from a start compound to a target.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use super::{Compound, PropertyMap, ReactionId, UNKNOWN_REAGENT};

/// A walk in the reaction graph: compound -[reaction]-> compound -> ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    /// Compounds along the walk. Always has one more element than `reactions`.
    pub compounds: Vec<Compound>,
    /// Property bags of the traversed edges, in order.
    pub reactions: Vec<PropertyMap>,
    /// Identifiers of the traversed edges; tells parallel edges apart.
    pub reaction_ids: Vec<ReactionId>,
    /// Reagent per traversed edge.
    pub reagents: Vec<String>,
    /// Number of edges traversed.
    pub total_steps: usize,
}

impl PathRecord {
    pub fn len(&self) -> usize {
        self.total_steps
    }

    pub fn is_empty(&self) -> bool {
        self.total_steps == 0
    }

    pub fn start(&self) -> Option<&Compound> {
        self.compounds.first()
    }

    pub fn end(&self) -> Option<&Compound> {
        self.compounds.last()
    }

    /// Formulas visited, in order.
    pub fn formulas(&self) -> Vec<&str> {
        self.compounds.iter().map(|c| c.formula.as_str()).collect()
    }

    /// Human-readable numbered steps:
    ///
    /// ```text
    /// 1. CH3CH2OH -> CH3CHO
    ///    Reagent: K2Cr2O7/H+
    ///    Temperature: heat
    /// ```
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (i, pair) in self.compounds.windows(2).enumerate() {
            let _ = writeln!(out, "{}. {} -> {}", i + 1, pair[0].formula, pair[1].formula);
            let reagent = self.reagents.get(i).map_or(UNKNOWN_REAGENT, String::as_str);
            let _ = writeln!(out, "   Reagent: {reagent}");
            let Some(conditions) = self.reactions.get(i) else {
                continue;
            };
            let mut keys: Vec<&String> = conditions.keys().filter(|k| *k != "reagent").collect();
            keys.sort();
            for key in keys {
                let value = &conditions[key];
                let rendered = value.as_str().map_or_else(|| value.to_string(), str::to_owned);
                let _ = writeln!(out, "   {}: {}", title_case(key), rendered);
            }
        }
        out
    }
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
