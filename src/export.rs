//! Cypher DUMP export — serialize a reaction graph as Cypher statements.
//!
//! Produces a script that can be loaded into Neo4j or any Cypher-compatible
//! database:
//!
//! ```text
//! chempath Graph → export_cypher_dump() → CONSTRAINT + MERGE statements
//!   → cypher-shell < dump.cypher, or paste into Neo4j Browser
//! ```
//!
//! Compounds become `(:Compound {formula, ...})` nodes and reactions become
//! `[:REACTS_TO {key, ...}]` relationships, where `key` is the edge's
//! discriminator tagged by kind (`id:...` or `reagent:...`). Every
//! statement is a MERGE, so replaying a dump is idempotent.

use std::io::Write;

use crate::model::*;
use crate::storage::StorageBackend;
use crate::Result;

/// Export a graph as a Cypher DUMP script.
pub async fn export_cypher_dump<B: StorageBackend>(
    backend: &B,
    writer: &mut dyn Write,
) -> Result<()> {
    let compounds = backend.all_compounds().await?;
    let reactions = backend.all_reactions().await?;

    // Header
    writeln!(writer, "// chempath Cypher DUMP")?;
    writeln!(writer, "// Compounds: {}", compounds.len())?;
    writeln!(writer, "// Reactions: {}", reactions.len())?;
    writeln!(writer)?;
    writeln!(
        writer,
        "CREATE CONSTRAINT compound_formula IF NOT EXISTS FOR (c:Compound) REQUIRE c.formula IS UNIQUE;"
    )?;
    writeln!(writer)?;

    for compound in &compounds {
        writeln!(
            writer,
            "MERGE (c:Compound {{formula: {}}}){};",
            quote(&compound.formula),
            set_clause("c", &compound.properties),
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "// Reactions")?;

    for edge in &reactions {
        writeln!(
            writer,
            "MATCH (a:Compound {{formula: {}}}), (b:Compound {{formula: {}}}) MERGE (a)-[r:REACTS_TO {{key: {}}}]->(b){};",
            quote(edge.reactant()),
            quote(edge.product()),
            quote(&edge.key.discriminator.to_string()),
            set_clause("r", &edge.properties),
        )?;
    }

    tracing::debug!(compounds = compounds.len(), reactions = reactions.len(), "exported cypher dump");
    Ok(())
}

/// ` SET var += {k: v, ...}`, or nothing for an empty bag.
fn set_clause(var: &str, props: &PropertyMap) -> String {
    let formatted = format_properties(props);
    if formatted.is_empty() {
        String::new()
    } else {
        format!(" SET {var} += {{{formatted}}}")
    }
}

/// Format a PropertyMap as a Cypher property string, keys sorted.
fn format_properties(props: &PropertyMap) -> String {
    props
        .sorted_keys()
        .into_iter()
        .filter_map(|key| props.get(key).map(|value| (key, value)))
        .map(|(key, value)| format!("`{}`: {}", key.replace('`', "``"), format_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a Value as a Cypher literal.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Int(i) => i.to_string(),
        Value::Float(f) if f.is_finite() => format!("{f:?}"),
        Value::Float(_) | Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => {
            let inner: Vec<String> = items.iter().map(|s| quote(s)).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
