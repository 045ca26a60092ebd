//! Bulk loader: idempotent upsert of nodes and relationships from CSV.
//!
//! Rows are sent in chunks of [`CHUNK_SIZE`], one auto-commit `UNWIND`
//! statement per chunk. A failure midway leaves earlier chunks applied.
//! Re-running with the same input only overwrites properties.

pub mod csv_source;

use std::fmt;
use std::path::Path;

use compgraph_core::cypher::load::{self as cypher, RelationshipRow};
use compgraph_core::schema::{NODE_SOURCES, RELATIONSHIP_SOURCES};
use compgraph_core::{GraphResult, Label, Properties, RelationshipType};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::store::{run_count, GraphStore};

pub const CHUNK_SIZE: usize = 500;

/// Result of loading one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Rows applied to the store. Relationship rows whose endpoints are
    /// missing are not counted.
    Loaded(u64),
    SourceNotFound,
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Loaded(count) => write!(f, "{}", count),
            LoadOutcome::SourceNotFound => write!(f, "source not found"),
        }
    }
}

/// One line of the load report.
#[derive(Debug, Clone, Serialize)]
pub struct LoadEntry {
    /// Label or relationship type name.
    pub name: &'static str,
    pub file: &'static str,
    pub outcome: LoadOutcome,
}

/// Per-type outcomes in load order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub nodes: Vec<LoadEntry>,
    pub relationships: Vec<LoadEntry>,
}

impl LoadReport {
    pub fn nodes_loaded(&self) -> u64 {
        sum_loaded(&self.nodes)
    }

    pub fn relationships_loaded(&self) -> u64 {
        sum_loaded(&self.relationships)
    }

    pub fn missing_sources(&self) -> usize {
        self.nodes
            .iter()
            .chain(&self.relationships)
            .filter(|entry| entry.outcome == LoadOutcome::SourceNotFound)
            .count()
    }
}

fn sum_loaded(entries: &[LoadEntry]) -> u64 {
    entries
        .iter()
        .map(|entry| match entry.outcome {
            LoadOutcome::Loaded(count) => count,
            LoadOutcome::SourceNotFound => 0,
        })
        .sum()
}

/// Upsert node rows of one label; returns how many were applied.
pub async fn upsert_nodes(store: &dyn GraphStore, label: Label, rows: &[Properties]) -> GraphResult<u64> {
    let mut applied = 0;
    for chunk in rows.chunks(CHUNK_SIZE) {
        applied += run_count(store, cypher::upsert_nodes(label, chunk), "applied").await?;
        debug!(%label, chunk = chunk.len(), applied, "Upserted node chunk");
    }
    Ok(applied)
}

/// Upsert relationship rows of one type; rows with a missing endpoint are skipped.
pub async fn upsert_relationships(
    store: &dyn GraphStore,
    relationship_type: RelationshipType,
    rows: &[RelationshipRow],
) -> GraphResult<u64> {
    let mut applied = 0;
    for chunk in rows.chunks(CHUNK_SIZE) {
        applied += run_count(store, cypher::upsert_relationships(relationship_type, chunk), "applied").await?;
        debug!(relationship = %relationship_type, chunk = chunk.len(), applied, "Upserted relationship chunk");
    }
    Ok(applied)
}

pub async fn load_nodes_from_csv(store: &dyn GraphStore, label: Label, path: &Path) -> GraphResult<LoadOutcome> {
    if !path.is_file() {
        warn!(%label, file = %path.display(), "Node source not found");
        return Ok(LoadOutcome::SourceNotFound);
    }

    let rows = csv_source::read_node_rows(path, label)?;
    let applied = upsert_nodes(store, label, &rows).await?;
    info!(%label, rows = rows.len(), applied, "Loaded nodes");
    Ok(LoadOutcome::Loaded(applied))
}

pub async fn load_relationships_from_csv(
    store: &dyn GraphStore,
    relationship_type: RelationshipType,
    path: &Path,
) -> GraphResult<LoadOutcome> {
    if !path.is_file() {
        warn!(relationship = %relationship_type, file = %path.display(), "Relationship source not found");
        return Ok(LoadOutcome::SourceNotFound);
    }

    let rows = csv_source::read_relationship_rows(path)?;
    let applied = upsert_relationships(store, relationship_type, &rows).await?;
    if applied < rows.len() as u64 {
        warn!(
            relationship = %relationship_type,
            skipped = rows.len() as u64 - applied,
            "Skipped relationship rows with missing endpoints"
        );
    }
    info!(relationship = %relationship_type, rows = rows.len(), applied, "Loaded relationships");
    Ok(LoadOutcome::Loaded(applied))
}

/// Load every known input file under `dir`: all node files first, then
/// all relationship files. Missing files are reported, not fatal.
pub async fn load_all(store: &dyn GraphStore, dir: &Path) -> GraphResult<LoadReport> {
    info!(dir = %dir.display(), "Loading graph data");
    let mut report = LoadReport::default();

    for source in NODE_SOURCES {
        let outcome = load_nodes_from_csv(store, source.label, &dir.join(source.file)).await?;
        report.nodes.push(LoadEntry {
            name: source.label.as_str(),
            file: source.file,
            outcome,
        });
    }

    for source in RELATIONSHIP_SOURCES {
        let outcome = load_relationships_from_csv(store, source.relationship_type, &dir.join(source.file)).await?;
        report.relationships.push(LoadEntry {
            name: source.relationship_type.as_str(),
            file: source.file,
            outcome,
        });
    }

    info!(
        nodes = report.nodes_loaded(),
        relationships = report.relationships_loaded(),
        missing = report.missing_sources(),
        "Load complete"
    );
    Ok(report)
}
