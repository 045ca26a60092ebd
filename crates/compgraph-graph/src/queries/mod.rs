//! CRUD operations over nodes and relationships.
//!
//! Every operation validates its input, builds one statement through
//! `compgraph_core::cypher`, runs it and maps the records. Single-item
//! operations turn an empty match into `GraphError::NotFound`; batch
//! operations report an affected count instead, zero included.

pub mod aggregates;
pub mod nodes;
pub mod relationships;

use compgraph_core::{Entity, GraphResult, Record, Relationship, Statement};
use serde::Serialize;

use crate::store::{run_count, GraphStore};

fn entity_from(record: &Record) -> GraphResult<Entity> {
    Ok(Entity {
        labels: record.get("labels")?,
        properties: record.get("properties")?,
    })
}

fn relationship_from(record: &Record) -> GraphResult<Relationship> {
    Ok(Relationship {
        relationship_type: record.get("type")?,
        from_value: record.get("from_value")?,
        to_value: record.get("to_value")?,
        properties: record.get("properties")?,
    })
}

/// Node and relationship counts for status display.
#[derive(Debug, Clone, Serialize)]
pub struct GraphCounts {
    pub nodes: u64,
    pub relationships: u64,
}

/// Get node and relationship counts across the whole graph.
pub async fn get_counts(store: &dyn GraphStore) -> GraphResult<GraphCounts> {
    let nodes = run_count(store, compgraph_core::cypher::aggregates::count_nodes(None), "total").await?;
    let relationships = run_count(
        store,
        compgraph_core::cypher::relationships::count_relationships(),
        "total",
    )
    .await?;
    Ok(GraphCounts { nodes, relationships })
}

/// Run a statement and decode every record as an entity.
async fn run_entities(store: &dyn GraphStore, statement: Statement) -> GraphResult<Vec<Entity>> {
    store.run(statement).await?.iter().map(entity_from).collect()
}
