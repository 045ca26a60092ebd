//! Node CRUD operations.

use compgraph_core::cypher::nodes as cypher;
use compgraph_core::schema::MIN_NODE_PROPERTIES;
use compgraph_core::{Entity, GraphError, GraphResult, Label, NodeFilter, NodeKey, Properties};
use tracing::{debug, info};

use super::{entity_from, run_entities};
use crate::store::{run_count, run_single, GraphStore};

const NODE_NOT_FOUND: &str = "Node not found";

/// List up to 100 nodes, optionally filtered by label and one property.
pub async fn list_nodes(store: &dyn GraphStore, filter: &NodeFilter) -> GraphResult<Vec<Entity>> {
    let entities = run_entities(store, cypher::list_nodes(filter)?).await?;
    debug!(label = ?filter.label, count = entities.len(), "Listed nodes");
    Ok(entities)
}

/// Nodes of `label` whose natural key is in `values`. Missing keys are skipped.
pub async fn get_nodes_by_keys(store: &dyn GraphStore, label: Label, values: &[String]) -> GraphResult<Vec<Entity>> {
    run_entities(store, cypher::nodes_by_keys(label, values)).await
}

/// Exactly one node by natural key.
pub async fn get_node(store: &dyn GraphStore, label: Option<Label>, value: &str) -> GraphResult<Entity> {
    match run_single(store, cypher::node_by_key(label, value)).await? {
        Some(record) => entity_from(&record),
        None => Err(GraphError::not_found(NODE_NOT_FOUND)),
    }
}

/// Create a node carrying only a label.
pub async fn create_node(store: &dyn GraphStore, label: Label) -> GraphResult<Entity> {
    let record = run_single(store, cypher::create_node(label))
        .await?
        .ok_or_else(|| GraphError::store("Could not create the node"))?;
    info!(%label, "Created node");
    entity_from(&record)
}

/// Create a node with at least [`MIN_NODE_PROPERTIES`] properties.
pub async fn create_node_with_properties(
    store: &dyn GraphStore,
    label: Label,
    properties: &Properties,
) -> GraphResult<Entity> {
    if properties.len() < MIN_NODE_PROPERTIES {
        return Err(GraphError::validation(format!(
            "At least {} properties are required, got {}",
            MIN_NODE_PROPERTIES,
            properties.len()
        )));
    }

    let record = run_single(store, cypher::create_node_with_properties(label, properties))
        .await?
        .ok_or_else(|| GraphError::store("Could not create the node"))?;
    info!(%label, properties = properties.len(), "Created node with properties");
    entity_from(&record)
}

/// Union `properties` onto a node, overwriting existing keys.
///
/// Backs both the add and update endpoints; they differ only in wording.
pub async fn merge_node_properties(
    store: &dyn GraphStore,
    key: &NodeKey,
    properties: &Properties,
) -> GraphResult<Entity> {
    match run_single(store, cypher::merge_node_properties(key, properties)).await? {
        Some(record) => entity_from(&record),
        None => Err(GraphError::not_found(NODE_NOT_FOUND)),
    }
}

/// Batch form of [`merge_node_properties`]; returns how many nodes matched.
pub async fn merge_many_node_properties(
    store: &dyn GraphStore,
    label: Label,
    values: &[String],
    properties: &Properties,
) -> GraphResult<u64> {
    let updated = run_count(
        store,
        cypher::merge_many_node_properties(label, values, properties),
        "updated_count",
    )
    .await?;
    debug!(%label, requested = values.len(), updated, "Merged properties into nodes");
    Ok(updated)
}

pub async fn remove_node_properties(
    store: &dyn GraphStore,
    key: &NodeKey,
    properties: &[String],
) -> GraphResult<Entity> {
    match run_single(store, cypher::remove_node_properties(key, properties)?).await? {
        Some(record) => entity_from(&record),
        None => Err(GraphError::not_found(NODE_NOT_FOUND)),
    }
}

pub async fn remove_many_node_properties(
    store: &dyn GraphStore,
    label: Label,
    values: &[String],
    properties: &[String],
) -> GraphResult<u64> {
    run_count(
        store,
        cypher::remove_many_node_properties(label, values, properties)?,
        "updated_count",
    )
    .await
}

/// Detach-delete one node. Fails with `NotFound` when nothing matched.
pub async fn delete_node(store: &dyn GraphStore, key: &NodeKey) -> GraphResult<u64> {
    let deleted = run_count(store, cypher::delete_node(key), "deleted_count").await?;
    if deleted == 0 {
        return Err(GraphError::not_found(NODE_NOT_FOUND));
    }
    info!(label = %key.label, value = %key.value, "Deleted node");
    Ok(deleted)
}

/// Detach-delete every node of `label` whose key is in `values`.
pub async fn delete_nodes(store: &dyn GraphStore, label: Label, values: &[String]) -> GraphResult<u64> {
    let deleted = run_count(store, cypher::delete_nodes(label, values), "deleted_count").await?;
    info!(%label, requested = values.len(), deleted, "Deleted nodes");
    Ok(deleted)
}
