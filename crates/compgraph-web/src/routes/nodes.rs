//! Node route handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use compgraph_core::schema::NODE_LIST_LIMIT;
use compgraph_core::{Entity, GraphError, GraphResult, Label, NodeAggregates, NodeFilter, NodeKey, Properties};
use compgraph_graph::queries::{aggregates, nodes};
use serde::{Deserialize, Serialize};

use super::{optional_label, Deleted};
use crate::error::ApiResult;
use crate::extract::{JsonBody, QueryParams};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListNodesQuery {
    pub label: Option<String>,
    pub prop: Option<String>,
    pub value: Option<String>,
}

#[derive(Deserialize)]
pub struct LabelQuery {
    pub label: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateNodeQuery {
    pub label: String,
}

#[derive(Deserialize)]
pub struct CreateNodeRequest {
    pub label: String,
    pub properties: Properties,
}

#[derive(Deserialize)]
pub struct PatchNodeRequest {
    pub label: String,
    pub identifier_key: Option<String>,
    pub identifier_value: String,
    pub properties: Properties,
}

#[derive(Deserialize)]
pub struct PatchNodesRequest {
    pub label: String,
    pub identifier_key: Option<String>,
    pub identifier_values: Vec<String>,
    pub properties: Properties,
}

#[derive(Deserialize)]
pub struct RemoveNodePropertiesRequest {
    pub label: String,
    pub identifier_key: Option<String>,
    pub identifier_value: String,
    pub properties: Vec<String>,
}

#[derive(Deserialize)]
pub struct RemoveNodesPropertiesRequest {
    pub label: String,
    pub identifier_key: Option<String>,
    pub identifier_values: Vec<String>,
    pub properties: Vec<String>,
}

#[derive(Deserialize)]
pub struct DeleteNodeRequest {
    pub label: String,
    pub identifier_value: String,
}

#[derive(Deserialize)]
pub struct DeleteNodesRequest {
    pub label: String,
    pub identifier_values: Vec<String>,
}

#[derive(Serialize)]
pub struct NodeCreated {
    pub message: &'static str,
    pub node: Entity,
}

#[derive(Serialize)]
pub struct NodeUpdated {
    pub message: &'static str,
    pub updated_node: Entity,
}

#[derive(Serialize)]
pub struct NodesUpdated {
    pub message: &'static str,
    pub nodes_updated: u64,
}

/// A patch request may name the natural key; it must be the label's.
fn resolve_key(label: &str, identifier_key: Option<&str>) -> GraphResult<Label> {
    let label: Label = label.parse()?;
    match identifier_key {
        Some(key) if key != label.identifier_key() => Err(GraphError::validation(format!(
            "{} nodes are identified by '{}', not '{}'",
            label,
            label.identifier_key(),
            key
        ))),
        _ => Ok(label),
    }
}

pub async fn list_nodes(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListNodesQuery>,
) -> ApiResult<Vec<Entity>> {
    let filter = NodeFilter {
        label: optional_label(query.label.as_deref())?,
        property: match (query.prop, query.value) {
            (Some(prop), Some(value)) if !prop.is_empty() && !value.is_empty() => Some((prop, value)),
            _ => None,
        },
    };
    Ok(Json(nodes::list_nodes(state.store(), &filter).await?))
}

/// `GET /nodes/batch?label=User&values=User%201&values=User%202`
pub async fn get_nodes_batch(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<Vec<(String, String)>>,
) -> ApiResult<Vec<Entity>> {
    let mut label = None;
    let mut prop = None;
    let mut values = Vec::new();
    for (key, value) in params {
        match key.as_str() {
            "label" => label = Some(value),
            "prop" => prop = Some(value),
            "values" => values.push(value),
            _ => {}
        }
    }

    let label = label.ok_or_else(|| GraphError::validation("Query parameter 'label' is required"))?;
    let label = resolve_key(&label, prop.as_deref())?;
    if values.len() > NODE_LIST_LIMIT {
        return Err(GraphError::validation(format!("At most {} values per request", NODE_LIST_LIMIT)).into());
    }

    Ok(Json(nodes::get_nodes_by_keys(state.store(), label, &values).await?))
}

pub async fn get_node_aggregates(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LabelQuery>,
) -> ApiResult<NodeAggregates> {
    let label = optional_label(query.label.as_deref())?;
    Ok(Json(aggregates::get_node_aggregates(state.store(), label).await?))
}

pub async fn get_node(
    State(state): State<AppState>,
    Path(name): Path<String>,
    QueryParams(query): QueryParams<LabelQuery>,
) -> ApiResult<Entity> {
    let label = optional_label(query.label.as_deref())?;
    Ok(Json(nodes::get_node(state.store(), label, &name).await?))
}

pub async fn create_node(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CreateNodeQuery>,
) -> ApiResult<NodeCreated> {
    let node = nodes::create_node(state.store(), query.label.parse()?).await?;
    Ok(Json(NodeCreated {
        message: "Node created successfully",
        node,
    }))
}

pub async fn create_node_with_properties(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateNodeRequest>,
) -> ApiResult<NodeCreated> {
    let node = nodes::create_node_with_properties(state.store(), req.label.parse()?, &req.properties).await?;
    Ok(Json(NodeCreated {
        message: "Node with properties created successfully",
        node,
    }))
}

async fn merge_single(state: &AppState, req: PatchNodeRequest, message: &'static str) -> ApiResult<NodeUpdated> {
    let label = resolve_key(&req.label, req.identifier_key.as_deref())?;
    let key = NodeKey::new(label, req.identifier_value);
    let updated_node = nodes::merge_node_properties(state.store(), &key, &req.properties).await?;
    Ok(Json(NodeUpdated { message, updated_node }))
}

async fn merge_many(state: &AppState, req: PatchNodesRequest, message: &'static str) -> ApiResult<NodesUpdated> {
    let label = resolve_key(&req.label, req.identifier_key.as_deref())?;
    let nodes_updated =
        nodes::merge_many_node_properties(state.store(), label, &req.identifier_values, &req.properties).await?;
    Ok(Json(NodesUpdated { message, nodes_updated }))
}

pub async fn add_properties(State(state): State<AppState>, JsonBody(req): JsonBody<PatchNodeRequest>) -> ApiResult<NodeUpdated> {
    merge_single(&state, req, "Properties added successfully").await
}

pub async fn add_properties_multiple(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PatchNodesRequest>,
) -> ApiResult<NodesUpdated> {
    merge_many(&state, req, "Properties added successfully").await
}

pub async fn update_properties(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PatchNodeRequest>,
) -> ApiResult<NodeUpdated> {
    merge_single(&state, req, "Properties updated successfully").await
}

pub async fn update_properties_multiple(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PatchNodesRequest>,
) -> ApiResult<NodesUpdated> {
    merge_many(&state, req, "Properties updated successfully").await
}

pub async fn remove_properties(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RemoveNodePropertiesRequest>,
) -> ApiResult<NodeUpdated> {
    let label = resolve_key(&req.label, req.identifier_key.as_deref())?;
    let key = NodeKey::new(label, req.identifier_value);
    let updated_node = nodes::remove_node_properties(state.store(), &key, &req.properties).await?;
    Ok(Json(NodeUpdated {
        message: "Properties removed successfully",
        updated_node,
    }))
}

pub async fn remove_properties_multiple(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RemoveNodesPropertiesRequest>,
) -> ApiResult<NodesUpdated> {
    let label = resolve_key(&req.label, req.identifier_key.as_deref())?;
    let nodes_updated =
        nodes::remove_many_node_properties(state.store(), label, &req.identifier_values, &req.properties).await?;
    Ok(Json(NodesUpdated {
        message: "Properties removed successfully",
        nodes_updated,
    }))
}

pub async fn delete_node(State(state): State<AppState>, JsonBody(req): JsonBody<DeleteNodeRequest>) -> ApiResult<Deleted> {
    let key = NodeKey::new(req.label.parse()?, req.identifier_value);
    let deleted = nodes::delete_node(state.store(), &key).await?;
    Ok(Json(Deleted::nodes(deleted)))
}

pub async fn delete_nodes(State(state): State<AppState>, JsonBody(req): JsonBody<DeleteNodesRequest>) -> ApiResult<Deleted> {
    let deleted = nodes::delete_nodes(state.store(), req.label.parse()?, &req.identifier_values).await?;
    Ok(Json(Deleted::nodes(deleted)))
}
