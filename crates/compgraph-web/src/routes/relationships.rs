//! Relationship route handlers.

use axum::{
    extract::State,
    Json,
};
use compgraph_core::{GraphResult, Properties, Relationship, RelationshipKey, RelationshipPattern};
use compgraph_graph::queries::relationships;
use serde::{Deserialize, Serialize};

use super::Deleted;
use crate::error::ApiResult;
use crate::extract::{JsonBody, QueryParams};
use crate::state::AppState;

fn parse_pattern(from_label: &str, relationship_type: &str, to_label: &str) -> GraphResult<RelationshipPattern> {
    Ok(RelationshipPattern::new(
        from_label.parse()?,
        relationship_type.parse()?,
        to_label.parse()?,
    ))
}

#[derive(Deserialize)]
pub struct RelationshipQuery {
    pub from_label: String,
    pub to_label: String,
    pub relationship_type: String,
    pub from_value: String,
    pub to_value: String,
}

#[derive(Deserialize)]
pub struct CreateRelationshipRequest {
    pub from_label: String,
    pub from_value: String,
    pub to_label: String,
    pub to_value: String,
    pub relation_type: String,
    pub properties: Properties,
}

/// Addresses one relationship in patch and delete bodies.
#[derive(Deserialize)]
pub struct SingleRelationship {
    pub from_label: String,
    pub to_label: String,
    pub relationship_type: String,
    pub from_identifier: String,
    pub to_identifier: String,
}

impl SingleRelationship {
    fn key(&self) -> GraphResult<RelationshipKey> {
        let pattern = parse_pattern(&self.from_label, &self.relationship_type, &self.to_label)?;
        Ok(RelationshipKey::new(
            pattern,
            self.from_identifier.clone(),
            self.to_identifier.clone(),
        ))
    }
}

/// Addresses many relationships of one pattern by `[from, to]` pairs.
#[derive(Deserialize)]
pub struct RelationshipPairs {
    pub from_label: String,
    pub to_label: String,
    pub relationship_type: String,
    pub pairs: Vec<(String, String)>,
}

impl RelationshipPairs {
    fn pattern(&self) -> GraphResult<RelationshipPattern> {
        parse_pattern(&self.from_label, &self.relationship_type, &self.to_label)
    }
}

#[derive(Deserialize)]
pub struct PatchRelationshipRequest {
    #[serde(flatten)]
    pub target: SingleRelationship,
    pub properties: Properties,
}

#[derive(Deserialize)]
pub struct PatchRelationshipsRequest {
    #[serde(flatten)]
    pub targets: RelationshipPairs,
    pub properties: Properties,
}

#[derive(Deserialize)]
pub struct RemoveRelationshipPropertiesRequest {
    #[serde(flatten)]
    pub target: SingleRelationship,
    pub properties: Vec<String>,
}

#[derive(Deserialize)]
pub struct RemoveRelationshipsPropertiesRequest {
    #[serde(flatten)]
    pub targets: RelationshipPairs,
    pub properties: Vec<String>,
}

#[derive(Serialize)]
pub struct RelationshipProperties {
    pub properties: Properties,
}

#[derive(Serialize)]
pub struct RelationshipCreated {
    pub message: &'static str,
    pub relationship: Relationship,
}

#[derive(Serialize)]
pub struct RelationshipUpdated {
    pub message: &'static str,
    pub updated_relationship: Relationship,
}

#[derive(Serialize)]
pub struct RelationshipsUpdated {
    pub message: String,
    pub relationships_updated: u64,
}

impl RelationshipsUpdated {
    fn new(count: u64) -> Self {
        Self {
            message: format!("{} relationship(s) updated successfully", count),
            relationships_updated: count,
        }
    }
}

pub async fn get_relationship_properties(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RelationshipQuery>,
) -> ApiResult<RelationshipProperties> {
    let pattern = parse_pattern(&query.from_label, &query.relationship_type, &query.to_label)?;
    let key = RelationshipKey::new(pattern, query.from_value, query.to_value);
    let properties = relationships::get_relationship_properties(state.store(), &key).await?;
    Ok(Json(RelationshipProperties { properties }))
}

pub async fn create_relationship(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateRelationshipRequest>,
) -> ApiResult<RelationshipCreated> {
    let pattern = parse_pattern(&req.from_label, &req.relation_type, &req.to_label)?;
    let key = RelationshipKey::new(pattern, req.from_value, req.to_value);
    let relationship = relationships::create_relationship(state.store(), &key, &req.properties).await?;
    Ok(Json(RelationshipCreated {
        message: "Relationship created successfully",
        relationship,
    }))
}

async fn merge_single(
    state: &AppState,
    req: PatchRelationshipRequest,
    message: &'static str,
) -> ApiResult<RelationshipUpdated> {
    let key = req.target.key()?;
    let updated_relationship = relationships::merge_relationship_properties(state.store(), &key, &req.properties).await?;
    Ok(Json(RelationshipUpdated {
        message,
        updated_relationship,
    }))
}

async fn merge_many(state: &AppState, req: PatchRelationshipsRequest) -> ApiResult<RelationshipsUpdated> {
    let pattern = req.targets.pattern()?;
    let updated =
        relationships::merge_many_relationship_properties(state.store(), &pattern, &req.targets.pairs, &req.properties)
            .await?;
    Ok(Json(RelationshipsUpdated::new(updated)))
}

pub async fn add_properties_to_relationship(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PatchRelationshipRequest>,
) -> ApiResult<RelationshipUpdated> {
    merge_single(&state, req, "Properties added successfully").await
}

pub async fn add_properties_to_multiple_relationships(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PatchRelationshipsRequest>,
) -> ApiResult<RelationshipsUpdated> {
    merge_many(&state, req).await
}

pub async fn update_properties_in_relationship(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PatchRelationshipRequest>,
) -> ApiResult<RelationshipUpdated> {
    merge_single(&state, req, "Properties updated successfully").await
}

pub async fn update_properties_in_multiple_relationships(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PatchRelationshipsRequest>,
) -> ApiResult<RelationshipsUpdated> {
    merge_many(&state, req).await
}

pub async fn remove_properties_from_relationship(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RemoveRelationshipPropertiesRequest>,
) -> ApiResult<RelationshipUpdated> {
    let key = req.target.key()?;
    let updated_relationship =
        relationships::remove_relationship_properties(state.store(), &key, &req.properties).await?;
    Ok(Json(RelationshipUpdated {
        message: "Properties removed successfully",
        updated_relationship,
    }))
}

pub async fn remove_properties_from_multiple_relationships(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RemoveRelationshipsPropertiesRequest>,
) -> ApiResult<RelationshipsUpdated> {
    let pattern = req.targets.pattern()?;
    let updated = relationships::remove_many_relationship_properties(
        state.store(),
        &pattern,
        &req.targets.pairs,
        &req.properties,
    )
    .await?;
    Ok(Json(RelationshipsUpdated::new(updated)))
}

pub async fn delete_relationship(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SingleRelationship>,
) -> ApiResult<Deleted> {
    let deleted = relationships::delete_relationship(state.store(), &req.key()?).await?;
    Ok(Json(Deleted::relationships(deleted)))
}

pub async fn delete_relationships(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RelationshipPairs>,
) -> ApiResult<Deleted> {
    let deleted = relationships::delete_relationships(state.store(), &req.pattern()?, &req.pairs).await?;
    Ok(Json(Deleted::relationships(deleted)))
}
