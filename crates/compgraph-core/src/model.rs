//! Domain models returned by the CRUD layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{Label, RelationshipType};
use crate::value::Properties;

/// A graph node as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub labels: Vec<String>,
    pub properties: Properties,
}

/// A relationship as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub relationship_type: String,
    pub from_value: String,
    pub to_value: String,
    pub properties: Properties,
}

/// Addresses a single node by label and natural-key value.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeKey {
    pub label: Label,
    pub value: String,
}

impl NodeKey {
    pub fn new(label: Label, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }
}

/// Optional filters for node listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeFilter {
    pub label: Option<Label>,
    /// Single property equality, as (property name, raw literal).
    pub property: Option<(String, String)>,
}

/// A `(from)-[type]->(to)` shape, without endpoint values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationshipPattern {
    pub from_label: Label,
    pub to_label: Label,
    pub relationship_type: RelationshipType,
}

impl RelationshipPattern {
    pub fn new(from_label: Label, relationship_type: RelationshipType, to_label: Label) -> Self {
        Self { from_label, to_label, relationship_type }
    }
}

/// Addresses a single relationship by its endpoints' natural keys.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipKey {
    pub pattern: RelationshipPattern,
    pub from_value: String,
    pub to_value: String,
}

impl RelationshipKey {
    pub fn new(pattern: RelationshipPattern, from_value: impl Into<String>, to_value: impl Into<String>) -> Self {
        Self {
            pattern,
            from_value: from_value.into(),
            to_value: to_value.into(),
        }
    }
}

/// Node count plus per-property statistics.
///
/// Serializes flat: `{"total_nodes": 10, "avg_price": .., "median_price": .., "mode_price": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeAggregates {
    pub total_nodes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, serde_json::Value>,
}

impl NodeAggregates {
    pub fn total(total_nodes: i64) -> Self {
        Self { total_nodes, ..Default::default() }
    }

    /// Returned for a label whose sample node carries no numeric property.
    pub fn no_numeric_properties() -> Self {
        Self {
            total_nodes: 0,
            message: Some("No numeric properties found for this node label.".to_string()),
            metrics: BTreeMap::new(),
        }
    }
}
