//! Route handlers.

pub mod nodes;
pub mod relationships;

use axum::Json;
use compgraph_core::{GraphResult, Label};
use serde::Serialize;
use serde_json::{json, Value};

/// Parse an optional `label` query parameter; empty counts as absent.
fn optional_label(label: Option<&str>) -> GraphResult<Option<Label>> {
    label.filter(|l| !l.is_empty()).map(str::parse).transpose()
}

/// Reply for delete endpoints, single and batch.
#[derive(Serialize)]
pub struct Deleted {
    pub message: String,
    pub deleted_count: u64,
}

impl Deleted {
    fn nodes(count: u64) -> Self {
        Self {
            message: format!("{} node(s) deleted successfully", count),
            deleted_count: count,
        }
    }

    fn relationships(count: u64) -> Self {
        Self {
            message: format!("{} relationship(s) deleted successfully", count),
            deleted_count: count,
        }
    }
}

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Welcome to the compgraph API" }))
}
