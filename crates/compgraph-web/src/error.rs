//! Error to HTTP response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use compgraph_core::GraphError;
use serde_json::json;

/// A `GraphError` on its way out of a handler.
///
/// Renders as `{"detail": "<message>"}` with the status callers branch on:
/// 400 for bad input, 404 for a single-item miss, 500 for store failures.
#[derive(Debug)]
pub struct ApiError(GraphError);

pub type ApiResult<T> = Result<Json<T>, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            GraphError::NotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
