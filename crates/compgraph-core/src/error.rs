//! Centralized error types for compgraph.

use thiserror::Error;

/// Main error type for graph gateway operations.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid label '{0}': expected Component, Category, Provider, User or Review")]
    InvalidLabel(String),

    #[error("Invalid relationship type '{0}'")]
    InvalidRelationshipType(String),

    #[error("Invalid identifier '{0}': only letters, digits and underscores are allowed")]
    InvalidIdentifier(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Graph store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for graph gateway operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Whether the error was caused by the request rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLabel(_)
                | Self::InvalidRelationshipType(_)
                | Self::InvalidIdentifier(_)
                | Self::Validation(_)
        )
    }
}
