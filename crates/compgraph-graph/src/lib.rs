//! # compgraph graph
//!
//! Neo4j integration for compgraph.
//!
//! Provides the statement-execution seam ([`GraphStore`]), the neo4rs
//! client, the CRUD service over nodes and relationships, and the bulk
//! CSV loader.

pub mod client;
pub mod load;
pub mod queries;
pub mod schema;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use client::{GraphClient, GraphConfig};
pub use load::{load_all, LoadEntry, LoadOutcome, LoadReport};
pub use queries::{get_counts, GraphCounts};
pub use schema::initialize_schema;
pub use store::GraphStore;
