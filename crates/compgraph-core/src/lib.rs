//! compgraph core library
//!
//! Closed schema, property values, domain models and the Cypher statement
//! builder shared by the graph service, the HTTP layer and the loader.

pub mod cypher;
pub mod error;
pub mod model;
pub mod schema;
pub mod value;

pub use cypher::{Param, Record, Statement};
pub use error::{GraphError, GraphResult};
pub use model::{Entity, NodeAggregates, NodeFilter, NodeKey, Relationship, RelationshipKey, RelationshipPattern};
pub use schema::{identifier_key, Label, RelationshipType};
pub use value::{Properties, PropertyValue};
