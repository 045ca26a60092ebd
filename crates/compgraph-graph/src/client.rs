//! Neo4j connection client.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use compgraph_core::{GraphError, GraphResult, Param, PropertyValue, Record, Statement};
use neo4rs::{
    BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltString, BoltType, ConfigBuilder, Graph, Query,
};
use serde::Deserialize;
use tracing::debug;

use crate::store::GraphStore;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> usize {
    16
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: default_database(),
            max_connections: default_max_connections(),
        }
    }
}

impl GraphConfig {
    /// Read `NEO4J_URI`, `NEO4J_USERNAME`, `NEO4J_PASSWORD` and `NEO4J_DATABASE`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: std::env::var("NEO4J_URI").unwrap_or(defaults.uri),
            user: std::env::var("NEO4J_USERNAME").unwrap_or(defaults.user),
            password: std::env::var("NEO4J_PASSWORD").unwrap_or(defaults.password),
            database: std::env::var("NEO4J_DATABASE").unwrap_or(defaults.database),
            max_connections: defaults.max_connections,
        }
    }
}

/// Client for Neo4j graph operations.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// `Graph::connect` only builds the pool, so a `RETURN 1` ping forces a
    /// real bolt handshake and surfaces an unreachable server immediately.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(200)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .context("Neo4j is not responding to queries")?;

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn run(&self, statement: Statement) -> GraphResult<Vec<Record>> {
        debug!(cypher = %statement.text(), params = statement.params().len(), "Running statement");

        let mut result = self
            .graph
            .execute(to_query(&statement))
            .await
            .map_err(|e| GraphError::store(format!("Neo4j query failed: {}", e)))?;

        let mut records = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| GraphError::store(format!("Failed to read Neo4j result: {}", e)))?
        {
            let mut record = Record::new();
            for column in statement.columns() {
                let value: serde_json::Value = row
                    .get(column)
                    .map_err(|e| GraphError::store(format!("Failed to get field '{}': {:?}", column, e)))?;
                record.insert(column, value);
            }
            records.push(record);
        }
        Ok(records)
    }
}

/// Translate a statement into a neo4rs query with bolt-typed parameters.
fn to_query(statement: &Statement) -> Query {
    statement
        .params()
        .iter()
        .fold(Query::new(statement.text().to_string()), |query, (key, value)| {
            query.param(key, to_bolt(value))
        })
}

fn to_bolt(param: &Param) -> BoltType {
    match param {
        Param::Value(value) => value_to_bolt(value),
        Param::List(items) => BoltType::List(BoltList {
            value: items.iter().map(to_bolt).collect(),
        }),
        Param::Map(entries) => BoltType::Map(BoltMap {
            value: entries
                .iter()
                .map(|(k, v)| (BoltString::from(k.as_str()), to_bolt(v)))
                .collect::<HashMap<_, _>>(),
        }),
    }
}

fn value_to_bolt(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        PropertyValue::Int(i) => BoltType::Integer(BoltInteger::new(*i)),
        PropertyValue::Float(f) => BoltType::Float(BoltFloat::new(*f)),
        PropertyValue::String(s) => BoltType::String(BoltString::from(s.as_str())),
        PropertyValue::List(items) => BoltType::List(BoltList {
            value: items.iter().map(value_to_bolt).collect(),
        }),
    }
}
