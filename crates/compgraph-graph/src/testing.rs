//! Scripted in-memory `GraphStore` for tests.
//!
//! Replays queued responses in order and records every executed statement,
//! so tests can assert both on the outcome and on the Cypher that was sent.
//! Once the queue is drained every further statement yields no records.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use compgraph_core::{GraphError, GraphResult, Record, Statement};

use crate::store::GraphStore;

#[derive(Default)]
pub struct ScriptedStore {
    responses: Mutex<VecDeque<GraphResult<Vec<Record>>>>,
    executed: Mutex<Vec<Statement>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue records for the next statement.
    pub fn respond(self, records: Vec<Record>) -> Self {
        self.push(Ok(records));
        self
    }

    /// Queue an empty result for the next statement.
    pub fn respond_empty(self) -> Self {
        self.respond(Vec::new())
    }

    /// Queue a store failure for the next statement.
    pub fn fail(self, message: &str) -> Self {
        self.push(Err(GraphError::store(message)));
        self
    }

    fn push(&self, response: GraphResult<Vec<Record>>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Statements executed so far, oldest first.
    pub fn statements(&self) -> Vec<Statement> {
        self.executed.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last_statement(&self) -> Option<Statement> {
        self.statements().pop()
    }
}

#[async_trait]
impl GraphStore for ScriptedStore {
    async fn run(&self, statement: Statement) -> GraphResult<Vec<Record>> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(statement);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// A record shaped like the node-returning statements' output.
pub fn entity_record(labels: &[&str], properties: serde_json::Value) -> Record {
    Record::new()
        .with("labels", serde_json::json!(labels))
        .with("properties", properties)
}

/// A record shaped like the relationship-returning statements' output.
pub fn relationship_record(rel_type: &str, from: &str, to: &str, properties: serde_json::Value) -> Record {
    Record::new()
        .with("type", rel_type)
        .with("from_value", from)
        .with("to_value", to)
        .with("properties", properties)
}

/// A single-column count record.
pub fn count_record(column: &str, count: i64) -> Record {
    Record::new().with(column, count)
}
