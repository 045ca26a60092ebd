//! The query-execution seam between the CRUD layer and the graph database.

use async_trait::async_trait;
use compgraph_core::{GraphResult, Record, Statement};

/// Executes one parameterized statement in auto-commit mode.
///
/// Implementations must be safe to share across concurrent requests; each
/// call acquires and releases its own session.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn run(&self, statement: Statement) -> GraphResult<Vec<Record>>;
}

/// Run a statement expected to produce at most one record.
pub async fn run_single(store: &dyn GraphStore, statement: Statement) -> GraphResult<Option<Record>> {
    Ok(store.run(statement).await?.into_iter().next())
}

/// Run a statement whose single record carries an integer count in `column`.
///
/// An empty result counts as zero.
pub async fn run_count(store: &dyn GraphStore, statement: Statement, column: &str) -> GraphResult<u64> {
    match run_single(store, statement).await? {
        Some(record) => {
            let count: i64 = record.get(column)?;
            Ok(count.max(0) as u64)
        }
        None => Ok(0),
    }
}
