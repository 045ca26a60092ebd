//! Node counts and per-label numeric statistics.

use compgraph_core::cypher::aggregates as cypher;
use compgraph_core::{GraphError, GraphResult, Label, NodeAggregates, Properties};
use tracing::debug;

use crate::store::{run_count, run_single, GraphStore};

/// Without a label, count every node. With one, add mean, median and mode
/// for each numeric property found on a sample node of that label.
///
/// Each mode comes from its own scan; ties go to whichever value the store
/// yields first and are not stable across runs.
pub async fn get_node_aggregates(store: &dyn GraphStore, label: Option<Label>) -> GraphResult<NodeAggregates> {
    let Some(label) = label else {
        let total = run_count(store, cypher::count_nodes(None), "total").await?;
        return Ok(NodeAggregates::total(total as i64));
    };

    let sample: Properties = match run_single(store, cypher::sample_node(label)).await? {
        Some(record) => record.get("properties")?,
        None => return Err(GraphError::not_found(format!("No nodes found for label '{}'", label))),
    };

    let numeric: Vec<String> = sample
        .iter()
        .filter(|(_, value)| value.is_numeric())
        .map(|(name, _)| name.clone())
        .collect();
    if numeric.is_empty() {
        return Ok(NodeAggregates::no_numeric_properties());
    }
    debug!(%label, properties = ?numeric, "Aggregating numeric properties");

    let summary = run_single(store, cypher::numeric_summary(label, &numeric))
        .await?
        .ok_or_else(|| GraphError::not_found(format!("No nodes found for label '{}'", label)))?;

    let total: i64 = summary.get("total")?;
    let mut aggregates = NodeAggregates::total(total);
    for property in &numeric {
        for prefix in ["avg", "median"] {
            let column = format!("{}_{}", prefix, property);
            let value = summary.raw(&column).cloned().unwrap_or(serde_json::Value::Null);
            aggregates.metrics.insert(column, value);
        }

        let mode = run_single(store, cypher::property_mode(label, property))
            .await?
            .and_then(|record| record.raw("value").cloned())
            .unwrap_or(serde_json::Value::Null);
        aggregates.metrics.insert(format!("mode_{}", property), mode);
    }

    Ok(aggregates)
}
