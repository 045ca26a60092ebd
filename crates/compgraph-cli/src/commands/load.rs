//! Bulk CSV load command.

use anyhow::{Context, Result};
use clap::Args;
use compgraph_graph::{initialize_schema, load_all};
use std::path::PathBuf;

use super::Neo4jArgs;
use crate::output;

#[derive(Args)]
pub struct LoadArgs {
    /// Directory holding the node and relationship CSV files
    #[arg(long, env = "COMPGRAPH_DATA_DIR", default_value = "src/csvData")]
    pub data_dir: PathBuf,

    /// Create uniqueness constraints before loading
    #[arg(long)]
    pub init_schema: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: LoadArgs, neo4j: &Neo4jArgs) -> Result<()> {
    let client = neo4j.connect().await?;

    if args.init_schema {
        initialize_schema(&client).await.context("Failed to initialize schema")?;
    }

    let spinner = output::spinner(&format!("Loading {}", args.data_dir.display()));
    let result = load_all(&client, &args.data_dir).await;
    spinner.finish_and_clear();
    let report = result.with_context(|| format!("Failed to load {}", args.data_dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_load_report(&report);
    }
    Ok(())
}
