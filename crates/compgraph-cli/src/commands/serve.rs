//! API server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use super::Neo4jArgs;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "API_PORT", default_value = "8000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "API_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, neo4j: &Neo4jArgs) -> Result<()> {
    let client = neo4j.connect().await?;

    println!();
    println!("  {} {}", "compgraph".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}       http://{}:{}", "API".green(), args.host, args.port);
    println!("  {}     {}", "Neo4j".green(), neo4j.neo4j_uri);
    if let Some(path) = &args.log_file {
        println!("  {}      {}", "Logs".green(), path.display());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    compgraph_web::run_server(Arc::new(client), &args.host, args.port).await
}
