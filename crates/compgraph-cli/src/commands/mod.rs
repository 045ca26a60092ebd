//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use compgraph_graph::{GraphClient, GraphConfig};

pub mod generate;
pub mod graph;
pub mod load;
pub mod serve;

/// Component graph API, loader and sample data generator
#[derive(Parser)]
#[command(name = "compgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub neo4j: Neo4jArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Neo4j connection settings, read from the environment (or `.env`) by default.
#[derive(Args, Debug, Clone)]
pub struct Neo4jArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, global = true, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j user
    #[arg(long, global = true, env = "NEO4J_USERNAME", default_value = "neo4j")]
    pub neo4j_user: String,

    /// Neo4j password
    #[arg(long, global = true, env = "NEO4J_PASSWORD", default_value = "", hide_env_values = true)]
    pub neo4j_password: String,

    /// Database name
    #[arg(long, global = true, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub neo4j_database: String,
}

impl Neo4jArgs {
    pub fn config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.neo4j_uri.clone(),
            user: self.neo4j_user.clone(),
            password: self.neo4j_password.clone(),
            database: self.neo4j_database.clone(),
            ..GraphConfig::default()
        }
    }

    pub async fn connect(&self) -> Result<GraphClient> {
        GraphClient::connect(&self.config()).await
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(serve::ServeArgs),

    /// Bulk-load the CSV dataset into Neo4j
    Load(load::LoadArgs),

    /// Generate a sample CSV dataset
    Generate(generate::GenerateArgs),

    /// Create natural-key uniqueness constraints
    Schema,

    /// Show node and relationship counts
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args, &self.neo4j).await,
            Commands::Load(args) => load::execute(args, &self.neo4j).await,
            Commands::Generate(args) => generate::execute(args),
            Commands::Schema => graph::cmd_schema(&self.neo4j.connect().await?).await,
            Commands::Status => graph::cmd_status(&self.neo4j.connect().await?).await,
        }
    }
}
