//! Schema and status commands.

use anyhow::Result;
use colored::Colorize;
use compgraph_graph::{get_counts, initialize_schema, GraphClient};

pub async fn cmd_schema(client: &GraphClient) -> Result<()> {
    initialize_schema(client).await?;
    println!(
        "{} {} uniqueness constraints in place",
        "✓".green().bold(),
        compgraph_graph::schema::constraint_statements().len()
    );
    Ok(())
}

pub async fn cmd_status(client: &GraphClient) -> Result<()> {
    println!("{}", "Component Graph Status".bold());
    println!("{}", "─".repeat(40));

    let counts = get_counts(client).await?;
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    println!("{}", "─".repeat(40));

    Ok(())
}
