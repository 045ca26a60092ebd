//! Sample dataset generation command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use compgraph_seed::{generate, SeedConfig};
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// Output directory
    #[arg(long, env = "COMPGRAPH_DATA_DIR", default_value = "src/csvData")]
    pub out: PathBuf,

    /// RNG seed for a reproducible dataset
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "100")]
    pub components: usize,

    #[arg(long, default_value = "100")]
    pub providers: usize,

    #[arg(long, default_value = "100")]
    pub users: usize,

    #[arg(long, default_value = "100")]
    pub reviews: usize,

    /// Rows drawn per relationship file before duplicates are dropped
    #[arg(long, default_value = "100")]
    pub relationship_rows: usize,
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let config = SeedConfig {
        components: args.components,
        providers: args.providers,
        users: args.users,
        reviews: args.reviews,
        relationship_rows: args.relationship_rows,
        seed: args.seed,
    };

    let dataset = generate(&config);
    let written = dataset
        .write_to(&args.out)
        .with_context(|| format!("Failed to write dataset to {}", args.out.display()))?;

    println!("{}", "Generated dataset".bold());
    println!("{}", "─".repeat(40));
    for table in dataset.nodes.iter().chain(&dataset.relationships) {
        println!("  {:<28} {}", table.file, table.len().to_string().cyan());
    }
    println!("{}", "─".repeat(40));
    println!(
        "{} Wrote {} files to {}",
        "✓".green().bold(),
        written.len(),
        args.out.display()
    );
    Ok(())
}
