//! Terminal output formatting.

use std::time::Duration;

use colored::Colorize;
use compgraph_graph::load::{LoadEntry, LoadOutcome};
use compgraph_graph::LoadReport;
use indicatif::{ProgressBar, ProgressStyle};

/// Start a steady-ticking spinner with a message.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_entries(title: &str, entries: &[LoadEntry]) {
    println!("{}", title.bold());
    for entry in entries {
        let outcome = match entry.outcome {
            LoadOutcome::Loaded(n) => n.to_string().cyan(),
            LoadOutcome::SourceNotFound => "source not found".yellow(),
        };
        println!("  {:<18} {:<28} {}", entry.name, entry.file.dimmed(), outcome);
    }
}

pub fn print_load_report(report: &LoadReport) {
    print_entries("Nodes", &report.nodes);
    println!();
    print_entries("Relationships", &report.relationships);
    println!("{}", "─".repeat(40));
    println!(
        "{} {} nodes, {} relationships",
        "✓".green().bold(),
        report.nodes_loaded(),
        report.relationships_loaded()
    );

    let missing = report.missing_sources();
    if missing > 0 {
        println!("{} {} source file(s) not found", "!".yellow().bold(), missing);
    }
}
