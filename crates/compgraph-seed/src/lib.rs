//! # compgraph seed
//!
//! Synthetic, internally consistent sample data for the bulk loader: five
//! node files and ten relationship files in the layout `compgraph load`
//! reads. Relationship rows only reference generated keys, and repeated
//! endpoint pairs are dropped.
//!
//! Generation is deterministic for a given [`SeedConfig::seed`].

pub mod catalog;
pub mod relations;
pub mod table;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use compgraph_core::GraphResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use relations::NodeKeys;
pub use table::Table;

/// Row counts and RNG seed.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub components: usize,
    pub providers: usize,
    pub users: usize,
    pub reviews: usize,
    /// Draws per relationship file, before duplicate pairs are dropped.
    pub relationship_rows: usize,
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            components: 100,
            providers: 100,
            users: 100,
            reviews: 100,
            relationship_rows: 100,
            seed: None,
        }
    }
}

/// Inclusive range random dates are drawn from.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    start: NaiveDate,
    span_days: i64,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            span_days: (end - start).num_days().max(0),
        }
    }

    /// A `YYYY-MM-DD` date within the range.
    pub fn random<R: Rng>(&self, rng: &mut R) -> String {
        let offset = rng.gen_range(0..=self.span_days);
        (self.start + Duration::days(offset)).format("%Y-%m-%d").to_string()
    }
}

impl Default for DateRange {
    /// 2015-01-01 through 2025-01-01.
    fn default() -> Self {
        Self::new(
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        )
    }
}

/// One of a fixed, non-empty set of literals.
pub(crate) fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Generated node and relationship tables, in loader order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub nodes: Vec<Table>,
    pub relationships: Vec<Table>,
}

impl Dataset {
    pub fn table(&self, file: &str) -> Option<&Table> {
        self.nodes.iter().chain(&self.relationships).find(|t| t.file == file)
    }

    /// Write every table as CSV under `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> GraphResult<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for table in self.nodes.iter().chain(&self.relationships) {
            let path = table.write_to(dir)?;
            info!(file = %path.display(), rows = table.len(), "Wrote table");
            written.push(path);
        }
        Ok(written)
    }
}

/// Generate a dataset, seeding from `config.seed` or from entropy.
pub fn generate(config: &SeedConfig) -> Dataset {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with(&mut rng, config)
}

pub fn generate_with<R: Rng>(rng: &mut R, config: &SeedConfig) -> Dataset {
    let dates = DateRange::default();

    let components = catalog::components(rng, config, &dates);
    let categories = catalog::categories(rng, &dates);
    let component_names = owned(components.column("name"));
    let providers = catalog::providers(rng, config, &component_names);
    let provider_names = owned(providers.column("name"));
    let users = catalog::users(rng, config, &provider_names, &dates);
    let reviews = catalog::reviews(rng, config, &dates);

    let keys = NodeKeys {
        markets: owned(components.column("main_market")),
        categories: owned(categories.column("name")),
        users: owned(users.column("name")),
        reviews: owned(reviews.column("title")),
        components: component_names,
        providers: provider_names,
    };
    let relationships = relations::generate(rng, &keys, config.relationship_rows, &dates);

    Dataset {
        nodes: vec![components, categories, users, reviews, providers],
        relationships,
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compgraph_core::schema::{NODE_SOURCES, RELATIONSHIP_SOURCES};

    fn seeded(seed: u64) -> Dataset {
        generate(&SeedConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_default_sizes() {
        let data = seeded(42);
        assert_eq!(data.table("components.csv").unwrap().len(), 100);
        assert_eq!(data.table("categories.csv").unwrap().len(), 8);
        assert_eq!(data.table("providers.csv").unwrap().len(), 100);
        assert_eq!(data.table("users.csv").unwrap().len(), 100);
        assert_eq!(data.table("reviews.csv").unwrap().len(), 100);
        for table in &data.relationships {
            assert!(table.len() <= 100);
            assert!(!table.is_empty(), "{} is empty", table.file);
        }
    }

    #[test]
    fn test_file_order_matches_loader() {
        let data = seeded(1);
        let nodes: Vec<&str> = data.nodes.iter().map(|t| t.file).collect();
        let expected: Vec<&str> = NODE_SOURCES.iter().map(|s| s.file).collect();
        assert_eq!(nodes, expected);

        let relationships: Vec<&str> = data.relationships.iter().map(|t| t.file).collect();
        let expected: Vec<&str> = RELATIONSHIP_SOURCES.iter().map(|s| s.file).collect();
        assert_eq!(relationships, expected);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = seeded(99);
        let b = seeded(99);
        for (x, y) in a.nodes.iter().chain(&a.relationships).zip(b.nodes.iter().chain(&b.relationships)) {
            assert_eq!(x.rows, y.rows, "{} differs", x.file);
        }
    }

    #[test]
    fn test_relationships_reference_generated_keys() {
        let data = seeded(5);
        let users = data.table("users.csv").unwrap().column("name");
        let components = data.table("components.csv").unwrap().column("name");
        let purchases = data.table("relations_purchase.csv").unwrap();
        for row in &purchases.rows {
            assert!(users.contains(&row[0].as_str()));
            assert!(components.contains(&row[1].as_str()));
        }
    }

    #[test]
    fn test_dates_in_range() {
        let dates = DateRange::default();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..500 {
            let date = dates.random(&mut rng);
            assert!(date.as_str() >= "2015-01-01" && date.as_str() <= "2025-01-01", "{}", date);
        }
    }
}
