//! Relationship tables. Every row links two generated node keys; each
//! (source, target) pair appears at most once per file.

use std::collections::HashSet;

use compgraph_core::schema::relationship_source;
use compgraph_core::RelationshipType;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::table::{money, Table};
use crate::{pick, DateRange};

/// Natural keys of the generated nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeKeys {
    pub components: Vec<String>,
    /// Main market of each component, parallel to `components`.
    pub markets: Vec<String>,
    pub categories: Vec<String>,
    pub providers: Vec<String>,
    pub users: Vec<String>,
    pub reviews: Vec<String>,
}

/// Draw up to `attempts` rows, dropping repeated endpoint pairs.
fn relation<R, F>(
    rng: &mut R,
    relationship_type: RelationshipType,
    headers: &[&'static str],
    attempts: usize,
    mut draw: F,
) -> Table
where
    R: Rng,
    F: FnMut(&mut R) -> Option<(String, String, Vec<String>)>,
{
    let mut table = Table::new(relationship_source(relationship_type).file, headers);
    let mut seen = HashSet::new();

    for _ in 0..attempts {
        let Some((source, target, properties)) = draw(rng) else {
            continue;
        };
        if !seen.insert((source.clone(), target.clone())) {
            continue;
        }
        let mut row = vec![source, target];
        row.extend(properties);
        table.push(row);
    }
    table
}

fn choose<R: Rng>(rng: &mut R, names: &[String]) -> Option<String> {
    names.choose(rng).cloned()
}

/// All ten relationship tables, in loader order.
pub fn generate<R: Rng>(rng: &mut R, keys: &NodeKeys, attempts: usize, dates: &DateRange) -> Vec<Table> {
    vec![
        relation(
            rng,
            RelationshipType::Purchased,
            &["user", "component", "purchase_date", "quantity", "total_price", "payment_method"],
            attempts,
            |rng| {
                Some((
                    choose(rng, &keys.users)?,
                    choose(rng, &keys.components)?,
                    vec![
                        dates.random(rng),
                        rng.gen_range(1..=3).to_string(),
                        money(rng.gen_range(50.0..2000.0)),
                        pick(rng, &["Credit Card", "PayPal", "Bank Transfer"]).to_string(),
                    ],
                ))
            },
        ),
        // each component is filed under its own main market
        relation(
            rng,
            RelationshipType::Categorized,
            &["component", "category", "assign_date", "relevance", "position"],
            attempts,
            |rng| {
                let idx = rng.gen_range(0..keys.components.len().max(1));
                let component = keys.components.get(idx)?;
                let category = keys.categories.iter().find(|c| Some(*c) == keys.markets.get(idx))?;
                Some((
                    component.clone(),
                    category.clone(),
                    vec![
                        dates.random(rng),
                        rng.gen_range(1..=10).to_string(),
                        rng.gen_range(1..=50).to_string(),
                    ],
                ))
            },
        ),
        relation(
            rng,
            RelationshipType::Supplies,
            &["provider", "component", "shipping_mode", "payment_terms", "stock"],
            attempts,
            |rng| {
                Some((
                    choose(rng, &keys.providers)?,
                    choose(rng, &keys.components)?,
                    vec![
                        pick(rng, &["Standard", "Express", "Economy"]).to_string(),
                        pick(rng, &["Prepaid", "Postpaid"]).to_string(),
                        rng.gen_range(1..=500).to_string(),
                    ],
                ))
            },
        ),
        relation(
            rng,
            RelationshipType::Reviews,
            &["review", "component", "purchase_location", "satisfaction", "detail_level"],
            attempts,
            |rng| {
                Some((
                    choose(rng, &keys.reviews)?,
                    choose(rng, &keys.components)?,
                    vec![
                        pick(rng, &["Online", "In-store"]).to_string(),
                        pick(rng, &["Good", "Neutral", "Bad"]).to_string(),
                        rng.gen_range(1..=10).to_string(),
                    ],
                ))
            },
        ),
        relation(
            rng,
            RelationshipType::Promotes,
            &["provider", "user", "discount_percentage", "promotion_date", "promotion_type"],
            attempts,
            |rng| {
                Some((
                    choose(rng, &keys.providers)?,
                    choose(rng, &keys.users)?,
                    vec![
                        money(rng.gen_range(5.0..50.0)),
                        dates.random(rng),
                        pick(rng, &["Seasonal", "Clearance", "Flash Sale"]).to_string(),
                    ],
                ))
            },
        ),
        relation(
            rng,
            RelationshipType::AssociatedWith,
            &["provider", "category", "association_level", "start_date", "association_terms"],
            attempts,
            |rng| {
                Some((
                    choose(rng, &keys.providers)?,
                    choose(rng, &keys.categories)?,
                    vec![
                        rng.gen_range(1..=10).to_string(),
                        dates.random(rng),
                        pick(rng, &["Exclusive Distributor", "Limited Partnership", "Official Supplier"]).to_string(),
                    ],
                ))
            },
        ),
        relation(
            rng,
            RelationshipType::Searched,
            &["user", "component", "keyword", "search_date", "results_count"],
            attempts,
            |rng| {
                Some((
                    choose(rng, &keys.users)?,
                    choose(rng, &keys.components)?,
                    vec![
                        pick(rng, &["Gaming", "Budget", "High Performance"]).to_string(),
                        dates.random(rng),
                        rng.gen_range(5..=100).to_string(),
                    ],
                ))
            },
        ),
        relation(
            rng,
            RelationshipType::Wants,
            &["user", "component", "added_date", "priority", "reason"],
            attempts,
            |rng| {
                Some((
                    choose(rng, &keys.users)?,
                    choose(rng, &keys.components)?,
                    vec![
                        dates.random(rng),
                        rng.gen_range(1..=5).to_string(),
                        pick(rng, &["Upgrade", "Gift", "Replacement"]).to_string(),
                    ],
                ))
            },
        ),
        relation(
            rng,
            RelationshipType::Writes,
            &["user", "review", "trust_index", "verified_purchase", "review_type"],
            attempts,
            |rng| {
                Some((
                    choose(rng, &keys.users)?,
                    choose(rng, &keys.reviews)?,
                    vec![
                        rng.gen_range(1..=100).to_string(),
                        rng.gen_bool(0.5).to_string(),
                        pick(rng, &["Text Review", "Video Review"]).to_string(),
                    ],
                ))
            },
        ),
        relation(
            rng,
            RelationshipType::Complements,
            &["component1", "component2", "compatibility_level", "compatibility_reason", "relation_date"],
            attempts,
            |rng| {
                let (first, second) = complement_pair(rng, keys)?;
                Some((
                    first,
                    second,
                    vec![
                        rng.gen_range(1..=10).to_string(),
                        pick(rng, &["Same Brand", "Compatible Chipset", "Recommended by Users"]).to_string(),
                        dates.random(rng),
                    ],
                ))
            },
        ),
    ]
}

/// Two components from different main markets, so never the same component.
fn complement_pair<R: Rng>(rng: &mut R, keys: &NodeKeys) -> Option<(String, String)> {
    let idx = rng.gen_range(0..keys.components.len().max(1));
    let market = keys.markets.get(idx)?;
    let candidates: Vec<&String> = keys
        .components
        .iter()
        .zip(&keys.markets)
        .filter(|(_, other)| *other != market)
        .map(|(name, _)| name)
        .collect();
    let second = candidates.choose(rng)?;
    Some((keys.components.get(idx)?.clone(), (*second).clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn keys() -> NodeKeys {
        NodeKeys {
            components: vec!["Component 1".into(), "Component 2".into(), "Component 3".into()],
            markets: vec!["Audio".into(), "Audio".into(), "Storage".into()],
            categories: vec!["Audio".into(), "Storage".into()],
            providers: vec!["Provider 1".into()],
            users: vec!["User 1".into(), "User 2".into()],
            reviews: vec!["Review Title 1".into()],
        }
    }

    #[test]
    fn test_pairs_are_unique() {
        let mut rng = StdRng::seed_from_u64(7);
        let dates = DateRange::default();
        for table in generate(&mut rng, &keys(), 200, &dates) {
            let mut pairs: Vec<(&str, &str)> = table.rows.iter().map(|r| (r[0].as_str(), r[1].as_str())).collect();
            let total = pairs.len();
            pairs.sort();
            pairs.dedup();
            assert_eq!(pairs.len(), total, "duplicate pair in {}", table.file);
        }
    }

    #[test]
    fn test_complements_cross_markets() {
        let keys = keys();
        let mut rng = StdRng::seed_from_u64(11);
        let tables = generate(&mut rng, &keys, 100, &DateRange::default());
        let complements = tables.iter().find(|t| t.file == "relations_complement.csv").unwrap();
        assert!(!complements.is_empty());
        for row in &complements.rows {
            assert_ne!(row[0], row[1]);
            let market = |name: &str| {
                let idx = keys.components.iter().position(|c| c == name).unwrap();
                keys.markets[idx].clone()
            };
            assert_ne!(market(&row[0]), market(&row[1]));
        }
    }

    #[test]
    fn test_categorized_uses_main_market() {
        let keys = keys();
        let mut rng = StdRng::seed_from_u64(3);
        let tables = generate(&mut rng, &keys, 50, &DateRange::default());
        let categorized = tables.iter().find(|t| t.file == "relations_categorize.csv").unwrap();
        assert_eq!(categorized.len(), 3);
        for row in &categorized.rows {
            let idx = keys.components.iter().position(|c| *c == row[0]).unwrap();
            assert_eq!(row[1], keys.markets[idx]);
        }
    }

    #[test]
    fn test_empty_endpoints_yield_empty_tables() {
        let mut rng = StdRng::seed_from_u64(1);
        let tables = generate(&mut rng, &NodeKeys::default(), 20, &DateRange::default());
        assert_eq!(tables.len(), 10);
        assert!(tables.iter().all(Table::is_empty));
    }
}
