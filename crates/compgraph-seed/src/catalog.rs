//! Node tables: components, categories, providers, users and reviews.

use compgraph_core::schema::node_source;
use compgraph_core::Label;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::table::{list, money, Table};
use crate::{pick, DateRange, SeedConfig};

/// Market groups and the component types sold in each.
pub const CATEGORY_GROUPS: &[(&str, &[&str])] = &[
    ("Gaming", &["Gaming Chair", "Gaming Mouse", "Gaming Keyboard", "Gaming Headset"]),
    ("Audio", &["Speakers", "Headphones", "Microphones", "Sound Cards"]),
    ("Peripherals", &["Mouse", "Keyboard", "Monitor", "Printer"]),
    ("PC Components", &["GPU", "CPU", "Motherboard", "RAM", "SSD", "HDD"]),
    ("Networking", &["Router", "Switch", "Network Card", "Modem"]),
    ("Storage", &["External HDD", "External SSD", "Flash Drive", "NAS"]),
    ("Cooling", &["CPU Cooler", "Case Fan", "Liquid Cooling", "Thermal Paste"]),
    ("Power Supplies", &["500W PSU", "750W PSU", "1000W PSU", "Modular PSU"]),
];

const FEATURES: &[&str] = &["Feature A", "Feature B", "Feature C", "Feature D"];
const DELIVERY_TIMES: &[&str] = &["1-3 days", "3-7 days", "7-14 days"];

const SPECIFICATIONS_PER_COMPONENT: usize = 3;
const PRODUCTS_PER_PROVIDER: usize = 50;
const BRANDS_PER_USER: usize = 10;

fn flag<R: Rng>(rng: &mut R) -> String {
    rng.gen_bool(0.5).to_string()
}

pub fn components<R: Rng>(rng: &mut R, config: &SeedConfig, dates: &DateRange) -> Table {
    let mut table = Table::new(
        node_source(Label::Component).file,
        &[
            "name",
            "model",
            "type",
            "price",
            "available",
            "specifications",
            "release_date",
            "main_market",
            "popularity",
        ],
    );

    for i in 1..=config.components {
        let (market, types) = CATEGORY_GROUPS[rng.gen_range(0..CATEGORY_GROUPS.len())];
        let component_type = pick(rng, types);
        // drawn with replacement, so repeats are possible
        let specifications: Vec<String> = (0..SPECIFICATIONS_PER_COMPONENT)
            .map(|_| pick(rng, FEATURES).to_string())
            .collect();

        table.push(vec![
            format!("Component {}", i),
            format!("Model-{}", rng.gen_range(1000..=9999)),
            component_type.to_string(),
            money(rng.gen_range(50.0..2000.0)),
            flag(rng),
            list(&specifications),
            dates.random(rng),
            market.to_string(),
            rng.gen_range(1..=100).to_string(),
        ]);
    }
    table
}

/// One category per market group.
pub fn categories<R: Rng>(rng: &mut R, dates: &DateRange) -> Table {
    let mut table = Table::new(
        node_source(Label::Category).file,
        &["name", "popularity", "active", "featured", "last_update"],
    );
    for (market, _) in CATEGORY_GROUPS {
        table.push(vec![
            market.to_string(),
            rng.gen_range(1..=100).to_string(),
            flag(rng),
            flag(rng),
            dates.random(rng),
        ]);
    }
    table
}

pub fn providers<R: Rng>(rng: &mut R, config: &SeedConfig, component_names: &[String]) -> Table {
    let mut table = Table::new(
        node_source(Label::Provider).file,
        &["name", "rating", "warranty_offered", "products_offered", "avg_delivery_time"],
    );
    for i in 1..=config.providers {
        let products: Vec<String> = component_names
            .choose_multiple(rng, PRODUCTS_PER_PROVIDER.min(component_names.len()))
            .cloned()
            .collect();
        table.push(vec![
            format!("Provider {}", i),
            rng.gen_range(1..=5).to_string(),
            flag(rng),
            list(&products),
            pick(rng, DELIVERY_TIMES).to_string(),
        ]);
    }
    table
}

pub fn users<R: Rng>(rng: &mut R, config: &SeedConfig, provider_names: &[String], dates: &DateRange) -> Table {
    let mut table = Table::new(
        node_source(Label::User).file,
        &["name", "budget", "looking_for_offers", "preferred_brands", "last_visit"],
    );
    for i in 1..=config.users {
        let brands: Vec<String> = provider_names
            .choose_multiple(rng, BRANDS_PER_USER.min(provider_names.len()))
            .cloned()
            .collect();
        table.push(vec![
            format!("User {}", i),
            money(rng.gen_range(500.0..5000.0)),
            flag(rng),
            list(&brands),
            dates.random(rng),
        ]);
    }
    table
}

pub fn reviews<R: Rng>(rng: &mut R, config: &SeedConfig, dates: &DateRange) -> Table {
    let mut table = Table::new(
        node_source(Label::Review).file,
        &["title", "rating", "verified", "purchase_recommendation", "review_date"],
    );
    for i in 1..=config.reviews {
        table.push(vec![
            format!("Review Title {}", i),
            rng.gen_range(1..=5).to_string(),
            flag(rng),
            flag(rng),
            dates.random(rng),
        ]);
    }
    table
}
