//! Count and statistics statements.

use super::{escaped, Statement};
use crate::schema::Label;

pub fn count_nodes(label: Option<Label>) -> Statement {
    let text = match label {
        Some(label) => format!("MATCH (n:{}) RETURN count(n) AS total", label),
        None => "MATCH (n) RETURN count(n) AS total".to_string(),
    };
    Statement::new(text).returns(["total"])
}

/// Properties of one arbitrary node of `label`, used to discover numeric fields.
pub fn sample_node(label: Label) -> Statement {
    Statement::new(format!("MATCH (n:{}) RETURN properties(n) AS properties LIMIT 1", label))
        .returns(["properties"])
}

/// Count, mean and median over every listed property in one pass.
///
/// Result columns are `avg_<property>` / `median_<property>` with the raw
/// property name, whatever characters it holds.
pub fn numeric_summary(label: Label, properties: &[String]) -> Statement {
    let mut projections = vec!["count(n) AS total".to_string()];
    let mut columns = vec!["total".to_string()];

    for property in properties {
        let avg = format!("avg_{}", property);
        let median = format!("median_{}", property);
        projections.push(format!("avg(n.{}) AS {}", escaped(property), escaped(&avg)));
        projections.push(format!("percentileCont(n.{}, 0.5) AS {}", escaped(property), escaped(&median)));
        columns.push(avg);
        columns.push(median);
    }

    Statement::new(format!("MATCH (n:{}) RETURN {}", label, projections.join(", "))).returns(columns)
}

/// Most frequent value of one property. Ties resolve in store iteration order.
pub fn property_mode(label: Label, property: &str) -> Statement {
    Statement::new(format!(
        "MATCH (n:{}) WITH n.{} AS value WHERE value IS NOT NULL \
         RETURN value, count(*) AS frequency ORDER BY frequency DESC LIMIT 1",
        label,
        escaped(property)
    ))
    .returns(["value", "frequency"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_summary_projection() {
        let stmt = numeric_summary(Label::Component, &["price".to_string(), "popularity".to_string()]);
        assert_eq!(
            stmt.text(),
            "MATCH (n:Component) RETURN count(n) AS total, avg(n.price) AS avg_price, \
             percentileCont(n.price, 0.5) AS median_price, avg(n.popularity) AS avg_popularity, \
             percentileCont(n.popularity, 0.5) AS median_popularity"
        );
        assert_eq!(
            stmt.columns(),
            ["total", "avg_price", "median_price", "avg_popularity", "median_popularity"]
        );
    }

    #[test]
    fn test_property_mode() {
        let stmt = property_mode(Label::Review, "rating");
        assert!(stmt.text().starts_with("MATCH (n:Review) WITH n.rating AS value WHERE value IS NOT NULL"));
        assert!(stmt.text().ends_with("ORDER BY frequency DESC LIMIT 1"));
    }

    #[test]
    fn test_non_identifier_properties_are_quoted() {
        let stmt = numeric_summary(Label::Component, &["unit price".to_string()]);
        assert_eq!(
            stmt.text(),
            "MATCH (n:Component) RETURN count(n) AS total, avg(n.`unit price`) AS `avg_unit price`, \
             percentileCont(n.`unit price`, 0.5) AS `median_unit price`"
        );
        assert_eq!(stmt.columns(), ["total", "avg_unit price", "median_unit price"]);

        let stmt = property_mode(Label::Review, "odd`name");
        assert!(stmt.text().contains("WITH n.`odd``name` AS value"));
    }

    #[test]
    fn test_count_nodes() {
        assert_eq!(count_nodes(None).text(), "MATCH (n) RETURN count(n) AS total");
        assert_eq!(count_nodes(Some(Label::User)).text(), "MATCH (n:User) RETURN count(n) AS total");
    }
}
