//! Neo4j schema initialization (natural-key uniqueness constraints).

use compgraph_core::{GraphResult, Label, Statement};
use tracing::info;

use crate::store::GraphStore;

/// One uniqueness constraint per label on its natural key.
pub fn constraint_statements() -> Vec<Statement> {
    Label::ALL
        .iter()
        .map(|label| {
            Statement::new(format!(
                "CREATE CONSTRAINT {lower}_{key} IF NOT EXISTS FOR (n:{label}) REQUIRE n.{key} IS UNIQUE",
                lower = label.as_str().to_lowercase(),
                key = label.identifier_key(),
                label = label
            ))
        })
        .collect()
}

/// Initialize Neo4j schema constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(store: &dyn GraphStore) -> GraphResult<()> {
    info!("Initializing Neo4j schema...");

    let statements = constraint_statements();
    let total = statements.len();
    for statement in statements {
        store.run(statement).await?;
    }

    info!("Neo4j schema initialized ({} statements)", total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_per_label() {
        let statements = constraint_statements();
        assert_eq!(statements.len(), 5);
        assert!(statements.iter().any(|s| s.text()
            == "CREATE CONSTRAINT review_title IF NOT EXISTS FOR (n:Review) REQUIRE n.title IS UNIQUE"));
        assert!(statements.iter().any(|s| s.text().contains("FOR (n:Component) REQUIRE n.name IS UNIQUE")));
    }
}
