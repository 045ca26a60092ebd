//! Idempotent upsert statements used by the bulk loader.

use std::collections::BTreeMap;

use super::{Param, Statement};
use crate::schema::{Label, RelationshipType};
use crate::value::Properties;

/// One relationship input row: endpoint keys plus relationship properties.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRow {
    pub source: String,
    pub target: String,
    pub properties: Properties,
}

impl From<&RelationshipRow> for Param {
    fn from(row: &RelationshipRow) -> Self {
        let mut map = BTreeMap::new();
        map.insert("source".to_string(), Param::from(row.source.clone()));
        map.insert("target".to_string(), Param::from(row.target.clone()));
        map.insert("properties".to_string(), Param::from(&row.properties));
        Param::Map(map)
    }
}

/// Match-or-create each row's node by natural key, then overwrite its fields.
///
/// Every row must carry the label's natural key.
pub fn upsert_nodes(label: Label, rows: &[Properties]) -> Statement {
    let key = label.identifier_key();
    Statement::new(format!(
        "UNWIND $rows AS row MERGE (n:{label} {{{key}: row.{key}}}) SET n += row RETURN count(n) AS applied",
        label = label,
        key = key
    ))
    .param("rows", Param::List(rows.iter().map(Param::from).collect()))
    .returns(["applied"])
}

/// Resolve both endpoints per row, then match-or-create the relationship and
/// overwrite its properties. Rows whose endpoints are missing drop out of the
/// `MATCH` and are not counted.
pub fn upsert_relationships(relationship_type: RelationshipType, rows: &[RelationshipRow]) -> Statement {
    let (from, to) = relationship_type.endpoints();
    Statement::new(format!(
        "UNWIND $rows AS row \
         MATCH (a:{from} {{{from_key}: row.source}}) \
         MATCH (b:{to} {{{to_key}: row.target}}) \
         MERGE (a)-[r:{rel}]->(b) SET r += row.properties \
         RETURN count(r) AS applied",
        from = from,
        from_key = from.identifier_key(),
        to = to,
        to_key = to.identifier_key(),
        rel = relationship_type
    ))
    .param("rows", Param::List(rows.iter().map(Param::from).collect()))
    .returns(["applied"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PropertyValue;

    #[test]
    fn test_upsert_nodes_merges_on_natural_key() {
        let mut row = Properties::new();
        row.insert("title".to_string(), PropertyValue::from("Review Title 1"));
        row.insert("rating".to_string(), PropertyValue::Int(4));
        let stmt = upsert_nodes(Label::Review, &[row]);
        assert_eq!(
            stmt.text(),
            "UNWIND $rows AS row MERGE (n:Review {title: row.title}) SET n += row RETURN count(n) AS applied"
        );
        assert!(matches!(stmt.param_value("rows"), Some(Param::List(rows)) if rows.len() == 1));
    }

    #[test]
    fn test_upsert_relationships_resolves_endpoints() {
        let row = RelationshipRow {
            source: "Review Title 1".to_string(),
            target: "Component 7".to_string(),
            properties: Properties::new(),
        };
        let stmt = upsert_relationships(RelationshipType::Reviews, &[row]);
        assert!(stmt.text().contains("MATCH (a:Review {title: row.source}) MATCH (b:Component {name: row.target})"));
        assert!(stmt.text().contains("MERGE (a)-[r:REVIEWS]->(b) SET r += row.properties"));
        match stmt.param_value("rows") {
            Some(Param::List(rows)) => match &rows[0] {
                Param::Map(map) => {
                    assert_eq!(map["source"], Param::from("Review Title 1"));
                    assert!(matches!(map["properties"], Param::Map(_)));
                }
                other => panic!("unexpected row param {:?}", other),
            },
            other => panic!("unexpected rows param {:?}", other),
        }
    }
}
