//! Relationship statements.
//!
//! Single-relationship statements bind `$from_identifier` / `$to_identifier`;
//! batch statements `UNWIND $pairs` where each pair is `[from, to]`. Repeated
//! pairs are bound once, so batch counts never exceed the relationships present.

use std::collections::HashSet;

use super::{removal_list, Statement, RELATIONSHIP_COLUMNS};
use crate::error::GraphResult;
use crate::model::{RelationshipKey, RelationshipPattern};
use crate::value::Properties;

fn match_single(pattern: &RelationshipPattern) -> String {
    format!(
        "MATCH (a:{})-[r:{}]->(b:{}) WHERE a.{} = $from_identifier AND b.{} = $to_identifier",
        pattern.from_label,
        pattern.relationship_type,
        pattern.to_label,
        pattern.from_label.identifier_key(),
        pattern.to_label.identifier_key()
    )
}

fn match_pairs(pattern: &RelationshipPattern) -> String {
    format!(
        "UNWIND $pairs AS pair MATCH (a:{})-[r:{}]->(b:{}) WHERE a.{} = pair[0] AND b.{} = pair[1]",
        pattern.from_label,
        pattern.relationship_type,
        pattern.to_label,
        pattern.from_label.identifier_key(),
        pattern.to_label.identifier_key()
    )
}

/// First occurrence of each pair, in request order.
fn distinct_pairs(pairs: &[(String, String)]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    pairs.iter().filter(|pair| seen.insert(*pair)).cloned().collect()
}

fn return_relationship(pattern: &RelationshipPattern) -> String {
    format!(
        "RETURN type(r) AS type, a.{} AS from_value, b.{} AS to_value, properties(r) AS properties",
        pattern.from_label.identifier_key(),
        pattern.to_label.identifier_key()
    )
}

fn single(key: &RelationshipKey, text: String) -> Statement {
    Statement::new(text)
        .param("from_identifier", key.from_value.as_str())
        .param("to_identifier", key.to_value.as_str())
}

pub fn relationship_properties(key: &RelationshipKey) -> Statement {
    single(
        key,
        format!("{} RETURN properties(r) AS properties LIMIT 1", match_single(&key.pattern)),
    )
    .returns(["properties"])
}

/// Match both endpoints, then match-or-create the relationship and merge properties onto it.
pub fn create_relationship(key: &RelationshipKey, properties: &Properties) -> Statement {
    let pattern = &key.pattern;
    single(
        key,
        format!(
            "MATCH (a:{} {{{}: $from_identifier}}), (b:{} {{{}: $to_identifier}}) \
             MERGE (a)-[r:{}]->(b) SET r += $properties {}",
            pattern.from_label,
            pattern.from_label.identifier_key(),
            pattern.to_label,
            pattern.to_label.identifier_key(),
            pattern.relationship_type,
            return_relationship(pattern)
        ),
    )
    .param("properties", properties)
    .returns(RELATIONSHIP_COLUMNS)
}

pub fn merge_relationship_properties(key: &RelationshipKey, properties: &Properties) -> Statement {
    single(
        key,
        format!(
            "{} SET r += $properties {}",
            match_single(&key.pattern),
            return_relationship(&key.pattern)
        ),
    )
    .param("properties", properties)
    .returns(RELATIONSHIP_COLUMNS)
}

pub fn merge_many_relationship_properties(
    pattern: &RelationshipPattern,
    pairs: &[(String, String)],
    properties: &Properties,
) -> Statement {
    Statement::new(format!(
        "{} SET r += $properties RETURN count(r) AS updated_count",
        match_pairs(pattern)
    ))
    .param("pairs", distinct_pairs(pairs).as_slice())
    .param("properties", properties)
    .returns(["updated_count"])
}

pub fn remove_relationship_properties(key: &RelationshipKey, properties: &[String]) -> GraphResult<Statement> {
    Ok(single(
        key,
        format!(
            "{} REMOVE {} {}",
            match_single(&key.pattern),
            removal_list("r", properties)?,
            return_relationship(&key.pattern)
        ),
    )
    .returns(RELATIONSHIP_COLUMNS))
}

pub fn remove_many_relationship_properties(
    pattern: &RelationshipPattern,
    pairs: &[(String, String)],
    properties: &[String],
) -> GraphResult<Statement> {
    Ok(Statement::new(format!(
        "{} REMOVE {} RETURN count(r) AS updated_count",
        match_pairs(pattern),
        removal_list("r", properties)?
    ))
    .param("pairs", distinct_pairs(pairs).as_slice())
    .returns(["updated_count"]))
}

pub fn delete_relationship(key: &RelationshipKey) -> Statement {
    single(
        key,
        format!("{} DELETE r RETURN count(r) AS deleted_count", match_single(&key.pattern)),
    )
    .returns(["deleted_count"])
}

pub fn delete_relationships(pattern: &RelationshipPattern, pairs: &[(String, String)]) -> Statement {
    Statement::new(format!(
        "{} DELETE r RETURN count(r) AS deleted_count",
        match_pairs(pattern)
    ))
    .param("pairs", distinct_pairs(pairs).as_slice())
    .returns(["deleted_count"])
}

/// Total relationship count across the graph.
pub fn count_relationships() -> Statement {
    Statement::new("MATCH ()-[r]->() RETURN count(r) AS total").returns(["total"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::Param;
    use crate::error::GraphError;
    use crate::schema::{Label, RelationshipType};
    use crate::value::PropertyValue;

    fn writes() -> RelationshipPattern {
        RelationshipPattern::new(Label::User, RelationshipType::Writes, Label::Review)
    }

    #[test]
    fn test_single_match_uses_each_endpoint_key() {
        let key = RelationshipKey::new(writes(), "User 1", "Review Title 9");
        let stmt = relationship_properties(&key);
        assert_eq!(
            stmt.text(),
            "MATCH (a:User)-[r:WRITES]->(b:Review) WHERE a.name = $from_identifier AND b.title = $to_identifier \
             RETURN properties(r) AS properties LIMIT 1"
        );
        assert_eq!(stmt.param_value("to_identifier"), Some(&Param::from("Review Title 9")));
    }

    #[test]
    fn test_create_merges_instead_of_duplicating() {
        let key = RelationshipKey::new(
            RelationshipPattern::new(Label::User, RelationshipType::Purchased, Label::Component),
            "U1",
            "C1",
        );
        let mut props = Properties::new();
        props.insert("quantity".to_string(), PropertyValue::Int(1));
        let stmt = create_relationship(&key, &props);
        assert!(stmt.text().contains("MERGE (a)-[r:PURCHASED]->(b) SET r += $properties"));
        assert!(stmt.text().starts_with("MATCH (a:User {name: $from_identifier}), (b:Component {name: $to_identifier})"));
        assert_eq!(stmt.columns().len(), 4);
    }

    #[test]
    fn test_batch_statements_unwind_pairs() {
        let pairs = vec![
            ("User 1".to_string(), "Review Title 1".to_string()),
            ("User 2".to_string(), "Review Title 2".to_string()),
        ];
        let stmt = delete_relationships(&writes(), &pairs);
        assert!(stmt.text().starts_with("UNWIND $pairs AS pair MATCH (a:User)-[r:WRITES]->(b:Review)"));
        assert!(stmt.text().contains("a.name = pair[0] AND b.title = pair[1]"));
        assert!(matches!(stmt.param_value("pairs"), Some(Param::List(items)) if items.len() == 2));
    }

    #[test]
    fn test_remove_clauses_for_relationships() {
        let stmt = remove_many_relationship_properties(
            &writes(),
            &[],
            &["trust_index".to_string(), "review_type".to_string()],
        )
        .unwrap();
        assert!(stmt.text().contains("REMOVE r.trust_index, r.review_type RETURN count(r)"));

        let key = RelationshipKey::new(writes(), "User 1", "Review Title 1");
        assert!(matches!(
            remove_relationship_properties(&key, &[]),
            Err(GraphError::Validation(_))
        ));
    }

    #[test]
    fn test_repeated_pairs_bound_once() {
        let pairs = vec![
            ("User 1".to_string(), "Review Title 1".to_string()),
            ("User 2".to_string(), "Review Title 2".to_string()),
            ("User 1".to_string(), "Review Title 1".to_string()),
        ];
        let mut props = Properties::new();
        props.insert("trust_index".to_string(), PropertyValue::Int(3));

        let statements = [
            delete_relationships(&writes(), &pairs),
            merge_many_relationship_properties(&writes(), &pairs, &props),
            remove_many_relationship_properties(&writes(), &pairs, &["trust_index".to_string()]).unwrap(),
        ];
        for stmt in &statements {
            assert_eq!(
                stmt.param_value("pairs"),
                Some(&Param::from(&pairs[..2])),
                "{}",
                stmt.text()
            );
        }
    }
}
