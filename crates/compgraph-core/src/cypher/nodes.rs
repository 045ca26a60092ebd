//! Node statements.

use super::{identifier, removal_list, Statement, ENTITY_COLUMNS};
use crate::error::GraphResult;
use crate::model::{NodeFilter, NodeKey};
use crate::schema::{Label, NODE_LIST_LIMIT};
use crate::value::{Properties, PropertyValue};

const RETURN_ENTITY: &str = "RETURN labels(n) AS labels, properties(n) AS properties";

fn match_key(key: &NodeKey) -> String {
    format!(
        "MATCH (n:{} {{{}: $identifier_value}})",
        key.label,
        key.label.identifier_key()
    )
}

fn match_keys(label: Label) -> String {
    format!(
        "MATCH (n:{}) WHERE n.{} IN $identifier_values",
        label,
        label.identifier_key()
    )
}

/// List nodes, optionally by label and a single property equality.
pub fn list_nodes(filter: &NodeFilter) -> GraphResult<Statement> {
    let mut text = match filter.label {
        Some(label) => format!("MATCH (n:{})", label),
        None => "MATCH (n)".to_string(),
    };

    let mut value = None;
    if let Some((property, literal)) = &filter.property {
        text.push_str(&format!(" WHERE n.{} = $value", identifier(property)?));
        value = Some(PropertyValue::from_filter_literal(literal));
    }

    text.push_str(&format!(" {} LIMIT {}", RETURN_ENTITY, NODE_LIST_LIMIT));

    let mut statement = Statement::new(text);
    if let Some(value) = value {
        statement = statement.param("value", value);
    }
    Ok(statement.returns(ENTITY_COLUMNS))
}

/// Nodes of a label whose natural key is one of `values`.
pub fn nodes_by_keys(label: Label, values: &[String]) -> Statement {
    Statement::new(format!("{} {} LIMIT {}", match_keys(label), RETURN_ENTITY, NODE_LIST_LIMIT))
        .param("identifier_values", values)
        .returns(ENTITY_COLUMNS)
}

/// A single node by natural key. Without a label both `name` and `title` are tried.
pub fn node_by_key(label: Option<Label>, value: &str) -> Statement {
    let text = match label {
        Some(label) => format!(
            "MATCH (n:{} {{{}: $identifier_value}}) {} LIMIT 1",
            label,
            label.identifier_key(),
            RETURN_ENTITY
        ),
        None => format!(
            "MATCH (n) WHERE n.name = $identifier_value OR n.title = $identifier_value {} LIMIT 1",
            RETURN_ENTITY
        ),
    };
    Statement::new(text)
        .param("identifier_value", value)
        .returns(ENTITY_COLUMNS)
}

pub fn create_node(label: Label) -> Statement {
    Statement::new(format!("CREATE (n:{}) {}", label, RETURN_ENTITY)).returns(ENTITY_COLUMNS)
}

pub fn create_node_with_properties(label: Label, properties: &Properties) -> Statement {
    Statement::new(format!("CREATE (n:{}) SET n = $properties {}", label, RETURN_ENTITY))
        .param("properties", properties)
        .returns(ENTITY_COLUMNS)
}

/// Union `properties` onto one node, overwriting on collision.
pub fn merge_node_properties(key: &NodeKey, properties: &Properties) -> Statement {
    Statement::new(format!("{} SET n += $properties {}", match_key(key), RETURN_ENTITY))
        .param("identifier_value", key.value.as_str())
        .param("properties", properties)
        .returns(ENTITY_COLUMNS)
}

pub fn merge_many_node_properties(label: Label, values: &[String], properties: &Properties) -> Statement {
    Statement::new(format!(
        "{} SET n += $properties RETURN count(n) AS updated_count",
        match_keys(label)
    ))
    .param("identifier_values", values)
    .param("properties", properties)
    .returns(["updated_count"])
}

pub fn remove_node_properties(key: &NodeKey, properties: &[String]) -> GraphResult<Statement> {
    Ok(Statement::new(format!(
        "{} REMOVE {} {}",
        match_key(key),
        removal_list("n", properties)?,
        RETURN_ENTITY
    ))
    .param("identifier_value", key.value.as_str())
    .returns(ENTITY_COLUMNS))
}

pub fn remove_many_node_properties(label: Label, values: &[String], properties: &[String]) -> GraphResult<Statement> {
    Ok(Statement::new(format!(
        "{} REMOVE {} RETURN count(n) AS updated_count",
        match_keys(label),
        removal_list("n", properties)?
    ))
    .param("identifier_values", values)
    .returns(["updated_count"]))
}

/// Detach-delete one node; incident relationships go with it.
pub fn delete_node(key: &NodeKey) -> Statement {
    Statement::new(format!(
        "{} DETACH DELETE n RETURN count(n) AS deleted_count",
        match_key(key)
    ))
    .param("identifier_value", key.value.as_str())
    .returns(["deleted_count"])
}

pub fn delete_nodes(label: Label, values: &[String]) -> Statement {
    Statement::new(format!(
        "{} DETACH DELETE n RETURN count(n) AS deleted_count",
        match_keys(label)
    ))
    .param("identifier_values", values)
    .returns(["deleted_count"])
}
