//! Parameterized Cypher statement building.
//!
//! Labels, relationship types and property names can only appear in Cypher
//! as literal text, so they are interpolated here and nowhere else. Labels
//! and types come from the closed schema enums; property names go through
//! [`identifier`]. Every data value is bound as a parameter.

pub mod aggregates;
pub mod load;
pub mod nodes;
pub mod relationships;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::error::{GraphError, GraphResult};
use crate::value::{Properties, PropertyValue};

/// Columns returned by every statement that yields a node.
pub const ENTITY_COLUMNS: [&str; 2] = ["labels", "properties"];

/// Columns returned by every statement that yields a relationship.
pub const RELATIONSHIP_COLUMNS: [&str; 4] = ["type", "from_value", "to_value", "properties"];

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Value(PropertyValue),
    List(Vec<Param>),
    Map(BTreeMap<String, Param>),
}

impl From<PropertyValue> for Param {
    fn from(value: PropertyValue) -> Self {
        Param::Value(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Value(PropertyValue::from(value))
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Value(PropertyValue::String(value))
    }
}

impl From<&Properties> for Param {
    fn from(properties: &Properties) -> Self {
        Param::Map(
            properties
                .iter()
                .map(|(k, v)| (k.clone(), Param::Value(v.clone())))
                .collect(),
        )
    }
}

impl From<&[String]> for Param {
    fn from(values: &[String]) -> Self {
        Param::List(values.iter().cloned().map(Param::from).collect())
    }
}

impl From<&[(String, String)]> for Param {
    fn from(pairs: &[(String, String)]) -> Self {
        Param::List(
            pairs
                .iter()
                .map(|(from, to)| Param::List(vec![Param::from(from.clone()), Param::from(to.clone())]))
                .collect(),
        )
    }
}

/// A Cypher query with its bound parameters and the columns it returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    text: String,
    params: BTreeMap<String, Param>,
    columns: Vec<String>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BTreeMap::new(),
            columns: Vec::new(),
        }
    }

    /// Bind a parameter referenced as `$key` in the text.
    pub fn param(mut self, key: &str, value: impl Into<Param>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Declare the columns each returned record carries.
    pub fn returns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &BTreeMap<String, Param> {
        &self.params
    }

    pub fn param_value(&self, key: &str) -> Option<&Param> {
        self.params.get(key)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// One result row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, column: &str, value: impl Into<serde_json::Value>) -> Self {
        self.insert(column, value.into());
        self
    }

    pub fn insert(&mut self, column: &str, value: serde_json::Value) {
        self.fields.insert(column.to_string(), value);
    }

    pub fn raw(&self, column: &str) -> Option<&serde_json::Value> {
        self.fields.get(column)
    }

    /// Decode a column into `T`.
    pub fn get<T: DeserializeOwned>(&self, column: &str) -> GraphResult<T> {
        let value = self
            .fields
            .get(column)
            .ok_or_else(|| GraphError::store(format!("missing column '{}' in result", column)))?;
        serde_json::from_value(value.clone())
            .map_err(|e| GraphError::store(format!("failed to decode column '{}': {}", column, e)))
    }
}

/// Whether `name` is safe to interpolate as a property name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a property name before interpolation.
pub fn identifier(name: &str) -> GraphResult<&str> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(GraphError::InvalidIdentifier(name.to_string()))
    }
}

/// A property name or alias as Cypher text, backtick-quoted unless it is a
/// plain identifier. Embedded backticks are doubled.
pub fn escaped(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Build a `REMOVE` clause body (`alias.a, alias.b`) from property names.
pub(crate) fn removal_list(alias: &str, properties: &[String]) -> GraphResult<String> {
    if properties.is_empty() {
        return Err(GraphError::validation("at least one property name is required"));
    }
    let parts = properties
        .iter()
        .map(|p| identifier(p).map(|p| format!("{}.{}", alias, p)))
        .collect::<GraphResult<Vec<_>>>()?;
    Ok(parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_allow_list() {
        assert!(is_identifier("price"));
        assert!(is_identifier("_internal2"));
        assert!(is_identifier("release_date"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("name} DETACH DELETE n //"));
        assert!(!is_identifier("total price"));
        assert!(matches!(identifier("a-b"), Err(GraphError::InvalidIdentifier(_))));
    }

    #[test]
    fn test_removal_list() {
        let list = removal_list("n", &["price".to_string(), "stock".to_string()]).unwrap();
        assert_eq!(list, "n.price, n.stock");
        assert!(matches!(removal_list("n", &[]), Err(GraphError::Validation(_))));
        assert!(removal_list("n", &["ok".to_string(), "bad name".to_string()]).is_err());
    }

    #[test]
    fn test_record_decoding() {
        let record = Record::new()
            .with("count", 3)
            .with("properties", serde_json::json!({"name": "Component 1", "price": 10.5}));
        assert_eq!(record.get::<i64>("count").unwrap(), 3);
        let props: Properties = record.get("properties").unwrap();
        assert_eq!(props["price"], PropertyValue::Float(10.5));
        assert!(matches!(record.get::<i64>("missing"), Err(GraphError::Store(_))));
        assert!(record.get::<String>("count").is_err());
    }

    #[test]
    fn test_pairs_param_shape() {
        let pairs = vec![("User 1".to_string(), "Component 2".to_string())];
        let param = Param::from(pairs.as_slice());
        assert_eq!(
            param,
            Param::List(vec![Param::List(vec![Param::from("User 1"), Param::from("Component 2")])])
        );
    }
}
