//! Property values carried by nodes and relationships.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A property value as accepted from clients and stored in the graph.
///
/// Serialized untagged, so `true`, `42`, `4.2`, `"x"` and `["a", "b"]`
/// all round-trip through JSON as themselves. Variant order matters for
/// deserialization: integers must be tried before floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
}

/// Property name to value mapping.
pub type Properties = BTreeMap<String, PropertyValue>;

impl PropertyValue {
    /// Integer or float, booleans excluded.
    pub fn is_numeric(&self) -> bool {
        matches!(self, PropertyValue::Int(_) | PropertyValue::Float(_))
    }

    /// Coerce a query-string filter literal.
    ///
    /// A literal containing `.` is tried as a float, anything else as an
    /// integer; when parsing fails the literal is kept as a string. So `"42"`
    /// matches a stored integer 42, never the string "42". Surrounding
    /// whitespace is ignored when parsing but kept in the string fallback.
    pub fn from_filter_literal(literal: &str) -> Self {
        let trimmed = literal.trim();
        if trimmed.contains('.') {
            trimmed
                .parse::<f64>()
                .map(PropertyValue::Float)
                .unwrap_or_else(|_| PropertyValue::String(literal.to_string()))
        } else {
            trimmed
                .parse::<i64>()
                .map(PropertyValue::Int)
                .unwrap_or_else(|_| PropertyValue::String(literal.to_string()))
        }
    }

    /// Coerce a CSV cell.
    ///
    /// Tries integer, float, boolean and JSON array in that order; anything
    /// else stays a string. Returns `None` for empty cells.
    pub fn from_csv_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }

        if let Ok(i) = cell.parse::<i64>() {
            return Some(PropertyValue::Int(i));
        }
        if let Ok(f) = cell.parse::<f64>() {
            if f.is_finite() {
                return Some(PropertyValue::Float(f));
            }
        }
        match cell.to_ascii_lowercase().as_str() {
            "true" => return Some(PropertyValue::Bool(true)),
            "false" => return Some(PropertyValue::Bool(false)),
            _ => {}
        }
        if cell.starts_with('[') {
            if let Ok(items) = serde_json::from_str::<Vec<PropertyValue>>(cell) {
                return Some(PropertyValue::List(items));
            }
        }

        Some(PropertyValue::String(cell.to_string()))
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(items: Vec<String>) -> Self {
        PropertyValue::List(items.into_iter().map(PropertyValue::String).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_literal_coercion() {
        assert_eq!(PropertyValue::from_filter_literal("42"), PropertyValue::Int(42));
        assert_eq!(PropertyValue::from_filter_literal("99.5"), PropertyValue::Float(99.5));
        assert_eq!(
            PropertyValue::from_filter_literal("Component 1"),
            PropertyValue::String("Component 1".to_string())
        );
        // a dot forces the float path; failure falls back to the raw string
        assert_eq!(
            PropertyValue::from_filter_literal("v1.2.3"),
            PropertyValue::String("v1.2.3".to_string())
        );
    }

    #[test]
    fn test_filter_literal_ignores_surrounding_whitespace() {
        assert_eq!(PropertyValue::from_filter_literal(" 42"), PropertyValue::Int(42));
        assert_eq!(PropertyValue::from_filter_literal("7.5 "), PropertyValue::Float(7.5));
        assert_eq!(
            PropertyValue::from_filter_literal(" Audio "),
            PropertyValue::String(" Audio ".to_string())
        );
    }

    #[test]
    fn test_csv_cell_coercion() {
        assert_eq!(PropertyValue::from_csv_cell("7"), Some(PropertyValue::Int(7)));
        assert_eq!(PropertyValue::from_csv_cell("12.50"), Some(PropertyValue::Float(12.5)));
        assert_eq!(PropertyValue::from_csv_cell("True"), Some(PropertyValue::Bool(true)));
        assert_eq!(PropertyValue::from_csv_cell("  "), None);
        assert_eq!(
            PropertyValue::from_csv_cell(r#"["Feature A","Feature C"]"#),
            Some(PropertyValue::from(vec!["Feature A".to_string(), "Feature C".to_string()]))
        );
        assert_eq!(
            PropertyValue::from_csv_cell("2021-03-04"),
            Some(PropertyValue::String("2021-03-04".to_string()))
        );
        // "NaN" parses as f64 but is not a usable graph value
        assert_eq!(
            PropertyValue::from_csv_cell("NaN"),
            Some(PropertyValue::String("NaN".to_string()))
        );
    }

    #[test]
    fn test_json_shapes() {
        let props: Properties = serde_json::from_str(
            r#"{"price": 100.0, "stock": 3, "available": true, "type": "GPU", "tags": ["a", "b"]}"#,
        )
        .unwrap();
        assert_eq!(props["price"], PropertyValue::Float(100.0));
        assert_eq!(props["stock"], PropertyValue::Int(3));
        assert_eq!(props["available"], PropertyValue::Bool(true));
        assert!(props["stock"].is_numeric());
        assert!(!props["available"].is_numeric());

        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["price"], serde_json::json!(100.0));
        assert_eq!(json["tags"], serde_json::json!(["a", "b"]));
    }
}
