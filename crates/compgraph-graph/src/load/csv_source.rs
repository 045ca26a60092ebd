//! CSV input parsing for the bulk loader.
//!
//! ## Node files
//!
//! ```csv
//! name,model,type,price,available
//! Component 1,M-1,GPU,100.0,true
//! ```
//!
//! One column must be the label's natural key (`name`, or `title` for
//! reviews). Its cells are trimmed and kept as strings; every other cell goes
//! through [`PropertyValue::from_csv_cell`] and empty cells are dropped.
//!
//! ## Relationship files
//!
//! ```csv
//! user,component,purchase_date,quantity,payment_method
//! User 1,Component 3,2020-05-01,2,PayPal
//! ```
//!
//! The first column is the source key and the second the target key,
//! whatever their headers say. Remaining columns are relationship properties.

use std::path::Path;

use compgraph_core::cypher::load::RelationshipRow;
use compgraph_core::{GraphError, GraphResult, Label, Properties, PropertyValue};
use tracing::warn;

/// Read node rows for `label`, skipping rows whose natural key is empty.
pub fn read_node_rows(path: &Path, label: Label) -> GraphResult<Vec<Properties>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let key = label.identifier_key();
    let key_idx = headers.iter().position(|h| h == key).ok_or_else(|| {
        GraphError::validation(format!("{} is missing the '{}' column", path.display(), key))
    })?;

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;

        let key_value = record.get(key_idx).unwrap_or("").trim();
        if key_value.is_empty() {
            // +2 for the header and 1-indexing
            warn!(file = %path.display(), row = row_idx + 2, "Skipping row without {}", key);
            continue;
        }

        let mut properties = Properties::new();
        for (i, header) in headers.iter().enumerate() {
            if i == key_idx {
                properties.insert(header.clone(), PropertyValue::from(key_value));
            } else if let Some(value) = record.get(i).and_then(PropertyValue::from_csv_cell) {
                properties.insert(header.clone(), value);
            }
        }
        rows.push(properties);
    }

    Ok(rows)
}

/// Read relationship rows, skipping rows with an empty endpoint key.
pub fn read_relationship_rows(path: &Path) -> GraphResult<Vec<RelationshipRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    if headers.len() < 2 {
        return Err(GraphError::validation(format!(
            "{} needs source and target columns",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;

        let source = record.get(0).unwrap_or("").trim();
        let target = record.get(1).unwrap_or("").trim();
        if source.is_empty() || target.is_empty() {
            warn!(file = %path.display(), row = row_idx + 2, "Skipping row with an empty endpoint");
            continue;
        }

        let properties = headers
            .iter()
            .enumerate()
            .skip(2)
            .filter_map(|(i, header)| {
                record
                    .get(i)
                    .and_then(PropertyValue::from_csv_cell)
                    .map(|value| (header.clone(), value))
            })
            .collect();

        rows.push(RelationshipRow {
            source: source.to_string(),
            target: target.to_string(),
            properties,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_node_rows_coerce_cells() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "components.csv",
            "name,model,price,stock,available,tags\n\
             Component 1,M-1,100.5,3,TRUE,\"[\"\"gaming\"\",\"\"rgb\"\"]\"\n\
             Component 2,,20,,false,\n",
        );

        let rows = read_node_rows(&path, Label::Component).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], PropertyValue::from("Component 1"));
        assert_eq!(rows[0]["price"], PropertyValue::Float(100.5));
        assert_eq!(rows[0]["stock"], PropertyValue::Int(3));
        assert_eq!(rows[0]["available"], PropertyValue::Bool(true));
        assert_eq!(
            rows[0]["tags"],
            PropertyValue::List(vec![PropertyValue::from("gaming"), PropertyValue::from("rgb")])
        );
        // empty cells are not set
        assert!(!rows[1].contains_key("model"));
        assert!(!rows[1].contains_key("stock"));
        assert_eq!(rows[1]["price"], PropertyValue::Int(20));
    }

    #[test]
    fn test_natural_key_stays_string() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "reviews.csv", "title,rating\n 42 ,5\n,3\n");

        let rows = read_node_rows(&path, Label::Review).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], PropertyValue::from("42"));
        assert_eq!(rows[0]["rating"], PropertyValue::Int(5));
    }

    #[test]
    fn test_missing_key_column() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "reviews.csv", "name,rating\nReview 1,5\n");
        assert!(matches!(read_node_rows(&path, Label::Review), Err(GraphError::Validation(_))));
    }

    #[test]
    fn test_relationship_rows() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "relations_purchase.csv",
            "user,component,purchase_date,quantity,payment_method\n\
             User 1,Component 3,2020-05-01,2,PayPal\n\
             User 2,,2021-01-01,1,Card\n",
        );

        let rows = read_relationship_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source, "User 1");
        assert_eq!(rows[0].target, "Component 3");
        assert_eq!(rows[0].properties["quantity"], PropertyValue::Int(2));
        assert_eq!(rows[0].properties["purchase_date"], PropertyValue::from("2020-05-01"));
        assert!(!rows[0].properties.contains_key("user"));
    }
}
