//! In-memory CSV table.

use std::path::{Path, PathBuf};

use compgraph_core::GraphResult;

/// Headers plus rows of already-formatted cells, bound to an output file name.
#[derive(Debug, Clone)]
pub struct Table {
    pub file: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(file: &'static str, headers: &[&'static str]) -> Self {
        Self {
            file,
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len(), "row width for {}", self.file);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, in row order.
    pub fn column(&self, header: &str) -> Vec<&str> {
        match self.headers.iter().position(|h| *h == header) {
            Some(idx) => self.rows.iter().map(|row| row[idx].as_str()).collect(),
            None => Vec::new(),
        }
    }

    /// Write to `dir/<file>`, overwriting any previous file.
    pub fn write_to(&self, dir: &Path) -> GraphResult<PathBuf> {
        let path = dir.join(self.file);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(path)
    }
}

/// Fixed two-decimal rendering for prices and percentages.
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// JSON array rendering for list-valued cells.
pub fn list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
