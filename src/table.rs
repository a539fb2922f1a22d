use std::fmt;

use rusqlite::types::ValueRef;
use serde_json::Value;

/// One cell of a rendered result. Blobs are summarized, never shown raw.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(usize),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(v) => Some(*v as f64),
            Cell::Real(v) => Some(*v),
            Cell::Text(v) => v.trim().parse::<f64>().ok(),
            Cell::Null | Cell::Blob(_) => None,
        }
    }

    /// Text used for exports: NULL becomes an empty string.
    pub fn export_text(&self) -> String {
        match self {
            Cell::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn from_sql(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(v) => Cell::Integer(v),
            ValueRef::Real(v) => Cell::Real(v),
            ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Cell::Blob(bytes.len()),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Text(b.to_string()),
            Value::Number(n) => n
                .as_i64()
                .map(Cell::Integer)
                .or_else(|| n.as_f64().map(Cell::Real))
                .unwrap_or_else(|| Cell::Text(n.to_string())),
            Value::String(s) => Cell::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Cell::Text(value.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("None"),
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Real(v) => write!(f, "{v}"),
            Cell::Text(v) => f.write_str(v),
            Cell::Blob(len) => write!(f, "<blob {len} bytes>"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Pairs of (label, value) for charting; rows with a non-numeric value are skipped.
    pub fn series(&self, label_col: &str, value_col: &str) -> Vec<(String, f64)> {
        let (Some(label_idx), Some(value_idx)) =
            (self.column_index(label_col), self.column_index(value_col))
        else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| {
                let value = row.get(value_idx)?.as_f64()?;
                let label = row.get(label_idx).map(|c| c.to_string()).unwrap_or_default();
                Some((label, value))
            })
            .collect()
    }

    /// Display width per column (header included), capped at `max`.
    pub fn column_widths(&self, max: usize) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.to_string().chars().count())
                    .max()
                    .unwrap_or(0);
                widest.max(name.chars().count()).min(max)
            })
            .collect()
    }
}
