//! Typed in-memory tables with an explicit inner join.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Name of the entity-identifier column shared by extracted tables and
/// metadata.
pub const KEY_COLUMN: &str = "key";

/// A single cell value.
///
/// Join equality and CSV output both go through the rendered form, so an
/// integer key and its string spelling identify the same entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value; renders as an empty CSV field.
    Null,
    /// Whole number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(String),
}

impl Value {
    /// Numeric view of the value, when it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// String view of the value, when it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

static NULL: Value = Value::Null;

/// An in-memory table: ordered column names plus row-major typed cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column names as string slices.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.as_str()).collect()
    }

    /// Rows, in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name (first match).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// A specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All values of a column by name.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).unwrap_or(&NULL))
                .collect(),
        )
    }

    /// All values of a column, rendered to strings.
    pub fn column_strings(&self, name: &str) -> Option<Vec<String>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map(|v| v.to_string()).unwrap_or_default())
                .collect(),
        )
    }

    /// Inner join with another table on the named key column.
    ///
    /// Output columns are this table's columns followed by `other`'s columns
    /// with the key deduplicated; rows keep this table's order and only
    /// entities whose key appears in both tables survive. Key values are
    /// compared by their rendered form; when `other` holds duplicate keys the
    /// first occurrence wins (uniqueness is assumed upstream).
    pub fn inner_join(&self, other: &Table, key: &str) -> Result<Table> {
        let left_key = self
            .column_index(key)
            .ok_or_else(|| ExportError::MissingColumn(key.to_string()))?;
        let right_key = other
            .column_index(key)
            .ok_or_else(|| ExportError::MissingColumn(key.to_string()))?;

        let mut columns = self.columns.clone();
        columns.extend(
            other
                .columns
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != right_key)
                .map(|(_, c)| c.clone()),
        );

        let mut lookup: IndexMap<String, usize> = IndexMap::with_capacity(other.rows.len());
        for (index, row) in other.rows.iter().enumerate() {
            let rendered = row.get(right_key).map(|v| v.to_string()).unwrap_or_default();
            lookup.entry(rendered).or_insert(index);
        }

        let mut joined = Table::new(columns);
        for row in &self.rows {
            let rendered = row.get(left_key).map(|v| v.to_string()).unwrap_or_default();
            let Some(&match_index) = lookup.get(&rendered) else {
                continue;
            };

            let mut out = row.clone();
            let other_row = &other.rows[match_index];
            out.extend(
                (0..other.columns.len())
                    .filter(|i| *i != right_key)
                    .map(|i| other_row.get(i).cloned().unwrap_or(Value::Null)),
            );
            joined.push_row(out);
        }

        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(columns: Vec<&str>, rows: Vec<Vec<Value>>) -> Table {
        let mut table = Table::new(columns.into_iter().map(String::from).collect());
        for row in rows {
            table.push_row(row);
        }
        table
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Float(0.9).to_string(), "0.9");
        assert_eq!(Value::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_column_lookup() {
        let table = make_table(
            vec!["key", "lat"],
            vec![vec![Value::from("A"), Value::from(48.2)]],
        );

        assert_eq!(table.column_index("lat"), Some(1));
        assert!(table.has_column("key"));
        assert!(!table.has_column("lon"));
        assert_eq!(table.column_strings("key"), Some(vec!["A".to_string()]));
    }

    #[test]
    fn test_inner_join_keeps_left_order_and_dedupes_key() {
        let left = make_table(
            vec!["key", "PC1"],
            vec![
                vec![Value::from("B"), Value::from(0.2)],
                vec![Value::from("A"), Value::from(0.1)],
            ],
        );
        let right = make_table(
            vec!["key", "lat", "lon"],
            vec![
                vec![Value::from("A"), Value::from(48.2), Value::from(16.4)],
                vec![Value::from("B"), Value::from(59.3), Value::from(18.1)],
            ],
        );

        let joined = left.inner_join(&right, "key").unwrap();
        assert_eq!(joined.column_names(), ["key", "PC1", "lat", "lon"]);
        assert_eq!(joined.row_count(), 2);
        // left (analysis-native) order, not key order
        assert_eq!(joined.get(0, 0), Some(&Value::from("B")));
        assert_eq!(joined.get(0, 2), Some(&Value::from(59.3)));
    }

    #[test]
    fn test_inner_join_drops_unmatched_rows() {
        let left = make_table(
            vec!["key", "PC1"],
            vec![
                vec![Value::from("A"), Value::from(0.1)],
                vec![Value::from("C"), Value::from(0.3)],
            ],
        );
        let right = make_table(
            vec!["key", "lat"],
            vec![vec![Value::from("A"), Value::from(48.2)]],
        );

        let joined = left.inner_join(&right, "key").unwrap();
        assert_eq!(joined.row_count(), 1);
        assert_eq!(joined.get(0, 0), Some(&Value::from("A")));
    }

    #[test]
    fn test_inner_join_empty_intersection_is_empty_table() {
        let left = make_table(vec!["key"], vec![vec![Value::from("A")]]);
        let right = make_table(vec!["key"], vec![vec![Value::from("Z")]]);

        let joined = left.inner_join(&right, "key").unwrap();
        assert!(joined.is_empty());
        assert_eq!(joined.column_names(), ["key"]);
    }

    #[test]
    fn test_inner_join_compares_rendered_keys() {
        let left = make_table(vec!["key"], vec![vec![Value::Int(7)]]);
        let right = make_table(
            vec!["key", "lat"],
            vec![vec![Value::from("7"), Value::from(1.0)]],
        );

        let joined = left.inner_join(&right, "key").unwrap();
        assert_eq!(joined.row_count(), 1);
    }

    #[test]
    fn test_inner_join_missing_key_column() {
        let left = make_table(vec!["key"], vec![vec![Value::from("A")]]);
        let right = make_table(vec!["lat"], vec![vec![Value::from(48.2)]]);

        let err = left.inner_join(&right, "key").unwrap_err();
        assert!(matches!(err, ExportError::MissingColumn(c) if c == "key"));
    }
}
