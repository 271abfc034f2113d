//! Typed, column-major table model.
//!
//! Every pipeline stage operates column by column, so the table stores one
//! [`Column`] per field rather than row-major records. Two invariants hold at
//! every stage: all columns have the same length, and column names are unique.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};

/// A single cell value.
///
/// `Null` is the canonical missing marker: blank strings, the literal text
/// `"nan"` and unparseable cells all normalize to it during cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Check whether this value is the missing marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Infer a typed value from a raw text cell.
    ///
    /// Empty cells become `Null`. Number-looking cells become `Int` or
    /// `Float`. Everything else stays `Text`, including whitespace-only
    /// cells and the literal `"nan"`, which belong to the null-coercion
    /// pass rather than the loader. `f64::from_str` would happily accept
    /// `"nan"` and `"inf"`, so numeric inference additionally requires a
    /// digit and a finite result.
    pub fn infer(raw: &str) -> Value {
        if raw.is_empty() {
            return Value::Null;
        }
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if trimmed.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(f) = trimmed.parse::<f64>() {
                if f.is_finite() {
                    return Value::Float(f);
                }
            }
        }
        Value::Text(raw.to_string())
    }
}

/// A named column of values, one per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Cell values, row-aligned with every other column in the table.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from a name and its values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Count of missing values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

/// An ordered collection of row-aligned, uniquely named columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataTable {
    columns: Vec<Column>,
}

impl DataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, validating row alignment and name
    /// uniqueness.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for col in &columns {
                if col.len() != rows {
                    return Err(AssayError::Malformed(format!(
                        "column '{}' has {} rows, expected {}",
                        col.name,
                        col.len(),
                        rows
                    )));
                }
            }
        }
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(AssayError::Malformed(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// All column names, in table order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// All columns, in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.columns.get(col).and_then(|c| c.values.get(row))
    }

    /// Append a column, validating row alignment and name uniqueness.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if !self.columns.is_empty() && values.len() != self.row_count() {
            return Err(AssayError::Malformed(format!(
                "column '{}' has {} rows, expected {}",
                name,
                values.len(),
                self.row_count()
            )));
        }
        if self.column_index(&name).is_some() {
            return Err(AssayError::Malformed(format!(
                "duplicate column name '{name}'"
            )));
        }
        self.columns.push(Column::new(name, values));
        Ok(())
    }

    /// Replace all column names at once, validating count and uniqueness.
    pub fn rename_columns(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.columns.len() {
            return Err(AssayError::Malformed(format!(
                "{} names for {} columns",
                names.len(),
                self.columns.len()
            )));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(AssayError::Malformed(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }
        for (col, name) in self.columns.iter_mut().zip(names) {
            col.name = name;
        }
        Ok(())
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Append a column whose alignment and name the caller has already
    /// guaranteed.
    pub(crate) fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }
}

/// Make a list of names unique by appending `_2`, `_3`, ... to repeats.
/// The first occurrence keeps the bare name.
pub(crate) fn dedup_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        if seen.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}_{n}");
            if seen.insert(candidate.clone()) {
                out.push(candidate);
                break;
            }
            n += 1;
        }
    }
    out
}
