//! JSON reader for record arrays and column maps.

use indexmap::IndexMap;

use crate::error::{AssayError, Result};
use crate::table::{Column, DataTable, Value, dedup_names};

use super::loader::LoadOptions;

/// Read JSON bytes into a table.
///
/// Two shapes are accepted: an array of objects (one object per row, column
/// order taken from first appearance) and an object of equal-length arrays
/// (one entry per column).
pub(crate) fn read_json(bytes: &[u8], options: &LoadOptions) -> Result<DataTable> {
    let root: serde_json::Value = serde_json::from_slice(bytes)?;

    let columns = match root {
        serde_json::Value::Array(records) => from_records(records, options)?,
        serde_json::Value::Object(map) => from_column_map(map)?,
        _ => {
            return Err(AssayError::Malformed(
                "JSON root must be an array of objects or an object of arrays".to_string(),
            ));
        }
    };

    if columns.is_empty() {
        return Err(AssayError::EmptyData("no columns found".to_string()));
    }

    build_table(columns)
}

fn from_records(
    records: Vec<serde_json::Value>,
    options: &LoadOptions,
) -> Result<IndexMap<String, Vec<Value>>> {
    if records.is_empty() {
        return Err(AssayError::EmptyData("no data rows found".to_string()));
    }

    let take = options.max_rows.unwrap_or(records.len());
    let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();

    for (idx, record) in records.iter().take(take).enumerate() {
        let obj = record.as_object().ok_or_else(|| {
            AssayError::Malformed(format!("JSON record {idx} is not an object"))
        })?;

        // A key first seen here gets nulls for every earlier row.
        for key in obj.keys() {
            columns
                .entry(key.clone())
                .or_insert_with(|| vec![Value::Null; idx]);
        }
        for (name, values) in columns.iter_mut() {
            values.push(obj.get(name).map(json_value).unwrap_or(Value::Null));
        }
    }

    Ok(columns)
}

fn from_column_map(
    map: serde_json::Map<String, serde_json::Value>,
) -> Result<IndexMap<String, Vec<Value>>> {
    let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();
    let mut row_count: Option<usize> = None;

    for (name, entry) in map {
        let array = entry.as_array().ok_or_else(|| {
            AssayError::Malformed(format!("JSON column '{name}' is not an array"))
        })?;
        match row_count {
            None => row_count = Some(array.len()),
            Some(expected) if array.len() != expected => {
                return Err(AssayError::Malformed(format!(
                    "JSON column '{}' has {} rows, expected {}",
                    name,
                    array.len(),
                    expected
                )));
            }
            Some(_) => {}
        }
        columns.insert(name, array.iter().map(json_value).collect());
    }

    Ok(columns)
}

fn build_table(columns: IndexMap<String, Vec<Value>>) -> Result<DataTable> {
    let names = dedup_names(columns.keys().cloned());
    let columns = names
        .into_iter()
        .zip(columns.into_values())
        .map(|(name, values)| Column::new(name, values))
        .collect();
    DataTable::from_columns(columns)
}

fn json_value(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(Value::Float)
                    .unwrap_or(Value::Null)
            }
        }
        serde_json::Value::String(s) => Value::Text(s.clone()),
        // Nested structures are kept as their JSON text.
        other => Value::Text(other.to_string()),
    }
}
