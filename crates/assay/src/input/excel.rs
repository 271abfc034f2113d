//! Excel workbook reader.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDateTime;

use crate::error::{AssayError, Result};
use crate::table::{Column, DataTable, Value, dedup_names};

use super::loader::LoadOptions;

/// Read a worksheet into a table. The first sheet is used unless
/// [`LoadOptions::sheet`] names another one.
pub(crate) fn read_workbook(path: &Path, options: &LoadOptions) -> Result<DataTable> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match &options.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| AssayError::EmptyData("workbook has no sheets".to_string()))?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    let width = range.width();
    if width == 0 {
        return Err(AssayError::EmptyData(format!("sheet '{sheet}' is empty")));
    }

    let mut rows = range.rows();

    let headers: Vec<String> = if options.has_header {
        let header_row = rows
            .next()
            .ok_or_else(|| AssayError::EmptyData(format!("sheet '{sheet}' is empty")))?;
        header_row.iter().map(header_cell).collect()
    } else {
        (1..=width).map(|i| format!("column_{i}")).collect()
    };

    let headers = dedup_names(headers.into_iter().enumerate().map(|(i, h)| {
        if h.is_empty() { format!("column_{}", i + 1) } else { h }
    }));

    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();

    let mut row_count = 0usize;
    for row in rows {
        if let Some(max) = options.max_rows {
            if row_count >= max {
                break;
            }
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            let value = row.get(idx).map(cell_value).unwrap_or(Value::Null);
            column.values.push(value);
        }
        row_count += 1;
    }

    if row_count == 0 {
        return Err(AssayError::EmptyData(format!(
            "sheet '{sheet}' has no data rows"
        )));
    }

    DataTable::from_columns(columns)
}

fn header_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Map a workbook cell to a typed value. Numbers, booleans and datetimes
/// carry their native type; error cells degrade to null.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) if f.is_finite() => Value::Float(*f),
        Data::Float(_) => Value::Null,
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTime(dt) => dt.as_datetime().map(Value::DateTime).unwrap_or(Value::Null),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(Value::DateTime)
            .unwrap_or_else(|_| Value::Text(s.clone())),
        Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(_) => Value::Null,
    }
}
