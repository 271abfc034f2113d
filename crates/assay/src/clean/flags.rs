//! Null-flag companion columns.

use crate::table::{Column, DataTable, Value};

/// Suffix marking derived null-flag columns.
pub const NULL_FLAG_SUFFIX: &str = "_nan";

/// Append a `{name}_nan` integer column for every source column, holding 1
/// where the source value is null and 0 elsewhere. Returns the number of
/// flag columns written.
///
/// Idempotent: source columns are snapshotted before any flag is written,
/// existing flag columns are recomputed in place, and flag columns are
/// never themselves flagged. Must run after sanitization so the flags
/// reflect final nullness.
pub fn add_null_flags(table: &mut DataTable) -> usize {
    let sources: Vec<String> = table
        .names()
        .iter()
        .filter(|name| !name.ends_with(NULL_FLAG_SUFFIX))
        .map(|name| name.to_string())
        .collect();

    let mut written = 0;
    for source in sources {
        let Some(column) = table.column(&source) else {
            continue;
        };
        let flags: Vec<Value> = column
            .values
            .iter()
            .map(|v| Value::Int(i64::from(v.is_null())))
            .collect();

        let flag_name = format!("{source}{NULL_FLAG_SUFFIX}");
        match table.column_mut(&flag_name) {
            Some(existing) => existing.values = flags,
            None => table.push_column(Column::new(flag_name, flags)),
        }
        written += 1;
    }
    written
}
