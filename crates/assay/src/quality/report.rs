//! Per-column null-count report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::clean::NULL_FLAG_SUFFIX;
use crate::table::DataTable;

/// Diagnostic summary of missing values per raw column.
///
/// Generated `_nan` flag columns are excluded: they are derived bookkeeping,
/// not raw data. The report is independent of the gate's pass/fail decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Number of rows in the table.
    pub row_count: usize,
    /// Null count per column, in table order.
    pub null_counts: IndexMap<String, usize>,
}

impl QualityReport {
    /// Compute the report for a table.
    pub fn from_table(table: &DataTable) -> Self {
        let mut null_counts = IndexMap::new();
        for column in table.columns() {
            if column.name.ends_with(NULL_FLAG_SUFFIX) {
                continue;
            }
            null_counts.insert(column.name.clone(), column.null_count());
        }
        Self {
            row_count: table.row_count(),
            null_counts,
        }
    }

    /// Null fraction for a column, if present in the report.
    pub fn null_fraction(&self, column: &str) -> Option<f64> {
        let count = *self.null_counts.get(column)?;
        if self.row_count == 0 {
            Some(0.0)
        } else {
            Some(count as f64 / self.row_count as f64)
        }
    }
}
