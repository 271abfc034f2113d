//! Threshold-based accept/reject decision over critical-column null rates.

use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Breach, Result};
use crate::table::DataTable;

/// Configuration for the quality gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Columns whose missingness directly threatens downstream model
    /// validity.
    pub critical_columns: Vec<String>,
    /// Maximum tolerated null fraction. A column fails only strictly above
    /// this value.
    pub threshold: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            critical_columns: vec!["fraude".to_string(), "monto".to_string()],
            threshold: 0.10,
        }
    }
}

/// Null rate of one critical column, as inspected by the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalRate {
    /// Column name.
    pub column: String,
    /// Null fraction (0.0-1.0).
    pub null_fraction: f64,
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityVerdict {
    /// Whether every inspected critical column stayed at or below the
    /// threshold.
    pub passed: bool,
    /// Human-readable alert lines (breach details, or a pass confirmation).
    pub alerts: Vec<String>,
    /// Null rates of the inspected critical columns.
    pub rates: Vec<CriticalRate>,
}

/// The accept/reject decision over critical-column null rates.
pub struct QualityGate;

impl QualityGate {
    /// Create a new quality gate.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the gate, failing hard on a breach.
    ///
    /// Absent critical columns are silently skipped. Any present critical
    /// column whose null fraction strictly exceeds the threshold makes the
    /// whole evaluation fail with [`AssayError::Quality`], the terminal
    /// "discard this dataset" signal; the error carries every offending
    /// column with its fraction and the threshold.
    pub fn evaluate(&self, table: &DataTable, config: &GateConfig) -> Result<QualityVerdict> {
        let rates = critical_rates(table, config);
        let breaches = find_breaches(&rates, config.threshold);

        if !breaches.is_empty() {
            tracing::warn!(breaches = breaches.len(), "quality gate rejected dataset");
            return Err(AssayError::Quality { breaches });
        }

        Ok(QualityVerdict {
            passed: true,
            alerts: vec![format!(
                "all critical columns at or below {:.0}% null values; dataset is fit for modeling",
                config.threshold * 100.0
            )],
            rates,
        })
    }

    /// Evaluate the gate without treating a breach as an error.
    ///
    /// Unlike [`QualityGate::evaluate`], every configured critical column
    /// must be present; missing ones fail with
    /// [`AssayError::CriticalColumnsMissing`]. Breaches are reported through
    /// `passed` and the alert lines instead of an error.
    pub fn check(&self, table: &DataTable, config: &GateConfig) -> Result<QualityVerdict> {
        let missing: Vec<String> = config
            .critical_columns
            .iter()
            .filter(|name| table.column_index(name).is_none())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(AssayError::CriticalColumnsMissing { columns: missing });
        }

        let rates = critical_rates(table, config);
        let breaches = find_breaches(&rates, config.threshold);
        let passed = breaches.is_empty();

        let alerts = if passed {
            vec![format!(
                "all critical columns at or below {:.0}% null values; dataset is fit for modeling",
                config.threshold * 100.0
            )]
        } else {
            breaches.iter().map(|b| b.to_string()).collect()
        };

        Ok(QualityVerdict {
            passed,
            alerts,
            rates,
        })
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Null rates of the critical columns present in the table. An empty table
/// yields 0.0 fractions and therefore cannot breach.
fn critical_rates(table: &DataTable, config: &GateConfig) -> Vec<CriticalRate> {
    let rows = table.row_count();
    config
        .critical_columns
        .iter()
        .filter_map(|name| {
            let column = table.column(name)?;
            let null_fraction = if rows == 0 {
                0.0
            } else {
                column.null_count() as f64 / rows as f64
            };
            Some(CriticalRate {
                column: name.clone(),
                null_fraction,
            })
        })
        .collect()
}

fn find_breaches(rates: &[CriticalRate], threshold: f64) -> Vec<Breach> {
    rates
        .iter()
        .filter(|r| r.null_fraction > threshold)
        .map(|r| Breach {
            column: r.column.clone(),
            null_fraction: r.null_fraction,
            threshold,
        })
        .collect()
}
