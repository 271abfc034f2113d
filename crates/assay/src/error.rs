//! Error types for the assay library.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A critical column whose null rate exceeded the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    /// Affected column name.
    pub column: String,
    /// Observed null fraction (0.0-1.0).
    pub null_fraction: f64,
    /// Configured threshold the fraction exceeded.
    pub threshold: f64,
}

impl std::fmt::Display for Breach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "column '{}' has {:.1}% null values (allowed: {:.0}%)",
            self.column,
            self.null_fraction * 100.0,
            self.threshold * 100.0
        )
    }
}

fn format_breaches(breaches: &[Breach]) -> String {
    breaches
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main error type for assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading an Excel workbook.
    #[error("Workbook error: {0}")]
    Excel(#[from] calamine::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Structurally invalid input (misaligned columns, wrong JSON shape).
    #[error("Malformed data: {0}")]
    Malformed(String),

    /// A critical column required by the quality gate is absent.
    #[error("critical columns missing: {}", .columns.join(", "))]
    CriticalColumnsMissing { columns: Vec<String> },

    /// Quality gate rejected the dataset. Terminal: the dataset should be
    /// discarded, not retried or patched.
    #[error("dataset rejected by quality gate: {}", format_breaches(.breaches))]
    Quality { breaches: Vec<Breach> },
}

/// Result type alias for assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breach_display() {
        let breach = Breach {
            column: "monto".to_string(),
            null_fraction: 0.6,
            threshold: 0.5,
        };
        let text = breach.to_string();
        assert!(text.contains("monto"));
        assert!(text.contains("60.0%"));
        assert!(text.contains("50%"));
    }

    #[test]
    fn test_quality_error_lists_all_breaches() {
        let err = AssayError::Quality {
            breaches: vec![
                Breach {
                    column: "fraude".to_string(),
                    null_fraction: 0.25,
                    threshold: 0.1,
                },
                Breach {
                    column: "monto".to_string(),
                    null_fraction: 0.4,
                    threshold: 0.1,
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("fraude"));
        assert!(text.contains("monto"));
    }
}
