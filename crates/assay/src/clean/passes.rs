//! Sanitization passes and their configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A column-scoped sanitization pass.
///
/// Every pass is independent and idempotent, and a no-op when its target
/// column is absent. Parse failures inside a pass coerce the cell to null,
/// never to an error: malformed cells degrade to missing data rather than
/// aborting the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CleanPass {
    /// Turn empty, whitespace-only and literal `"nan"` text into null.
    CoerceBlanks,

    /// Strip currency symbols and thousands separators, then parse the
    /// amount as a float.
    CleanCurrency { column: String },

    /// Keep the first run of digits and parse it as an integer.
    ExtractDigits { column: String },

    /// Map number-words to integers, then parse remaining values as
    /// numbers.
    DecodeScore {
        column: String,
        words: IndexMap<String, i64>,
    },

    /// Parse date strings to datetime values.
    ParseDates { column: String },

    /// Fold accented text to plain ASCII in every text cell.
    FoldAccents,
}

impl CleanPass {
    /// Get a human-readable description of the pass.
    pub fn description(&self) -> String {
        match self {
            CleanPass::CoerceBlanks => "coerce blank and 'nan' text to null".to_string(),
            CleanPass::CleanCurrency { column } => {
                format!("clean currency amounts in '{column}'")
            }
            CleanPass::ExtractDigits { column } => {
                format!("extract numeric code from '{column}'")
            }
            CleanPass::DecodeScore { column, .. } => format!("decode scores in '{column}'"),
            CleanPass::ParseDates { column } => format!("parse dates in '{column}'"),
            CleanPass::FoldAccents => "fold accented text to ascii".to_string(),
        }
    }

    /// The column this pass targets, if it is column-scoped.
    pub fn column(&self) -> Option<&str> {
        match self {
            CleanPass::CleanCurrency { column }
            | CleanPass::ExtractDigits { column }
            | CleanPass::DecodeScore { column, .. }
            | CleanPass::ParseDates { column } => Some(column),
            CleanPass::CoerceBlanks | CleanPass::FoldAccents => None,
        }
    }
}

/// A single pass applied during cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassChange {
    /// Description of the pass.
    pub description: String,
    /// Target column, when the pass is column-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Number of cell values rewritten.
    pub values_changed: usize,
}

/// Result of applying a sequence of sanitization passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanReport {
    /// Number of passes applied.
    pub passes_applied: usize,
    /// Total number of cell values rewritten.
    pub values_changed: usize,
    /// Detailed change record for each pass.
    pub changes: Vec<PassChange>,
}

impl CleanReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one applied pass.
    pub fn add_change(&mut self, change: PassChange) {
        self.passes_applied += 1;
        self.values_changed += change.values_changed;
        self.changes.push(change);
    }
}

/// Cleaning configuration: target column names, the score vocabulary and
/// the synonym rename map.
///
/// The defaults are the canonical fraud-dataset configuration; callers with
/// differently shaped data override the fields rather than editing any
/// hard-coded literals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Synonym map applied after name normalization.
    pub rename_map: IndexMap<String, String>,
    /// Column holding monetary amounts.
    pub amount_column: String,
    /// Column holding raw customer identifiers with embedded digits.
    pub customer_column: String,
    /// Column holding scores, possibly spelled as number-words.
    pub score_column: String,
    /// Column holding registration dates.
    pub date_column: String,
    /// Number-word vocabulary for score decoding.
    pub score_words: IndexMap<String, i64>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        let rename_map = IndexMap::from([
            ("score_15".to_string(), "score".to_string()),
            ("es_fraude".to_string(), "fraude".to_string()),
            ("notes_comments".to_string(), "comentarios".to_string()),
        ]);
        let score_words = IndexMap::from([
            ("uno".to_string(), 1),
            ("dos".to_string(), 2),
            ("tres".to_string(), 3),
            ("cuatro".to_string(), 4),
            ("cinco".to_string(), 5),
        ]);
        Self {
            rename_map,
            amount_column: "monto".to_string(),
            customer_column: "nombre_cliente_raw".to_string(),
            score_column: "score".to_string(),
            date_column: "fecha_registro".to_string(),
            score_words,
        }
    }
}

impl CleanConfig {
    /// Build the standard pass sequence for this configuration.
    pub fn passes(&self) -> Vec<CleanPass> {
        vec![
            CleanPass::CoerceBlanks,
            CleanPass::CleanCurrency {
                column: self.amount_column.clone(),
            },
            CleanPass::ExtractDigits {
                column: self.customer_column.clone(),
            },
            CleanPass::DecodeScore {
                column: self.score_column.clone(),
                words: self.score_words.clone(),
            },
            CleanPass::ParseDates {
                column: self.date_column.clone(),
            },
            CleanPass::FoldAccents,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pass_sequence() {
        let passes = CleanConfig::default().passes();
        assert_eq!(passes.len(), 6);
        assert!(matches!(passes[0], CleanPass::CoerceBlanks));
        assert!(matches!(passes[5], CleanPass::FoldAccents));
        assert_eq!(passes[1].column(), Some("monto"));
        assert_eq!(passes[4].column(), Some("fecha_registro"));
    }

    #[test]
    fn test_report_accumulates() {
        let mut report = CleanReport::new();
        report.add_change(PassChange {
            description: "a".to_string(),
            column: None,
            values_changed: 3,
        });
        report.add_change(PassChange {
            description: "b".to_string(),
            column: Some("monto".to_string()),
            values_changed: 2,
        });
        assert_eq!(report.passes_applied, 2);
        assert_eq!(report.values_changed, 5);
    }
}
