//! Engine that applies sanitization passes to a table.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::table::{DataTable, Value};

use super::passes::{CleanPass, CleanReport, PassChange};

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Datetime formats tried before date-only formats.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Date formats tried in order; day-first comes before month-first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

/// Applies [`CleanPass`] sequences to a table.
pub struct CleanEngine;

impl CleanEngine {
    /// Create a new clean engine.
    pub fn new() -> Self {
        Self
    }

    /// Apply passes in order, returning per-pass change counts.
    pub fn apply(&self, passes: &[CleanPass], table: &mut DataTable) -> CleanReport {
        let mut report = CleanReport::new();
        for pass in passes {
            let change = self.apply_pass(pass, table);
            tracing::debug!(
                pass = %pass.description(),
                changed = change.values_changed,
                "applied sanitization pass"
            );
            report.add_change(change);
        }
        report
    }

    fn apply_pass(&self, pass: &CleanPass, table: &mut DataTable) -> PassChange {
        let values_changed = match pass {
            CleanPass::CoerceBlanks => self.coerce_blanks(table),
            CleanPass::CleanCurrency { column } => {
                map_column(table, column, clean_currency_value)
            }
            CleanPass::ExtractDigits { column } => {
                map_column(table, column, extract_digits_value)
            }
            CleanPass::DecodeScore { column, words } => {
                map_column(table, column, |v| decode_score_value(v, words))
            }
            CleanPass::ParseDates { column } => map_column(table, column, parse_date_value),
            CleanPass::FoldAccents => self.fold_accents(table),
        };
        PassChange {
            description: pass.description(),
            column: pass.column().map(str::to_string),
            values_changed,
        }
    }

    fn coerce_blanks(&self, table: &mut DataTable) -> usize {
        let mut changed = 0;
        for column in table.columns_mut() {
            for value in &mut column.values {
                if let Value::Text(s) = value {
                    if s.trim().is_empty() || s == "nan" {
                        *value = Value::Null;
                        changed += 1;
                    }
                }
            }
        }
        changed
    }

    fn fold_accents(&self, table: &mut DataTable) -> usize {
        let mut changed = 0;
        for column in table.columns_mut() {
            for value in &mut column.values {
                if let Value::Text(s) = value {
                    let folded = fold_ascii(s);
                    if folded != *s {
                        *value = Value::Text(folded);
                        changed += 1;
                    }
                }
            }
        }
        changed
    }
}

impl Default for CleanEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite every cell of a column through `f`, counting changed values.
/// A no-op returning 0 when the column is absent.
fn map_column<F>(table: &mut DataTable, column: &str, f: F) -> usize
where
    F: Fn(&Value) -> Value,
{
    let Some(col) = table.column_mut(column) else {
        return 0;
    };
    let mut changed = 0;
    for value in &mut col.values {
        let next = f(value);
        if next != *value {
            *value = next;
            changed += 1;
        }
    }
    changed
}

fn clean_currency_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Int(i) => Value::Float(*i as f64),
        Value::Float(f) => Value::Float(*f),
        Value::Text(s) => {
            let stripped: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
            parse_number(stripped.trim())
                .map(Value::Float)
                .unwrap_or(Value::Null)
        }
        Value::Bool(_) | Value::DateTime(_) => Value::Null,
    }
}

fn extract_digits_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Int(i) => Value::Int(*i),
        Value::Float(f) => Value::Int(*f as i64),
        Value::Text(s) => DIGIT_RUN_RE
            .find(s)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .map(Value::Int)
            .unwrap_or(Value::Null),
        Value::Bool(_) | Value::DateTime(_) => Value::Null,
    }
}

fn decode_score_value(value: &Value, words: &IndexMap<String, i64>) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Int(i) => Value::Int(*i),
        Value::Float(f) => Value::Float(*f),
        Value::Text(s) => {
            let key = s.trim().to_lowercase();
            if let Some(score) = words.get(&key) {
                return Value::Int(*score);
            }
            if let Ok(i) = key.parse::<i64>() {
                return Value::Int(i);
            }
            parse_number(&key).map(Value::Float).unwrap_or(Value::Null)
        }
        Value::Bool(_) | Value::DateTime(_) => Value::Null,
    }
}

fn parse_date_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::DateTime(dt) => Value::DateTime(*dt),
        Value::Text(s) => parse_datetime(s.trim())
            .map(Value::DateTime)
            .unwrap_or(Value::Null),
        Value::Int(_) | Value::Float(_) | Value::Bool(_) => Value::Null,
    }
}

/// Parse a number, refusing `nan`/`inf` spellings and non-finite results.
fn parse_number(s: &str) -> Option<f64> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Decompose, drop combining marks and keep the ASCII remainder.
fn fold_ascii(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii())
        .collect()
}
