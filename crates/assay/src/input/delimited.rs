//! Delimited-text reader with delimiter auto-detection.

use std::io::{BufRead, BufReader};

use crate::error::{AssayError, Result};
use crate::table::{Column, DataTable, Value, dedup_names};

use super::loader::LoadOptions;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parse delimited bytes into a table, returning the detected format label.
pub(crate) fn read_delimited(
    bytes: &[u8],
    options: &LoadOptions,
) -> Result<(DataTable, &'static str)> {
    let delimiter = match options.delimiter {
        Some(d) => d,
        None => detect_delimiter(bytes)?,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(options.quote)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    if raw_rows.is_empty() {
        return Err(AssayError::EmptyData("no rows found".to_string()));
    }

    let headers = if options.has_header {
        raw_rows.remove(0)
    } else {
        (1..=raw_rows[0].len()).map(|i| format!("column_{i}")).collect()
    };

    if headers.is_empty() {
        return Err(AssayError::EmptyData("no columns found".to_string()));
    }
    if raw_rows.is_empty() {
        return Err(AssayError::EmptyData("no data rows found".to_string()));
    }

    if let Some(max) = options.max_rows {
        raw_rows.truncate(max);
    }

    // Blank header cells get positional names before deduplication.
    let headers = dedup_names(headers.into_iter().enumerate().map(|(i, h)| {
        let h = h.trim().to_string();
        if h.is_empty() { format!("column_{}", i + 1) } else { h }
    }));

    let width = headers.len();
    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|name| Column::new(name, Vec::with_capacity(raw_rows.len())))
        .collect();

    // Ragged rows are padded with empty cells and over-long rows truncated,
    // keeping every column row-aligned.
    for row in &raw_rows {
        for (idx, column) in columns.iter_mut().enumerate().take(width) {
            let cell = row.get(idx).map(String::as_str).unwrap_or("");
            column.values.push(Value::infer(cell));
        }
    }

    let format = match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    };

    Ok((DataTable::from_columns(columns)?, format))
}

/// Detect the delimiter by analyzing the first few lines.
///
/// A candidate that appears the same number of times on every sampled line
/// wins; ties go to the higher per-line count, with a slight preference for
/// tab since it is rare inside actual values.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AssayError::EmptyData("no lines to analyze".to_string()));
    }

    let mut best = b',';
    let mut best_score = 0usize;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first);
        let score = if consistent {
            first * 1000 + usize::from(delim == b'\t') * 100
        } else {
            first
        };

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    Ok(best)
}

/// Count delimiter occurrences in a line, respecting double quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
