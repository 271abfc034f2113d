//! Extension-dispatched table loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AssayError, Result};
use crate::table::DataTable;

use super::source::SourceMetadata;
use super::{delimited, excel, json};

/// Format-specific loading options, passed through opaquely to the reader
/// for the detected format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Delimiter for delimited text (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character for delimited text.
    pub quote: u8,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Worksheet name for Excel workbooks (None = first sheet).
    pub sheet: Option<String>,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            has_header: true,
            sheet: None,
            max_rows: None,
        }
    }
}

/// Load a tabular file, dispatching on its extension.
///
/// Recognized extensions are `csv`, `txt` (treated as csv), `xlsx`, `xls`
/// and `json`; anything else fails with
/// [`AssayError::UnsupportedFormat`] immediately, with no fallback.
pub fn load_table(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<(DataTable, SourceMetadata)> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let bytes = fs::read(path).map_err(|e| AssayError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let hash = format!("sha256:{:x}", hasher.finalize());
    let size_bytes = bytes.len() as u64;

    let (table, format) = match ext.as_str() {
        "csv" | "txt" => delimited::read_delimited(&bytes, options)?,
        "xlsx" => (excel::read_workbook(path, options)?, "xlsx"),
        "xls" => (excel::read_workbook(path, options)?, "xls"),
        "json" => (json::read_json(&bytes, options)?, "json"),
        _ => return Err(AssayError::UnsupportedFormat(ext)),
    };

    tracing::debug!(
        path = %path.display(),
        format,
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );

    let source = SourceMetadata::new(
        path.to_path_buf(),
        hash,
        size_bytes,
        format,
        table.row_count(),
        table.column_count(),
    );

    Ok((table, source))
}
