//! Assay: tabular-data ingestion and cleaning with a null-rate quality gate.
//!
//! Assay loads a file of records (delimited text, spreadsheet or JSON),
//! normalizes column names and value encodings, flags missing data, and
//! applies a quality gate that decides whether the resulting dataset is
//! usable for downstream modeling.
//!
//! # Core Principles
//!
//! - **Lenient values**: malformed cells degrade to the null marker, never
//!   to an error
//! - **Strict structure**: unsupported formats and gate breaches fail hard
//!   and immediately
//! - **Structured results**: reports and verdicts are returned values, not
//!   console output
//!
//! # Example
//!
//! ```no_run
//! use assay::Assay;
//!
//! let assay = Assay::new();
//! let result = assay.run("clientes.csv").unwrap();
//!
//! println!("rows: {}", result.table.row_count());
//! for (column, nulls) in &result.report.null_counts {
//!     println!("{column}: {nulls} missing");
//! }
//! ```
//!
//! A gate breach surfaces as [`AssayError::Quality`], distinct from every
//! parse or format error, so callers can special-case "dataset rejected"
//! against "dataset malformed".

pub mod clean;
pub mod error;
pub mod input;
pub mod quality;
pub mod table;

mod assay;

pub use crate::assay::{Assay, AssayConfig, PipelineResult};
pub use clean::{
    CleanConfig, CleanEngine, CleanPass, CleanReport, NULL_FLAG_SUFFIX, NameNormalizer,
    PassChange, add_null_flags, normalize_name,
};
pub use error::{AssayError, Breach, Result};
pub use input::{LoadOptions, SourceMetadata, load_table};
pub use quality::{CriticalRate, GateConfig, QualityGate, QualityReport, QualityVerdict};
pub use table::{Column, DataTable, Value};
