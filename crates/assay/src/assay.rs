//! Main pipeline struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clean::{CleanConfig, CleanEngine, CleanReport, NameNormalizer, add_null_flags};
use crate::error::Result;
use crate::input::{LoadOptions, SourceMetadata, load_table};
use crate::quality::{GateConfig, QualityGate, QualityReport, QualityVerdict};
use crate::table::DataTable;

/// Configuration for a full pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssayConfig {
    /// Loader options, passed through to the format-specific reader.
    pub load: LoadOptions,
    /// Cleaning configuration: target columns, vocabulary, rename map.
    pub clean: CleanConfig,
    /// Quality gate configuration: critical columns and threshold.
    pub gate: GateConfig,
}

/// Result of running the pipeline over one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// The cleaned table, flags included.
    pub table: DataTable,
    /// Metadata about the source file (absent for in-memory tables).
    pub source: Option<SourceMetadata>,
    /// Per-pass sanitization change counts.
    pub clean: CleanReport,
    /// Per-column null counts, flag columns excluded.
    pub report: QualityReport,
    /// The gate's verdict. Present only on success; a breach surfaces as
    /// [`crate::AssayError::Quality`] instead.
    pub verdict: QualityVerdict,
}

/// The full ingestion-and-cleaning pipeline.
///
/// Stages run in a fixed order: load, normalize column names, sanitize
/// values, add null flags, compute the quality report, evaluate the gate.
/// The gate is a hard stop: a breach aborts the run with
/// [`crate::AssayError::Quality`] and the dataset should be discarded.
pub struct Assay {
    config: AssayConfig,
    engine: CleanEngine,
    gate: QualityGate,
}

impl Assay {
    /// Create a pipeline with the default (fraud-dataset) configuration.
    pub fn new() -> Self {
        Self::with_config(AssayConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: AssayConfig) -> Self {
        Self {
            config,
            engine: CleanEngine::new(),
            gate: QualityGate::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AssayConfig {
        &self.config
    }

    /// Load a file and run the full pipeline over it.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<PipelineResult> {
        let path = path.as_ref();
        let (table, source) = load_table(path, &self.config.load)?;
        tracing::info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        self.process(table, Some(source))
    }

    /// Run the pipeline over a table the caller already holds.
    pub fn run_table(&self, table: DataTable) -> Result<PipelineResult> {
        self.process(table, None)
    }

    fn process(&self, mut table: DataTable, source: Option<SourceMetadata>) -> Result<PipelineResult> {
        NameNormalizer::new(self.config.clean.rename_map.clone()).apply(&mut table)?;

        let clean = self.engine.apply(&self.config.clean.passes(), &mut table);
        tracing::debug!(values_changed = clean.values_changed, "sanitization complete");

        let flagged = add_null_flags(&mut table);
        tracing::debug!(flag_columns = flagged, "added null flags");

        let report = QualityReport::from_table(&table);
        let verdict = self.gate.evaluate(&table, &self.config.gate)?;

        Ok(PipelineResult {
            table,
            source,
            clean,
            report,
            verdict,
        })
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}
