//! Export orchestration: dispatch, merge, and persistence.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::diagnostics::Diagnostic;
use crate::error::{ExportError, Result};
use crate::extract::{DiscriminantExtractor, Extractor, OrdinationExtractor, SpatialExtractor};
use crate::metadata::{validate_metadata, REQUIRED_COLUMNS};
use crate::table::{Table, KEY_COLUMN};
use crate::writer;

/// Options controlling a single export call.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Whether to persist the merged table.
    pub write_file: bool,
    /// Output path; `None` synthesizes a timestamped name.
    pub out_file: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            write_file: true,
            out_file: None,
        }
    }
}

impl ExportConfig {
    /// Configuration that skips the file write.
    pub fn in_memory() -> Self {
        Self {
            write_file: false,
            out_file: None,
        }
    }

    /// Configuration writing to an explicit path.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            write_file: true,
            out_file: Some(path.into()),
        }
    }
}

/// Counts describing a finished export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Entities present in both the analysis and the metadata.
    pub entities_exported: usize,
    /// Entities from the analysis dropped for lack of metadata.
    pub entities_dropped: usize,
    /// Columns derived from the analysis, including `key`.
    pub analysis_columns: usize,
    /// Metadata columns carried through, without the deduplicated `key`.
    pub metadata_columns: usize,
}

/// Everything produced by one export call.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    /// The merged table, identical whether or not a file was written.
    pub table: Table,
    /// Side-channel notices and warnings.
    pub diagnostics: Vec<Diagnostic>,
    /// Counts for quick inspection.
    pub summary: ExportSummary,
    /// Where the table was written, when it was.
    pub written_to: Option<PathBuf>,
    /// When the export finished.
    pub exported_at: DateTime<Utc>,
}

impl ExportOutcome {
    /// Warning-level diagnostics only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Dispatches analysis results to extraction strategies and merges the
/// extracted scores with per-entity metadata.
pub struct Exporter {
    extractors: Vec<Box<dyn Extractor>>,
}

impl Exporter {
    /// An exporter with the three built-in strategies registered.
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(OrdinationExtractor),
                Box::new(DiscriminantExtractor),
                Box::new(SpatialExtractor),
            ],
        }
    }

    /// An exporter with a custom strategy registry.
    pub fn with_extractors(extractors: Vec<Box<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    /// Export with default options: write to a synthesized file name.
    pub fn export(&self, analysis: &AnalysisResult, metadata: &Table) -> Result<ExportOutcome> {
        self.export_with(analysis, metadata, &ExportConfig::default())
    }

    /// Export with explicit options.
    ///
    /// Sequence: dispatch to the strategy registered for the analysis
    /// variant, extract, validate metadata against the extracted keys, merge
    /// with inner-join semantics on `key`, then optionally write. An empty
    /// intersection yields an empty table, not an error.
    pub fn export_with(
        &self,
        analysis: &AnalysisResult,
        metadata: &Table,
        config: &ExportConfig,
    ) -> Result<ExportOutcome> {
        let extracted = self.dispatch(analysis)?.extract(analysis)?;

        let reference_keys = extracted
            .column_strings(KEY_COLUMN)
            .ok_or_else(|| ExportError::MissingColumn(KEY_COLUMN.to_string()))?;

        let mut diagnostics = validate_metadata(metadata, &reference_keys, &REQUIRED_COLUMNS)?;

        let table = extracted.inner_join(metadata, KEY_COLUMN)?;

        let summary = ExportSummary {
            entities_exported: table.row_count(),
            entities_dropped: extracted.row_count() - table.row_count(),
            analysis_columns: extracted.column_count(),
            metadata_columns: table.column_count() - extracted.column_count(),
        };

        let written_to = if config.write_file {
            let path = config
                .out_file
                .clone()
                .unwrap_or_else(writer::default_output_path);
            writer::write_csv(&table, &path)?;
            diagnostics.push(Diagnostic::file_written(&path));
            Some(path)
        } else {
            None
        };

        Ok(ExportOutcome {
            table,
            diagnostics,
            summary,
            written_to,
            exported_at: Utc::now(),
        })
    }

    /// Find the strategy registered for this analysis variant.
    fn dispatch(&self, analysis: &AnalysisResult) -> Result<&dyn Extractor> {
        self.extractors
            .iter()
            .find(|extractor| extractor.kind() == analysis.kind())
            .map(|extractor| extractor.as_ref())
            .ok_or_else(|| ExportError::UnsupportedAnalysis {
                kind: analysis.kind().label().to_string(),
            })
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{OrdinationResult, ScoreMatrix};
    use crate::diagnostics::DiagnosticKind;
    use crate::table::Value;

    fn make_analysis() -> AnalysisResult {
        AnalysisResult::Ordination(OrdinationResult {
            keys: vec!["A".to_string(), "B".to_string()],
            scores: ScoreMatrix::from_rows(vec![vec![0.1, -0.4], vec![0.7, 0.2]]),
        })
    }

    fn make_metadata(keys: Vec<&str>) -> Table {
        let mut table = Table::new(
            ["key", "lat", "lon"].into_iter().map(String::from).collect(),
        );
        for (index, key) in keys.into_iter().enumerate() {
            table.push_row(vec![
                Value::from(key),
                Value::Float(40.0 + index as f64),
                Value::Float(10.0 + index as f64),
            ]);
        }
        table
    }

    #[test]
    fn test_empty_registry_is_unsupported() {
        let exporter = Exporter::with_extractors(Vec::new());

        let err = exporter
            .export_with(&make_analysis(), &make_metadata(vec!["A"]), &ExportConfig::in_memory())
            .unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedAnalysis { kind } if kind == "ordination"));
    }

    #[test]
    fn test_merged_columns_and_summary() {
        let outcome = Exporter::new()
            .export_with(
                &make_analysis(),
                &make_metadata(vec!["A", "B"]),
                &ExportConfig::in_memory(),
            )
            .unwrap();

        assert_eq!(outcome.table.column_names(), ["key", "PC1", "PC2", "lat", "lon"]);
        assert_eq!(outcome.summary.entities_exported, 2);
        assert_eq!(outcome.summary.entities_dropped, 0);
        assert_eq!(outcome.summary.analysis_columns, 3);
        assert_eq!(outcome.summary.metadata_columns, 2);
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.written_to.is_none());
    }

    #[test]
    fn test_coverage_gap_warns_and_drops() {
        let outcome = Exporter::new()
            .export_with(
                &make_analysis(),
                &make_metadata(vec!["A"]),
                &ExportConfig::in_memory(),
            )
            .unwrap();

        assert_eq!(outcome.table.row_count(), 1);
        assert_eq!(outcome.summary.entities_dropped, 1);
        assert_eq!(outcome.warnings().count(), 1);
    }

    #[test]
    fn test_empty_intersection_yields_empty_table() {
        let outcome = Exporter::new()
            .export_with(
                &make_analysis(),
                &make_metadata(vec!["Y", "Z"]),
                &ExportConfig::in_memory(),
            )
            .unwrap();

        assert!(outcome.table.is_empty());
        assert_eq!(outcome.summary.entities_dropped, 2);
    }

    #[test]
    fn test_pure_computation_is_idempotent() {
        let exporter = Exporter::new();
        let analysis = make_analysis();
        let metadata = make_metadata(vec!["A", "B"]);

        let first = exporter
            .export_with(&analysis, &metadata, &ExportConfig::in_memory())
            .unwrap();
        let second = exporter
            .export_with(&analysis, &metadata, &ExportConfig::in_memory())
            .unwrap();
        assert_eq!(first.table, second.table);
    }

    #[test]
    fn test_write_records_path_and_notice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let outcome = Exporter::new()
            .export_with(
                &make_analysis(),
                &make_metadata(vec!["A", "B"]),
                &ExportConfig::to_file(&path),
            )
            .unwrap();

        assert_eq!(outcome.written_to.as_deref(), Some(path.as_path()));
        assert!(path.exists());
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::FileWritten));
    }
}
