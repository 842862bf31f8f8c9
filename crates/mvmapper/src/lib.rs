//! mvmapper: export multivariate analysis results for map-based
//! visualization.
//!
//! The exporter flattens the per-entity output of a principal-component
//! ordination, a discriminant analysis, or a spatial principal component
//! analysis into one table, joins it with caller-supplied geographic
//! metadata on a shared `key` column, and optionally writes the result as
//! CSV for an interactive map browser.
//!
//! # Core Principles
//!
//! - **Read-only inputs**: analysis results and metadata are never modified
//! - **Fail fast**: unsupported variants, malformed results, and missing
//!   columns abort the call before anything is written
//! - **Diagnostics as data**: coverage warnings and write notices travel in
//!   the returned outcome, not on a logging side channel
//!
//! # Example
//!
//! ```
//! use mvmapper::{
//!     AnalysisResult, ExportConfig, Exporter, OrdinationResult, ScoreMatrix, Table, Value,
//! };
//!
//! let analysis = AnalysisResult::Ordination(OrdinationResult {
//!     keys: vec!["A".to_string(), "B".to_string()],
//!     scores: ScoreMatrix::from_rows(vec![vec![0.1, -0.4], vec![0.7, 0.2]]),
//! });
//!
//! let mut metadata = Table::new(
//!     ["key", "lat", "lon"].into_iter().map(String::from).collect(),
//! );
//! metadata.push_row(vec![Value::from("A"), Value::from(48.2), Value::from(16.4)]);
//! metadata.push_row(vec![Value::from("B"), Value::from(59.3), Value::from(18.1)]);
//!
//! let outcome = Exporter::new()
//!     .export_with(&analysis, &metadata, &ExportConfig::in_memory())
//!     .unwrap();
//!
//! assert_eq!(outcome.table.column_names(), ["key", "PC1", "PC2", "lat", "lon"]);
//! ```

pub mod analysis;
pub mod diagnostics;
pub mod error;
pub mod exporter;
pub mod extract;
pub mod metadata;
pub mod table;
pub mod writer;

pub use analysis::{
    AnalysisKind, AnalysisResult, DiscriminantResult, OrdinationResult, ScoreMatrix,
    SpatialComponentResult,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{ExportError, Result};
pub use exporter::{ExportConfig, ExportOutcome, ExportSummary, Exporter};
pub use extract::{DiscriminantExtractor, Extractor, OrdinationExtractor, SpatialExtractor};
pub use metadata::{validate_metadata, REQUIRED_COLUMNS};
pub use table::{Table, Value, KEY_COLUMN};
pub use writer::{default_output_path, write_csv};
