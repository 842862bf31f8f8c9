//! Error types for the mvmapper export library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No extraction strategy is registered for the analysis variant.
    #[error("no export strategy for analysis of type '{kind}'")]
    UnsupportedAnalysis { kind: String },

    /// An analysis result field is absent or ill-shaped.
    #[error("malformed analysis result in field '{field}': {detail}")]
    MalformedResult { field: String, detail: String },

    /// Metadata lacks a required column.
    #[error("metadata is missing required column '{0}'")]
    MissingColumn(String),

    /// Error writing the export file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    /// Shorthand for a malformed-result error.
    pub(crate) fn malformed(field: &str, detail: impl Into<String>) -> Self {
        ExportError::MalformedResult {
            field: field.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
