//! Side-channel diagnostics produced during an export.
//!
//! Diagnostics are data, not prints: the exporter collects them in the
//! returned outcome and callers decide how to surface them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, may not require action.
    Info,
    /// Potential issue that should be reviewed.
    Warning,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
        }
    }
}

/// Kind of diagnostic emitted by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Entities present in the analysis but absent from the metadata.
    CoverageGap,
    /// An export file was written.
    FileWritten,
}

/// A non-fatal notice produced while exporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Kind of notice.
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Supporting detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Value>,
}

impl Diagnostic {
    /// Warning that `nb_missing` entities from the analysis have no metadata
    /// row and will be dropped at merge time.
    pub fn coverage_gap(nb_missing: usize, sample_keys: &[String]) -> Self {
        Self {
            kind: DiagnosticKind::CoverageGap,
            severity: Severity::Warning,
            message: format!(
                "{} entities from the analysis are missing from the metadata",
                nb_missing
            ),
            evidence: Some(json!({
                "nb_missing": nb_missing,
                "sample_keys": sample_keys,
            })),
        }
    }

    /// Notice naming the output path of a completed write.
    pub fn file_written(path: &Path) -> Self {
        Self {
            kind: DiagnosticKind::FileWritten,
            severity: Severity::Info,
            message: format!("export written to '{}'", path.display()),
            evidence: Some(json!({ "path": path.display().to_string() })),
        }
    }

    /// Whether this diagnostic is a warning.
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
