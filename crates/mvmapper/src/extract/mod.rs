//! Extraction strategies, one per analysis variant.
//!
//! Each strategy is a pure function from an analysis result to a table of
//! per-entity derived fields keyed by [`KEY_COLUMN`](crate::table::KEY_COLUMN).

mod discriminant;
mod ordination;
mod spatial;

pub use discriminant::DiscriminantExtractor;
pub use ordination::OrdinationExtractor;
pub use spatial::SpatialExtractor;

use crate::analysis::{AnalysisKind, AnalysisResult, ScoreMatrix};
use crate::error::{ExportError, Result};
use crate::table::Table;

/// An extraction strategy for one analysis variant.
pub trait Extractor {
    /// The variant this strategy handles.
    fn kind(&self) -> AnalysisKind;

    /// Extract per-entity derived fields into a table keyed by `key`.
    fn extract(&self, analysis: &AnalysisResult) -> Result<Table>;
}

/// Build `<prefix>1..<prefix>k` column names, 1-based and contiguous.
pub(crate) fn component_columns(prefix: &str, k: usize) -> Vec<String> {
    (1..=k).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Reject empty, ragged, or key-misaligned score matrices.
pub(crate) fn check_matrix(field: &str, matrix: &ScoreMatrix, n_keys: usize) -> Result<()> {
    if matrix.n_rows() == 0 || matrix.n_cols() == 0 {
        return Err(ExportError::malformed(field, "score matrix is empty"));
    }
    if !matrix.is_rectangular() {
        return Err(ExportError::malformed(field, "score matrix has ragged rows"));
    }
    if matrix.n_rows() != n_keys {
        return Err(ExportError::malformed(
            field,
            format!("{} rows for {} entities", matrix.n_rows(), n_keys),
        ));
    }
    Ok(())
}

/// Reject label vectors that do not align with the entity keys.
pub(crate) fn check_labels(field: &str, labels: &[String], n_keys: usize) -> Result<()> {
    if labels.len() != n_keys {
        return Err(ExportError::malformed(
            field,
            format!("{} labels for {} entities", labels.len(), n_keys),
        ));
    }
    Ok(())
}

/// Error for a strategy handed a result of the wrong variant.
pub(crate) fn variant_mismatch(got: AnalysisKind) -> ExportError {
    ExportError::UnsupportedAnalysis {
        kind: got.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_columns_are_one_based_and_contiguous() {
        assert_eq!(component_columns("PC", 3), ["PC1", "PC2", "PC3"]);
        assert_eq!(component_columns("Lag_PC", 1), ["Lag_PC1"]);
        assert!(component_columns("PC", 0).is_empty());
    }

    #[test]
    fn test_check_matrix_rejects_empty() {
        let err = check_matrix("scores", &ScoreMatrix::default(), 0).unwrap_err();
        assert!(matches!(err, ExportError::MalformedResult { field, .. } if field == "scores"));
    }

    #[test]
    fn test_check_matrix_rejects_misalignment() {
        let matrix = ScoreMatrix::from_rows(vec![vec![1.0], vec![2.0]]);
        assert!(check_matrix("scores", &matrix, 3).is_err());
        assert!(check_matrix("scores", &matrix, 2).is_ok());
    }
}
