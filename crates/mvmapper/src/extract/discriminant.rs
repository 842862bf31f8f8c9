//! Extraction for discriminant analysis results.

use crate::analysis::{AnalysisKind, AnalysisResult, DiscriminantResult};
use crate::error::Result;
use crate::table::{Table, Value, KEY_COLUMN};

use super::{check_labels, check_matrix, component_columns, variant_mismatch, Extractor};

/// Extracts `key, PC1..PCk, grp, assigned_grp, support` from a discriminant
/// result.
///
/// `support` is the maximum of the entity's posterior-probability row,
/// computed per entity rather than read from any stored summary.
pub struct DiscriminantExtractor;

impl Extractor for DiscriminantExtractor {
    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Discriminant
    }

    fn extract(&self, analysis: &AnalysisResult) -> Result<Table> {
        let AnalysisResult::Discriminant(result) = analysis else {
            return Err(variant_mismatch(analysis.kind()));
        };
        extract_discriminant(result)
    }
}

fn extract_discriminant(result: &DiscriminantResult) -> Result<Table> {
    let n_keys = result.keys.len();
    check_matrix("scores", &result.scores, n_keys)?;
    check_matrix("posterior", &result.posterior, n_keys)?;
    check_labels("groups", &result.groups, n_keys)?;
    check_labels("assigned", &result.assigned, n_keys)?;

    let k = result.scores.n_cols();
    let mut columns = vec![KEY_COLUMN.to_string()];
    columns.extend(component_columns("PC", k));
    columns.extend(
        ["grp", "assigned_grp", "support"]
            .into_iter()
            .map(String::from),
    );

    let mut table = Table::new(columns);
    for (index, (key, scores)) in result.keys.iter().zip(result.scores.iter_rows()).enumerate() {
        // check_matrix guarantees a non-empty posterior row per entity
        let support = result.posterior.row(index).map_or(f64::NAN, |row| {
            row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        });

        let mut row = Vec::with_capacity(1 + k + 3);
        row.push(Value::Str(key.clone()));
        row.extend(scores.iter().map(|&v| Value::Float(v)));
        row.push(Value::Str(result.groups[index].clone()));
        row.push(Value::Str(result.assigned[index].clone()));
        row.push(Value::Float(support));
        table.push_row(row);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ScoreMatrix;
    use crate::error::ExportError;

    fn make_result() -> DiscriminantResult {
        DiscriminantResult {
            keys: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            scores: ScoreMatrix::from_rows(vec![
                vec![0.1, -0.4],
                vec![0.7, 0.2],
                vec![-0.5, 0.9],
            ]),
            groups: vec!["1".to_string(), "1".to_string(), "2".to_string()],
            assigned: vec!["1".to_string(), "2".to_string(), "2".to_string()],
            posterior: ScoreMatrix::from_rows(vec![
                vec![0.9, 0.1],
                vec![0.4, 0.6],
                vec![0.2, 0.8],
            ]),
        }
    }

    #[test]
    fn test_columns_and_group_fields() {
        let analysis = AnalysisResult::Discriminant(make_result());

        let table = DiscriminantExtractor.extract(&analysis).unwrap();
        assert_eq!(
            table.column_names(),
            ["key", "PC1", "PC2", "grp", "assigned_grp", "support"]
        );
        assert_eq!(table.get(1, 3), Some(&Value::from("1")));
        assert_eq!(table.get(1, 4), Some(&Value::from("2")));
    }

    #[test]
    fn test_support_is_row_maximum() {
        let analysis = AnalysisResult::Discriminant(make_result());

        let table = DiscriminantExtractor.extract(&analysis).unwrap();
        let support = table.column("support").unwrap();
        assert_eq!(support, [&Value::from(0.9), &Value::from(0.6), &Value::from(0.8)]);
    }

    #[test]
    fn test_mismatched_groups_are_malformed() {
        let mut result = make_result();
        result.groups.pop();
        let analysis = AnalysisResult::Discriminant(result);

        let err = DiscriminantExtractor.extract(&analysis).unwrap_err();
        assert!(matches!(err, ExportError::MalformedResult { field, .. } if field == "groups"));
    }

    #[test]
    fn test_misaligned_posterior_is_malformed() {
        let mut result = make_result();
        result.posterior = ScoreMatrix::from_rows(vec![vec![1.0]]);
        let analysis = AnalysisResult::Discriminant(result);

        let err = DiscriminantExtractor.extract(&analysis).unwrap_err();
        assert!(matches!(err, ExportError::MalformedResult { field, .. } if field == "posterior"));
    }
}
