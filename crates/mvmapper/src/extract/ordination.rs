//! Extraction for principal-component ordination results.

use crate::analysis::{AnalysisKind, AnalysisResult, OrdinationResult};
use crate::error::Result;
use crate::table::{Table, Value, KEY_COLUMN};

use super::{check_matrix, component_columns, variant_mismatch, Extractor};

/// Extracts `key, PC1..PCk` from an ordination result.
pub struct OrdinationExtractor;

impl Extractor for OrdinationExtractor {
    fn kind(&self) -> AnalysisKind {
        AnalysisKind::Ordination
    }

    fn extract(&self, analysis: &AnalysisResult) -> Result<Table> {
        let AnalysisResult::Ordination(result) = analysis else {
            return Err(variant_mismatch(analysis.kind()));
        };
        extract_ordination(result)
    }
}

fn extract_ordination(result: &OrdinationResult) -> Result<Table> {
    check_matrix("scores", &result.scores, result.keys.len())?;

    let k = result.scores.n_cols();
    let mut columns = vec![KEY_COLUMN.to_string()];
    columns.extend(component_columns("PC", k));

    let mut table = Table::new(columns);
    for (key, scores) in result.keys.iter().zip(result.scores.iter_rows()) {
        let mut row = Vec::with_capacity(1 + k);
        row.push(Value::Str(key.clone()));
        row.extend(scores.iter().map(|&v| Value::Float(v)));
        table.push_row(row);
    }

    Ok(table)
}
