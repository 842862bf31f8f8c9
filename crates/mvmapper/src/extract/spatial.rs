//! Extraction for spatial principal component analysis results.

use crate::analysis::{AnalysisKind, AnalysisResult, SpatialComponentResult};
use crate::error::Result;
use crate::table::{Table, Value, KEY_COLUMN};

use super::{check_matrix, component_columns, variant_mismatch, Extractor};

/// Extracts `key, PC1..PCk, Lag_PC1..Lag_PCm` from a spatial analysis
/// result.
///
/// The lag prefix count `m` comes from the lag matrix's own width and is not
/// asserted equal to `k`; lag rows must still align with the entity keys.
pub struct SpatialExtractor;

impl Extractor for SpatialExtractor {
    fn kind(&self) -> AnalysisKind {
        AnalysisKind::SpatialComponent
    }

    fn extract(&self, analysis: &AnalysisResult) -> Result<Table> {
        let AnalysisResult::SpatialComponent(result) = analysis else {
            return Err(variant_mismatch(analysis.kind()));
        };
        extract_spatial(result)
    }
}

fn extract_spatial(result: &SpatialComponentResult) -> Result<Table> {
    let n_keys = result.keys.len();
    check_matrix("scores", &result.scores, n_keys)?;
    check_matrix("lag_scores", &result.lag_scores, n_keys)?;

    let k = result.scores.n_cols();
    let m = result.lag_scores.n_cols();
    let mut columns = vec![KEY_COLUMN.to_string()];
    columns.extend(component_columns("PC", k));
    columns.extend(component_columns("Lag_PC", m));

    let mut table = Table::new(columns);
    for (index, (key, scores)) in result.keys.iter().zip(result.scores.iter_rows()).enumerate() {
        let mut row = Vec::with_capacity(1 + k + m);
        row.push(Value::Str(key.clone()));
        row.extend(scores.iter().map(|&v| Value::Float(v)));
        if let Some(lag) = result.lag_scores.row(index) {
            row.extend(lag.iter().map(|&v| Value::Float(v)));
        }
        table.push_row(row);
    }

    Ok(table)
}
