//! Validation of caller-supplied entity metadata.

use std::collections::HashSet;

use crate::diagnostics::Diagnostic;
use crate::error::{ExportError, Result};
use crate::table::{Table, KEY_COLUMN};

/// Columns every metadata table must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 3] = [KEY_COLUMN, "lat", "lon"];

/// Keys shown in a coverage-gap diagnostic.
const COVERAGE_SAMPLE: usize = 5;

/// Check metadata for required columns and report coverage gaps.
///
/// The first name in `required` absent from the metadata columns fails with
/// [`ExportError::MissingColumn`]; entities in `reference_keys` without a
/// metadata row only produce a warning diagnostic, since the merge drops
/// them silently afterwards. The metadata itself is never modified.
pub fn validate_metadata(
    metadata: &Table,
    reference_keys: &[String],
    required: &[&str],
) -> Result<Vec<Diagnostic>> {
    for name in required {
        if !metadata.has_column(name) {
            return Err(ExportError::MissingColumn((*name).to_string()));
        }
    }

    let present: HashSet<String> = metadata
        .column_strings(KEY_COLUMN)
        .ok_or_else(|| ExportError::MissingColumn(KEY_COLUMN.to_string()))?
        .into_iter()
        .collect();

    let missing: Vec<&String> = reference_keys
        .iter()
        .filter(|key| !present.contains(*key))
        .collect();

    let mut diagnostics = Vec::new();
    if !missing.is_empty() {
        let sample: Vec<String> = missing
            .iter()
            .take(COVERAGE_SAMPLE)
            .map(|key| (*key).clone())
            .collect();
        diagnostics.push(Diagnostic::coverage_gap(missing.len(), &sample));
    }

    Ok(diagnostics)
}
