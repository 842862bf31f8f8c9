//! CSV persistence for export tables.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{ExportError, Result};
use crate::table::Table;

/// Build the default `mvmapper_data_<timestamp>.csv` output name.
///
/// Millisecond precision keeps sequential exports from colliding; the
/// timestamp uses `-` and `_` instead of spaces and colons so the name is
/// valid on every filesystem.
pub fn default_output_path() -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S%.3f");
    PathBuf::from(format!("mvmapper_data_{}.csv", timestamp))
}

/// Write a table as comma-separated text with a header row.
///
/// Fields are quoted only where the content requires it, and no row-index
/// column is emitted. The write is staged through a temporary sibling and
/// renamed into place, so a failure leaves any previous file at `path`
/// untouched.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let staged = staging_path(path);

    if let Err(e) = write_to(table, &staged) {
        let _ = fs::remove_file(&staged);
        return Err(e);
    }

    fs::rename(&staged, path).map_err(|e| {
        let _ = fs::remove_file(&staged);
        ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

fn write_to(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }

    writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Sibling name in the same directory, so the final rename stays on one
/// filesystem.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "mvmapper_export".into());
    name.push(".tmp");
    path.with_file_name(name)
}
