//! Output file writing

use super::summary::WrittenFile;
use crate::core::table::{self, Table};
use crate::domain::{OutputRecord, Result, ShipexError};
use std::path::Path;

/// Write the raw export CSV
///
/// Nothing is written, and `None` returned, when `records` is empty.
pub fn write_export(records: &[OutputRecord], path: impl AsRef<Path>) -> Result<Option<WrittenFile>> {
    let path = path.as_ref();
    if records.is_empty() {
        tracing::info!(path = %path.display(), "No records; export file not written");
        return Ok(None);
    }

    let bytes = table::io::records_to_csv(records)?;
    table::io::ensure_parent(path)?;
    std::fs::write(path, &bytes).map_err(|e| {
        ShipexError::Export(format!("Failed to write {}: {}", path.display(), e))
    })?;

    let file = finish(path, records.len())?;
    tracing::info!(
        path = %file.path.display(),
        rows = file.rows,
        checksum = %file.checksum,
        "Export file written"
    );
    Ok(Some(file))
}

/// Write a table and report its checksum
pub fn write_processed(table: &Table, path: impl AsRef<Path>) -> Result<WrittenFile> {
    let path = path.as_ref();
    table::write_table(table, path)?;
    finish(path, table.len())
}

fn finish(path: &Path, rows: usize) -> Result<WrittenFile> {
    Ok(WrittenFile {
        path: path.to_path_buf(),
        rows,
        checksum: table::file_checksum(path)?,
    })
}
