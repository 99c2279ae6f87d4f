//! CSV reading and writing for tables and export records

use super::Table;
use crate::domain::{OutputRecord, Result, ShipexError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Character encoding of a CSV file on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEncoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,

    /// ISO-8859-1, used by the ShipStation zone export
    #[serde(rename = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl TableEncoding {
    fn decode(self, bytes: Vec<u8>) -> Result<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes)
                .map_err(|e| ShipexError::Table(format!("File is not valid UTF-8: {e}"))),
            // Latin-1 code points map one-to-one onto the first 256 chars
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

/// Read a CSV file with a header row
pub fn read_table(path: impl AsRef<Path>, encoding: TableEncoding) -> Result<Table> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        ShipexError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let text = encoding.decode(bytes)?;

    parse_csv(text.as_bytes()).map_err(|e| match e {
        ShipexError::Table(msg) => ShipexError::Table(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Write a table as CSV, header first, creating parent directories
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = table.len(), "Table written");
    Ok(())
}

/// Hex SHA-256 of a file's contents
pub fn file_checksum(path: impl AsRef<Path>) -> Result<String> {
    let bytes = std::fs::read(path.as_ref())?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Serialize export records to CSV bytes in field order
pub(crate) fn records_to_csv(records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| ShipexError::Serialization(format!("Failed to flush CSV buffer: {e}")))
}

pub(crate) fn parse_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').to_string())
        .collect();

    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(str::to_string).collect())?;
    }
    Ok(table)
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
