//! In-memory tabular data
//!
//! A [`Table`] is an ordered list of column names and rows of string cells.
//! An empty cell stands for a missing value. Every transform in the
//! post-processing pipeline takes a `&Table` and returns a new one.

pub mod io;
pub mod join;

pub use io::{file_checksum, read_table, write_table, TableEncoding};
pub use join::{left_join, JoinSpec, Merge, ValueColumn};

use crate::domain::{OutputRecord, Result, ShipexError};

/// Column names plus rows of string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Empty table with the given header
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from a header and rows, rejecting ragged rows
    pub fn with_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Build a table holding exactly what the export CSV would contain
    pub fn from_records(records: &[OutputRecord]) -> Result<Self> {
        if records.is_empty() {
            return Ok(Self::new(OutputRecord::COLUMNS));
        }
        io::parse_csv(&io::records_to_csv(records)?)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a column, or a `Table` error naming it
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| {
            ShipexError::Table(format!(
                "Missing column '{}' (available: {})",
                name,
                self.columns.join(", ")
            ))
        })
    }

    /// Append a row; its width must match the header
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ShipexError::Table(format!(
                "Row {} has {} cells, expected {}",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Cell by row position and column name, `None` if the column is absent
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Copy of the table with `f` applied to every row
    pub fn map_rows(&self, mut f: impl FnMut(&mut Vec<String>)) -> Self {
        let mut out = self.clone();
        for row in &mut out.rows {
            f(row);
        }
        out
    }

    /// Copy of the table with `name` appended as an empty column if absent,
    /// plus the column's position
    pub fn with_column(&self, name: &str) -> (Self, usize) {
        if let Some(idx) = self.column_index(name) {
            return (self.clone(), idx);
        }
        let mut out = self.clone();
        out.columns.push(name.to_string());
        for row in &mut out.rows {
            row.push(String::new());
        }
        let idx = out.columns.len() - 1;
        (out, idx)
    }
}
