//! Left joins against auxiliary reference tables
//!
//! Every row of the base table is kept. A base row whose key matches several
//! auxiliary rows is repeated once per match; reference files are expected to
//! be keyed uniquely, so this is surfaced as a row-count change, not an error.

use super::Table;
use crate::config::JoinTableConfig;
use crate::domain::Result;
use std::collections::HashMap;

/// How a joined value is written into its target column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// Target takes the auxiliary value; empty when unmatched
    Overwrite,
    /// Target takes the auxiliary value only when it is non-empty
    Coalesce,
}

/// One auxiliary column carried into the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueColumn {
    pub source: String,
    pub target: String,
    pub merge: Merge,
}

/// Key pair and value columns for one join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec {
    pub left_key: String,
    pub right_key: String,
    pub values: Vec<ValueColumn>,
}

impl JoinSpec {
    pub fn new(left_key: impl Into<String>, right_key: impl Into<String>) -> Self {
        Self {
            left_key: left_key.into(),
            right_key: right_key.into(),
            values: Vec::new(),
        }
    }

    /// Carry `source` into `target` (lowercased), overwriting
    pub fn value(self, source: impl Into<String>, target: &str) -> Self {
        self.column(source, target, Merge::Overwrite)
    }

    /// Carry `source` into `target` (lowercased), keeping the base value
    /// where the auxiliary cell is empty
    pub fn coalesce(self, source: impl Into<String>, target: &str) -> Self {
        self.column(source, target, Merge::Coalesce)
    }

    pub fn column(mut self, source: impl Into<String>, target: &str, merge: Merge) -> Self {
        self.values.push(ValueColumn {
            source: source.into(),
            target: target.to_lowercase(),
            merge,
        });
        self
    }

    /// Spec for a configured reference table
    pub fn from_config(config: &JoinTableConfig, merge: Merge) -> Self {
        Self::new(&config.left_key, &config.right_key).column(
            &config.value_column,
            &config.target,
            merge,
        )
    }
}

/// Left outer join of `base` with `aux` on `spec`
///
/// The auxiliary key column is not carried over. Targets already present in
/// `base` are updated in place; new targets are appended in spec order.
pub fn left_join(base: &Table, aux: &Table, spec: &JoinSpec) -> Result<Table> {
    let left_idx = base.require_column(&spec.left_key)?;
    let right_idx = aux.require_column(&spec.right_key)?;
    let source_idx = spec
        .values
        .iter()
        .map(|v| aux.require_column(&v.source))
        .collect::<Result<Vec<_>>>()?;

    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (pos, row) in aux.rows().iter().enumerate() {
        let key = row[right_idx].trim();
        if !key.is_empty() {
            index.entry(key).or_default().push(pos);
        }
    }

    let mut columns = base.columns().to_vec();
    let mut target_idx = Vec::with_capacity(spec.values.len());
    for value in &spec.values {
        let idx = match columns.iter().position(|c| *c == value.target) {
            Some(idx) => idx,
            None => {
                columns.push(value.target.clone());
                columns.len() - 1
            }
        };
        target_idx.push(idx);
    }
    let width = columns.len();

    let mut out = Table::new(columns);
    let mut matched = 0usize;

    for row in base.rows() {
        let mut widened = row.clone();
        widened.resize(width, String::new());

        let key = row[left_idx].trim();
        let matches = if key.is_empty() {
            None
        } else {
            index.get(key)
        };

        match matches {
            Some(positions) => {
                matched += 1;
                for &pos in positions {
                    let aux_row = &aux.rows()[pos];
                    let mut joined = widened.clone();
                    for ((value, &src), &dst) in
                        spec.values.iter().zip(&source_idx).zip(&target_idx)
                    {
                        let cell = &aux_row[src];
                        match value.merge {
                            Merge::Overwrite => joined[dst] = cell.clone(),
                            Merge::Coalesce if !cell.trim().is_empty() => {
                                joined[dst] = cell.clone()
                            }
                            Merge::Coalesce => {}
                        }
                    }
                    out.push_row(joined)?;
                }
            }
            None => {
                for (value, &dst) in spec.values.iter().zip(&target_idx) {
                    if value.merge == Merge::Overwrite {
                        widened[dst] = String::new();
                    }
                }
                out.push_row(widened)?;
            }
        }
    }

    tracing::debug!(
        left_key = %spec.left_key,
        right_key = %spec.right_key,
        base_rows = base.len(),
        matched_rows = matched,
        output_rows = out.len(),
        "Left join complete"
    );

    if out.len() != base.len() {
        tracing::warn!(
            right_key = %spec.right_key,
            base_rows = base.len(),
            output_rows = out.len(),
            "Duplicate keys in reference table multiplied rows"
        );
    }

    Ok(out)
}
