//! Conversion between labeled matrices and flat edge lists.
//!
//! An edge list has one `(source, target, value)` record per cell, where
//! `source` is the row label and `target` the column label. This is the
//! format the web export embeds.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::matrix::{check_labels, Label, LabeledMatrix};

/// Value used for cells with no record in [`from_edge_list`]
pub const MISSING_VALUE: f64 = f64::NAN;

/// One matrix cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Row label
    pub source: Label,
    /// Column label
    pub target: Label,
    pub value: f64,
}

impl EdgeRecord {
    pub fn new(source: impl Into<Label>, target: impl Into<Label>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

/// Flatten `matrix` into `rows * cols` records in row-major order.
pub fn to_edge_list(
    matrix: ArrayView2<f64>,
    row_labels: &[Label],
    col_labels: &[Label],
) -> Result<Vec<EdgeRecord>> {
    let (rows, cols) = matrix.dim();
    check_labels("rows", row_labels, rows)?;
    check_labels("columns", col_labels, cols)?;

    Ok(edges(matrix, row_labels, col_labels))
}

fn edges(matrix: ArrayView2<f64>, row_labels: &[Label], col_labels: &[Label]) -> Vec<EdgeRecord> {
    matrix
        .outer_iter()
        .zip(row_labels)
        .flat_map(|(row, source)| {
            row.into_iter()
                .zip(col_labels)
                .map(move |(&value, target)| EdgeRecord {
                    source: source.clone(),
                    target: target.clone(),
                    value,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Rebuild a dense matrix from edge records.
///
/// Rows and columns are ordered by first occurrence of their label. Cells
/// without a record hold [`MISSING_VALUE`]. If a (row, column) pair occurs
/// more than once, the last record wins.
pub fn from_edge_list(records: &[EdgeRecord]) -> LabeledMatrix {
    let mut row_index: HashMap<&Label, usize> = HashMap::new();
    let mut col_index: HashMap<&Label, usize> = HashMap::new();
    let mut row_labels = Vec::new();
    let mut col_labels = Vec::new();

    for record in records {
        row_index.entry(&record.source).or_insert_with(|| {
            row_labels.push(record.source.clone());
            row_labels.len() - 1
        });
        col_index.entry(&record.target).or_insert_with(|| {
            col_labels.push(record.target.clone());
            col_labels.len() - 1
        });
    }

    let mut data = Array2::from_elem((row_labels.len(), col_labels.len()), MISSING_VALUE);
    for record in records {
        let i = row_index[&record.source];
        let j = col_index[&record.target];
        data[[i, j]] = record.value;
    }

    LabeledMatrix::from_checked_parts(data, row_labels, col_labels)
}

impl LabeledMatrix {
    /// Edge list of this matrix, row-major.
    pub fn to_edge_list(&self) -> Vec<EdgeRecord> {
        edges(self.data(), self.row_labels(), self.col_labels())
    }
}
