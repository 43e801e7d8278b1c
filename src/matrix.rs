//! Labeled matrices and cell-value normalization.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::error::{ImagescError, Result};

/// A row or column label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Positional or numeric label
    Int(i64),
    /// Text label
    Text(String),
}

impl Label {
    /// Read a label from text, preferring an integer when the text is one.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(i) => Label::Int(i),
            Err(_) => Label::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{}", i),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<usize> for Label {
    fn from(value: usize) -> Self {
        Label::Int(value as i64)
    }
}

/// `0..n` as positional labels
pub fn default_labels(n: usize) -> Vec<Label> {
    (0..n).map(Label::from).collect()
}

/// Fail with `ShapeMismatch` unless `labels` has exactly `expected` entries.
pub fn check_labels(axis: &'static str, labels: &[Label], expected: usize) -> Result<()> {
    if labels.len() != expected {
        return Err(ImagescError::ShapeMismatch {
            axis,
            expected,
            actual: labels.len(),
        });
    }
    Ok(())
}

/// A matrix together with its row and column labels
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    data: Array2<f64>,
    row_labels: Vec<Label>,
    col_labels: Vec<Label>,
}

impl LabeledMatrix {
    /// Attach labels to `data`. Missing labels default to positional
    /// indices; supplied labels must match the matrix shape.
    pub fn new(
        data: Array2<f64>,
        row_labels: Option<Vec<Label>>,
        col_labels: Option<Vec<Label>>,
    ) -> Result<Self> {
        let (rows, cols) = data.dim();

        let row_labels = row_labels.unwrap_or_else(|| default_labels(rows));
        let col_labels = col_labels.unwrap_or_else(|| default_labels(cols));
        check_labels("rows", &row_labels, rows)?;
        check_labels("columns", &col_labels, cols)?;

        Ok(Self {
            data,
            row_labels,
            col_labels,
        })
    }

    /// Assemble parts whose lengths are already known to agree.
    pub(crate) fn from_checked_parts(
        data: Array2<f64>,
        row_labels: Vec<Label>,
        col_labels: Vec<Label>,
    ) -> Self {
        debug_assert_eq!(data.nrows(), row_labels.len());
        debug_assert_eq!(data.ncols(), col_labels.len());
        Self {
            data,
            row_labels,
            col_labels,
        }
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn row_labels(&self) -> &[Label] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[Label] {
        &self.col_labels
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Replace the cell values, keeping the labels. The new data must have
    /// the same shape.
    pub fn with_data(self, data: Array2<f64>) -> Result<Self> {
        Self::new(data, Some(self.row_labels), Some(self.col_labels))
    }

    pub fn into_parts(self) -> (Array2<f64>, Vec<Label>, Vec<Label>) {
        (self.data, self.row_labels, self.col_labels)
    }

    /// Smallest and largest finite value, if any
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Center and scale cell values over the whole matrix.
///
/// When enabled every cell becomes `(x - mean) / (max - min)`, with mean,
/// max and min taken over all cells. This is whole-matrix scaling, not a
/// per-row one. A constant matrix yields non-finite values. When disabled
/// the result is an exact copy of the input.
pub fn normalize_matrix(matrix: ArrayView2<f64>, enabled: bool) -> Array2<f64> {
    if !enabled || matrix.is_empty() {
        return matrix.to_owned();
    }

    let (rows, cols) = matrix.dim();
    info!(rows = rows, cols = cols, "Normalizing data");

    let mean = matrix.sum() / matrix.len() as f64;
    let (min, max) = matrix.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &v| (lo.min(v), hi.max(v)),
    );
    let span = max - min;

    matrix.mapv(|v| (v - mean) / span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_label_parse() {
        assert_eq!(Label::parse("3"), Label::Int(3));
        assert_eq!(Label::parse(" aap "), Label::Text("aap".to_string()));
        assert_eq!(Label::parse("1.5"), Label::Text("1.5".to_string()));
    }

    #[test]
    fn test_label_serialization() {
        let labels = vec![Label::from("r0"), Label::from(1usize)];
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"["r0",1]"#);
    }

    #[test]
    fn test_default_labels() {
        let m = LabeledMatrix::new(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], None, None).unwrap();
        assert_eq!(m.row_labels(), &[Label::Int(0), Label::Int(1)]);
        assert_eq!(m.col_labels().len(), 3);
        assert_eq!(m.col_labels()[2], Label::Int(2));
    }

    #[test]
    fn test_label_length_mismatch() {
        let err = LabeledMatrix::new(
            array![[1.0, 2.0], [3.0, 4.0]],
            Some(vec!["a".into()]),
            None,
        )
        .unwrap_err();

        match err {
            ImagescError::ShapeMismatch {
                axis,
                expected,
                actual,
            } => {
                assert_eq!(axis, "rows");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_finite_range_skips_nan() {
        let m = LabeledMatrix::new(array![[f64::NAN, 2.0], [-1.0, f64::INFINITY]], None, None)
            .unwrap();
        assert_eq!(m.finite_range(), Some((-1.0, 2.0)));
    }

    #[test]
    fn test_normalize_disabled_is_identity() {
        let m = array![[1.0, f64::NAN], [f64::INFINITY, -3.0]];
        let out = normalize_matrix(m.view(), false);
        assert_eq!(out[[0, 0]], 1.0);
        assert!(out[[0, 1]].is_nan());
        assert_eq!(out[[1, 0]], f64::INFINITY);
        assert_eq!(out[[1, 1]], -3.0);
    }

    #[test]
    fn test_normalize_whole_matrix() {
        let m = array![[1.0, 2.0], [3.0, 4.0]];
        let out = normalize_matrix(m.view(), true);
        // mean 2.5, span 3
        assert!((out[[0, 0]] + 0.5).abs() < 1e-12);
        assert!((out[[1, 1]] - 0.5).abs() < 1e-12);
        assert!((out.sum()).abs() < 1e-12);
        // input untouched
        assert_eq!(m[[0, 0]], 1.0);
    }

    #[test]
    fn test_normalize_constant_matrix_is_not_finite() {
        let m = array![[2.0, 2.0], [2.0, 2.0]];
        let out = normalize_matrix(m.view(), true);
        assert!(out.iter().all(|v| !v.is_finite()));
    }
}
