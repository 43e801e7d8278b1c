//! Loading labeled matrices from CSV files.
//!
//! The layout is the usual dataframe dump: the header row holds the column
//! labels (its first cell is ignored), every following row starts with its
//! row label followed by one value per column. Empty cells are read as NaN.

use ndarray::Array2;
use std::io::Read;
use std::path::Path;

use crate::error::{ImagescError, Result};
use crate::logging::log_matrix_stats;
use crate::matrix::{Label, LabeledMatrix};

/// Load a labeled matrix from a CSV file.
pub fn load_matrix_csv(path: &Path) -> Result<LabeledMatrix> {
    if !path.exists() {
        return Err(ImagescError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let file = std::fs::File::open(path)?;
    let matrix = read_matrix_csv(file)?;

    let (rows, cols) = matrix.shape();
    log_matrix_stats(&path.display().to_string(), rows, cols, matrix.finite_range());

    Ok(matrix)
}

/// Read a labeled matrix from any CSV source.
pub fn read_matrix_csv<R: Read>(reader: R) -> Result<LabeledMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let col_labels: Vec<Label> = reader
        .headers()?
        .iter()
        .skip(1)
        .map(Label::parse)
        .collect();
    let cols = col_labels.len();

    let mut row_labels = Vec::new();
    let mut values = Vec::new();

    // Ragged rows are rejected by the reader itself.
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        row_labels.push(Label::parse(&record[0]));
        for (j, cell) in record.iter().skip(1).enumerate() {
            values.push(parse_cell(cell).ok_or_else(|| ImagescError::Parse {
                message: format!(
                    "Invalid number '{}' at row {}, column {}",
                    cell,
                    line + 1,
                    j + 1
                ),
            })?);
        }
    }

    let data = Array2::from_shape_vec((row_labels.len(), cols), values).map_err(|e| {
        ImagescError::Parse {
            message: format!("Cannot shape matrix: {}", e),
        }
    })?;

    LabeledMatrix::new(data, Some(row_labels), Some(col_labels))
}

fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse::<f64>().ok()
}
