//! Test data generation utilities.
//!
//! Deterministic matrices, CSV fixtures and a renderer double that records
//! what it was asked to draw.

use imagesc::heatmap::{Figure, PreparedHeatmap, Renderer, SaveOptions};
use imagesc::{Label, Result};
use ndarray::Array2;
use std::cell::RefCell;
use std::fmt::Write as _;
use std::path::Path;

/// The 3x4 frame used throughout the package documentation
pub fn example_frame() -> (Array2<f64>, Vec<Label>, Vec<Label>) {
    let data = Array2::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as f64 / 10.0);
    let rows = ["aap1", "boom2", "mies3"].map(Label::from).to_vec();
    let cols = ["aap", "boom", "mies", "banaan"].map(Label::from).to_vec();
    (data, rows, cols)
}

/// Integer matrix in 0..100 with a fixed pattern, like `randint(0, 100)`
pub fn integer_matrix(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| ((i * 37 + j * 11) % 100) as f64)
}

/// Write `data` as a CSV file in the layout `load_matrix_csv` expects.
pub fn write_matrix_csv(path: &Path, data: &Array2<f64>, rows: &[Label], cols: &[Label]) {
    let mut out = String::new();
    for col in cols {
        write!(out, ",{}", col).unwrap();
    }
    out.push('\n');

    for (label, row) in rows.iter().zip(data.outer_iter()) {
        write!(out, "{}", label).unwrap();
        for value in row {
            write!(out, ",{}", value).unwrap();
        }
        out.push('\n');
    }

    std::fs::write(path, out).unwrap();
}

/// Figure that writes a short text summary instead of an image
#[derive(Debug, Clone)]
pub struct SummaryFigure {
    pub summary: String,
}

impl Figure for SummaryFigure {
    fn save(&self, path: &Path, options: &SaveOptions) -> Result<()> {
        std::fs::write(path, format!("{} dpi={}", self.summary, options.dpi))?;
        Ok(())
    }
}

/// Renderer that keeps every heatmap it receives
#[derive(Default)]
pub struct RecordingRenderer {
    pub received: RefCell<Vec<PreparedHeatmap>>,
}

impl Renderer for RecordingRenderer {
    type Figure = SummaryFigure;

    fn render(&self, heatmap: &PreparedHeatmap) -> Result<SummaryFigure> {
        self.received.borrow_mut().push(heatmap.clone());
        let (rows, cols) = heatmap.data.dim();
        Ok(SummaryFigure {
            summary: format!(
                "{} {}x{} {}x{}",
                heatmap.kind, rows, cols, heatmap.figsize.width, heatmap.figsize.height
            ),
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}
