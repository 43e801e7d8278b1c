//! Figure geometry derived from the data shape.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Above this many rows or columns grid lines are suppressed
pub const LINEWIDTH_DENSITY_LIMIT: usize = 100;

/// Upper bound on the aspect-ratio term
const MAX_RATIO: f64 = 50.0;

/// Figure size in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn min(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn max(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Piecewise-linear interpolation through two knots `(x0, f0)` and `(x1, f1)`.
///
/// Left of the first knot yields `f0`, at or right of the last knot yields
/// `f1`. Knots given in decreasing order are swapped first.
pub fn interp(x: f64, (x0, f0): (f64, f64), (x1, f1): (f64, f64)) -> f64 {
    let ((x0, f0), (x1, f1)) = if x0 <= x1 {
        ((x0, f0), (x1, f1))
    } else {
        ((x1, f1), (x0, f0))
    };

    if x < x0 {
        f0
    } else if x >= x1 {
        f1
    } else {
        f0 + (x - x0) * (f1 - f0) / (x1 - x0)
    }
}

/// Derive an aspect-ratio-aware figure size for a `rows` x `cols` matrix.
///
/// The ratio term `min(5 / (rows / cols), 50)` grows with wide matrices.
/// Each axis value, offset by the smaller dimension, is interpolated between
/// `(min(requested), max(requested))` and `(ratio, ratio)` and rounded up.
/// The row axis gives the width, the column axis the height. Square
/// matrices give a square figure.
pub fn derive_figure_size(rows: usize, cols: usize, requested: FigureSize) -> FigureSize {
    let (r, c) = (rows as f64, cols as f64);
    let ratio = (5.0 / (r / c)).min(MAX_RATIO);
    let smallest = r.min(c);

    let lo = requested.min();
    let hi = requested.max();
    let axis = |v: f64| interp(v - smallest, (lo, hi), (ratio, ratio)).ceil();

    FigureSize::new(axis(r), axis(c))
}

/// Floor negative widths at zero and suppress grid lines on dense grids.
pub fn clamp_linewidth(width: f64, rows: usize, cols: usize) -> f64 {
    if width.is_nan() || width < 0.0 {
        return 0.0;
    }

    if (rows > LINEWIDTH_DENSITY_LIMIT || cols > LINEWIDTH_DENSITY_LIMIT) && width > 0.0 {
        warn!(
            rows = rows,
            cols = cols,
            linewidth = width,
            "Plot will be poorly visible with linewidth > 0 and more than {} rows/columns, setting linewidth=0",
            LINEWIDTH_DENSITY_LIMIT
        );
        return 0.0;
    }

    width
}
