//! Heatmap wrappers.
//!
//! Each wrapper kind prepares the same inputs a little differently before
//! handing them to a [`Renderer`]:
//!
//! - **seaborn**: annotated heatmap with labels on both axes
//! - **cluster**: heatmap reordered by hierarchical clustering
//! - **fast**: plain image with optional labels and colorbar
//! - **clean**: bare image, no labels, no axes
//! - **plot**: matplotlib-style image with optional labels and grid

pub mod renderer;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, Level};

use crate::error::{ImagescError, Result};
use crate::geometry::{clamp_linewidth, derive_figure_size, FigureSize};
use crate::logging::{log_timed_operation, with_verbosity};
use crate::matrix::{check_labels, default_labels, normalize_matrix, Label};
use crate::options::{normalize, LayoutOptions, OptionSet, OptionValue, RenderOptions};

pub use renderer::{save_figure, Figure, Renderer, SaveOptions};

/// The wrapper flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatmapKind {
    Seaborn,
    Cluster,
    Fast,
    Clean,
    Plot,
}

impl HeatmapKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeatmapKind::Seaborn => "seaborn",
            HeatmapKind::Cluster => "cluster",
            HeatmapKind::Fast => "fast",
            HeatmapKind::Clean => "clean",
            HeatmapKind::Plot => "plot",
        }
    }

    /// Whether the figure size follows the data aspect ratio
    fn derives_figsize(&self) -> bool {
        matches!(self, HeatmapKind::Plot | HeatmapKind::Clean)
    }

    /// Whether dense grids get their lines suppressed
    fn clamps_linewidth(&self) -> bool {
        !matches!(self, HeatmapKind::Clean)
    }
}

impl fmt::Display for HeatmapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeatmapKind {
    type Err = ImagescError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "seaborn" => Ok(HeatmapKind::Seaborn),
            "cluster" => Ok(HeatmapKind::Cluster),
            "fast" => Ok(HeatmapKind::Fast),
            "clean" => Ok(HeatmapKind::Clean),
            "plot" => Ok(HeatmapKind::Plot),
            _ => Err(ImagescError::invalid_option(
                "kind",
                format!(
                    "Unknown heatmap kind: {}. Must be one of: seaborn, cluster, fast, clean, plot",
                    s
                ),
            )),
        }
    }
}

/// Explicit styling handed to the renderer with every heatmap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub font_scale: f64,
    /// Use the renderer's short color codes
    pub color_codes: bool,
    /// Resolution used when the figure is saved
    pub dpi: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_scale: 1.2,
            color_codes: true,
            dpi: 100,
        }
    }
}

/// Everything a renderer needs to draw one heatmap
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedHeatmap {
    pub kind: HeatmapKind,
    /// Cell values, normalized if requested
    pub data: Array2<f64>,
    /// Row labels to draw, if any
    pub row_labels: Option<Vec<Label>>,
    /// Column labels to draw, if any
    pub col_labels: Option<Vec<Label>>,
    pub figsize: FigureSize,
    pub layout: LayoutOptions,
    pub render: RenderOptions,
    pub style: Style,
}

/// Prepare `data` for rendering as a heatmap of the given kind.
pub fn prepare(
    kind: HeatmapKind,
    data: ArrayView2<f64>,
    row_labels: Option<&[Label]>,
    col_labels: Option<&[Label]>,
    options: &OptionSet,
) -> Result<PreparedHeatmap> {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return Err(ImagescError::EmptyMatrix { rows, cols });
    }
    if let Some(labels) = row_labels {
        check_labels("rows", labels, rows)?;
    }
    if let Some(labels) = col_labels {
        check_labels("columns", labels, cols)?;
    }

    let (mut render, layout) = normalize(options);

    let figsize = if kind.derives_figsize() {
        derive_figure_size(rows, cols, layout.figsize)
    } else {
        layout.figsize
    };

    if kind.clamps_linewidth() {
        let clamped = with_verbosity(layout.verbose, Level::WARN, || {
            clamp_linewidth(render.linewidth, rows, cols)
        });
        if clamped != render.linewidth {
            // the clamped width replaces whatever was passed
            render.extra.remove("linewidth");
            render.linewidth = clamped;
        }
    }

    let data = with_verbosity(layout.verbose, Level::INFO, || {
        normalize_matrix(data, layout.normalize)
    });

    let (row_labels, col_labels) = match kind {
        HeatmapKind::Seaborn | HeatmapKind::Cluster => (
            Some(row_labels.map_or_else(|| default_labels(rows), <[Label]>::to_vec)),
            Some(col_labels.map_or_else(|| default_labels(cols), <[Label]>::to_vec)),
        ),
        HeatmapKind::Fast | HeatmapKind::Plot => (
            row_labels.map(<[Label]>::to_vec),
            col_labels.map(<[Label]>::to_vec),
        ),
        HeatmapKind::Clean => (None, None),
    };

    let style = Style {
        dpi: layout.dpi,
        ..Style::default()
    };

    debug!(
        kind = %kind,
        rows = rows,
        cols = cols,
        width = figsize.width,
        height = figsize.height,
        linewidth = render.linewidth,
        "Prepared heatmap"
    );

    Ok(PreparedHeatmap {
        kind,
        data,
        row_labels,
        col_labels,
        figsize,
        layout,
        render,
        style,
    })
}

/// Keys the plot wrapper consumes itself rather than forwarding
const PLOT_CONSUMED_KEYS: [&str; 8] = [
    "linewidth",
    "linecolor",
    "cbar",
    "standard_scale",
    "distance",
    "linkage",
    "annot",
    "annot_kws",
];

impl PreparedHeatmap {
    /// The keyword arguments this kind forwards to the renderer call.
    pub fn renderer_arguments(&self) -> OptionSet {
        let all = self.render.to_option_set();

        match self.kind {
            HeatmapKind::Seaborn => {
                let mut args = all.clone();
                for key in ["standard_scale", "distance", "linkage"] {
                    args.remove(key);
                }
                args
            }
            HeatmapKind::Cluster => pick(&all, &[
                ("method", "linkage"),
                ("metric", "distance"),
                ("linecolor", "linecolor"),
                ("linewidths", "linewidth"),
                ("cmap", "cmap"),
                ("standard_scale", "standard_scale"),
                ("vmin", "vmin"),
                ("vmax", "vmax"),
            ]),
            HeatmapKind::Fast | HeatmapKind::Clean => {
                pick(&all, &[("cmap", "cmap"), ("vmin", "vmin"), ("vmax", "vmax")])
            }
            HeatmapKind::Plot => {
                let mut args = all.clone();
                for key in PLOT_CONSUMED_KEYS {
                    args.remove(key);
                }
                args
            }
        }
    }

    /// Whether the renderer should draw a colorbar
    pub fn shows_colorbar(&self) -> bool {
        match self.kind {
            HeatmapKind::Clean => false,
            _ => self.render.cbar,
        }
    }

    /// Grid line width, zero when grid lines are off
    pub fn grid_linewidth(&self) -> f64 {
        if self.layout.grid {
            self.render.linewidth
        } else {
            0.0
        }
    }

    /// Title to draw, if any
    pub fn title(&self) -> Option<&str> {
        match self.kind {
            HeatmapKind::Clean => None,
            _ => self.layout.title.as_deref(),
        }
    }
}

/// Copy `key` of `all` under `name` for each `(name, key)` pair.
fn pick(all: &OptionSet, pairs: &[(&str, &str)]) -> OptionSet {
    pairs
        .iter()
        .map(|&(name, key)| {
            let value = all.get(key).cloned().unwrap_or(OptionValue::Null);
            (name.to_string(), value)
        })
        .collect()
}

/// Prepare and render a heatmap of the given kind.
pub fn render<R: Renderer>(
    renderer: &R,
    kind: HeatmapKind,
    data: ArrayView2<f64>,
    row_labels: Option<&[Label]>,
    col_labels: Option<&[Label]>,
    options: &OptionSet,
) -> Result<R::Figure> {
    let heatmap = prepare(kind, data, row_labels, col_labels, options)?;
    debug!(renderer = renderer.name(), kind = %kind, "Rendering heatmap");
    let operation = format!("render_{}", kind);
    log_timed_operation(&operation, || renderer.render(&heatmap))
}

/// Heatmap with labels on both axes
pub fn seaborn<R: Renderer>(
    renderer: &R,
    data: ArrayView2<f64>,
    row_labels: Option<&[Label]>,
    col_labels: Option<&[Label]>,
    options: &OptionSet,
) -> Result<R::Figure> {
    render(renderer, HeatmapKind::Seaborn, data, row_labels, col_labels, options)
}

/// Clustered heatmap
pub fn cluster<R: Renderer>(
    renderer: &R,
    data: ArrayView2<f64>,
    row_labels: Option<&[Label]>,
    col_labels: Option<&[Label]>,
    options: &OptionSet,
) -> Result<R::Figure> {
    render(renderer, HeatmapKind::Cluster, data, row_labels, col_labels, options)
}

pub fn fast<R: Renderer>(
    renderer: &R,
    data: ArrayView2<f64>,
    row_labels: Option<&[Label]>,
    col_labels: Option<&[Label]>,
    options: &OptionSet,
) -> Result<R::Figure> {
    render(renderer, HeatmapKind::Fast, data, row_labels, col_labels, options)
}

/// Bare image; labels are ignored
pub fn clean<R: Renderer>(renderer: &R, data: ArrayView2<f64>, options: &OptionSet) -> Result<R::Figure> {
    render(renderer, HeatmapKind::Clean, data, None, None, options)
}

pub fn plot<R: Renderer>(
    renderer: &R,
    data: ArrayView2<f64>,
    row_labels: Option<&[Label]>,
    col_labels: Option<&[Label]>,
    options: &OptionSet,
) -> Result<R::Figure> {
    render(renderer, HeatmapKind::Plot, data, row_labels, col_labels, options)
}
