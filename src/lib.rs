//! # imagesc
//!
//! Heatmaps in an easy way.
//!
//! This library owns the logic that sits in front of a plotting backend:
//! option normalization, figure geometry, cell-value normalization and the
//! matrix/edge-list conversion used by the interactive web export. Drawing
//! itself is left to a [`heatmap::Renderer`] implementation.
//!
//! ## Key Features
//!
//! - **Option normalization**: one open option map split into layout options
//!   and render options, with documented defaults and pass-through of
//!   renderer-specific keys
//! - **Geometry**: aspect-ratio-aware figure sizes and linewidth suppression
//!   on dense grids
//! - **Edge lists**: labeled matrix to `(source, target, value)` records and back
//! - **Web export**: self-contained d3 heatmap with the data embedded inline
//!
//! ## Example
//!
//! ```
//! use imagesc::codec::to_edge_list;
//! use imagesc::matrix::Label;
//! use ndarray::array;
//!
//! let m = array![[1.0, 2.0], [3.0, 4.0]];
//! let rows = vec![Label::from("r0"), Label::from("r1")];
//! let cols = vec![Label::from("c0"), Label::from("c1")];
//! let records = to_edge_list(m.view(), &rows, &cols).unwrap();
//! assert_eq!(records.len(), 4);
//! assert_eq!(records[1].target, Label::from("c1"));
//! ```

pub mod codec;
pub mod config;
pub mod data_loader;
pub mod error;
pub mod export;
pub mod geometry;
pub mod heatmap;
pub mod logging;
pub mod matrix;
pub mod options;

pub use codec::{from_edge_list, to_edge_list, EdgeRecord};
pub use config::Config;
pub use error::{ImagescError, Result};
pub use geometry::{clamp_linewidth, derive_figure_size, FigureSize};
pub use heatmap::{prepare, save_figure, Figure, HeatmapKind, PreparedHeatmap, Renderer, Style};
pub use matrix::{normalize_matrix, Label, LabeledMatrix};
pub use options::{normalize, normalize_strict, LayoutOptions, OptionSet, OptionValue, RenderOptions};
