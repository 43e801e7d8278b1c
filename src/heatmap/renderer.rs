//! The seam to the external rendering library.
//!
//! imagesc never draws anything itself. A [`Renderer`] turns a
//! [`PreparedHeatmap`] into a figure, and a [`Figure`] knows how to write
//! itself to disk.

use std::path::Path;
use tracing::{debug, info};

use super::PreparedHeatmap;
use crate::error::Result;

/// Turns a prepared heatmap into a figure
pub trait Renderer {
    /// Opaque figure handle produced by this renderer
    type Figure: Figure;

    /// Render `heatmap`. The style and all options travel inside the
    /// heatmap; a renderer must not rely on process-wide state.
    fn render(&self, heatmap: &PreparedHeatmap) -> Result<Self::Figure>;

    /// Get the name of this renderer
    fn name(&self) -> &str;
}

/// A rendered figure that can be written to a file
pub trait Figure {
    fn save(&self, path: &Path, options: &SaveOptions) -> Result<()>;
}

/// Options for [`save_figure`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveOptions {
    pub dpi: u32,
    /// Transparent background
    pub transparent: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            dpi: 100,
            transparent: false,
        }
    }
}

/// Write `figure` to `path`, creating the parent directory if needed.
///
/// Returns `Ok(false)` without touching the figure when `path` is empty,
/// `Ok(true)` once the figure has been written.
pub fn save_figure<F: Figure + ?Sized>(
    figure: &F,
    path: &Path,
    options: &SaveOptions,
) -> Result<bool> {
    if path.as_os_str().is_empty() {
        debug!("Empty figure path, nothing saved");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    figure.save(path, options)?;
    info!(path = %path.display(), dpi = options.dpi, "Figure saved");
    Ok(true)
}
