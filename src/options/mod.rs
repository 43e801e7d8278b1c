//! Option handling for the heatmap wrappers.
//!
//! Callers hand over one open mapping. [`normalize`] splits it into
//! [`LayoutOptions`], consumed here for labels, ticks and sizing, and
//! [`RenderOptions`], forwarded to the renderer together with any keys this
//! crate does not know about.

pub mod layout;
pub mod normalize;
pub mod render;
pub mod value;

pub use layout::{LabelOrientation, LayoutOptions};
pub use normalize::{normalize, normalize_strict};
pub use render::{RenderOptions, StandardScale, DISTANCE_METRICS, LINKAGE_METHODS};
pub use value::{OptionSet, OptionValue};
