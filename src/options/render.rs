//! Render options: reserved keys the renderer and clustering engine
//! understand, plus an open bag of everything else.

use serde::{Deserialize, Serialize};

use super::normalize::OptionReader;
use super::value::{OptionSet, OptionValue};
use crate::error::{ImagescError, Result};

/// Linkage methods accepted by the clustering engine
pub const LINKAGE_METHODS: [&str; 7] = [
    "single", "complete", "average", "weighted", "centroid", "median", "ward",
];

/// Pairwise distance metrics accepted by the clustering engine
pub const DISTANCE_METRICS: [&str; 22] = [
    "braycurtis",
    "canberra",
    "chebyshev",
    "cityblock",
    "correlation",
    "cosine",
    "dice",
    "euclidean",
    "hamming",
    "jaccard",
    "jensenshannon",
    "kulczynski1",
    "mahalanobis",
    "matching",
    "minkowski",
    "rogerstanimoto",
    "russellrao",
    "seuclidean",
    "sokalmichener",
    "sokalsneath",
    "sqeuclidean",
    "yule",
];

/// Per-axis standardization applied by the clustering engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StandardScale {
    #[default]
    Off,
    Rows,
    Columns,
}

impl StandardScale {
    fn from_value(v: &OptionValue) -> std::result::Result<Self, String> {
        match v {
            OptionValue::Null | OptionValue::Bool(false) => Ok(StandardScale::Off),
            OptionValue::Int(0) => Ok(StandardScale::Rows),
            OptionValue::Int(1) => Ok(StandardScale::Columns),
            other => Err(format!("expected false, 0 or 1, got {}", other)),
        }
    }

    pub fn to_value(self) -> OptionValue {
        match self {
            StandardScale::Off => OptionValue::Bool(false),
            StandardScale::Rows => OptionValue::Int(0),
            StandardScale::Columns => OptionValue::Int(1),
        }
    }
}

/// Options forwarded to the external renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub standard_scale: StandardScale,
    /// Show the colorbar
    pub cbar: bool,
    pub linewidth: f64,
    /// Print each cell's value inside the cell
    pub annot: bool,
    pub linecolor: String,
    pub cmap: String,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    pub distance: String,
    pub linkage: String,
    /// Unrecognized options and reserved ones of an unexpected type, passed
    /// through unchanged
    pub extra: OptionSet,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            standard_scale: StandardScale::Off,
            cbar: true,
            linewidth: 0.1,
            annot: false,
            linecolor: "#000000".to_string(),
            cmap: "coolwarm".to_string(),
            vmin: None,
            vmax: None,
            distance: "euclidean".to_string(),
            linkage: "ward".to_string(),
            extra: OptionSet::new(),
        }
    }
}

impl RenderOptions {
    /// Names of the reserved render keys
    pub const KEYS: [&'static str; 10] = [
        "standard_scale",
        "cbar",
        "linewidth",
        "annot",
        "linecolor",
        "cmap",
        "vmin",
        "vmax",
        "distance",
        "linkage",
    ];

    /// Take the reserved render keys out of the reader. Whatever is left
    /// in the reader afterwards belongs in `extra`.
    pub(crate) fn read(reader: &mut OptionReader) -> Self {
        let d = Self::default();

        Self {
            standard_scale: reader.take("standard_scale", d.standard_scale, StandardScale::from_value),
            cbar: reader.take("cbar", d.cbar, to_bool),
            linewidth: reader.take("linewidth", d.linewidth, |v| {
                v.as_f64()
                    .ok_or_else(|| format!("expected a number, got {}", v.kind()))
            }),
            annot: reader.take("annot", d.annot, to_bool),
            linecolor: reader.take("linecolor", d.linecolor, to_string),
            cmap: reader.take("cmap", d.cmap, to_string),
            vmin: reader.take("vmin", d.vmin, to_bound),
            vmax: reader.take("vmax", d.vmax, to_bound),
            distance: reader.take("distance", d.distance, to_string),
            linkage: reader.take("linkage", d.linkage, to_string),
            extra: OptionSet::new(),
        }
    }

    /// Check value domains that the type alone does not capture.
    pub fn validate(&self) -> Result<()> {
        if !self.linewidth.is_finite() {
            return Err(ImagescError::invalid_option(
                "linewidth",
                format!("must be finite, got {}", self.linewidth),
            ));
        }

        if !LINKAGE_METHODS.contains(&self.linkage.as_str()) {
            return Err(ImagescError::invalid_option(
                "linkage",
                format!(
                    "Unknown linkage method: {}. Must be one of: {}",
                    self.linkage,
                    LINKAGE_METHODS.join(", ")
                ),
            ));
        }

        if !DISTANCE_METRICS.contains(&self.distance.as_str()) {
            return Err(ImagescError::invalid_option(
                "distance",
                format!("Unknown distance metric: {}", self.distance),
            ));
        }

        if let (Some(lo), Some(hi)) = (self.vmin, self.vmax) {
            if lo > hi {
                return Err(ImagescError::invalid_option(
                    "vmin",
                    format!("vmin ({}) is greater than vmax ({})", lo, hi),
                ));
            }
        }

        Ok(())
    }

    /// All render options, reserved and extra, as a plain option set.
    /// A value in `extra` wins over the typed field of the same name.
    pub fn to_option_set(&self) -> OptionSet {
        let mut set = OptionSet::new();
        set.insert("standard_scale", self.standard_scale.to_value());
        set.insert("cbar", self.cbar);
        set.insert("linewidth", self.linewidth);
        set.insert("annot", self.annot);
        set.insert("linecolor", self.linecolor.as_str());
        set.insert("cmap", self.cmap.as_str());
        set.insert("vmin", self.vmin);
        set.insert("vmax", self.vmax);
        set.insert("distance", self.distance.as_str());
        set.insert("linkage", self.linkage.as_str());
        set.merge(self.extra.clone());
        set
    }
}

fn to_bool(v: &OptionValue) -> std::result::Result<bool, String> {
    v.as_bool()
        .ok_or_else(|| format!("expected bool, got {}", v.kind()))
}

fn to_string(v: &OptionValue) -> std::result::Result<String, String> {
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("expected text, got {}", v.kind()))
}

fn to_bound(v: &OptionValue) -> std::result::Result<Option<f64>, String> {
    match v {
        OptionValue::Null => Ok(None),
        other => other
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("expected a number or null, got {}", other.kind())),
    }
}
