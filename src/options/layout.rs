//! Layout options: the part of the option set consumed locally for labels,
//! sizing and ticks. None of these reach the renderer as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalize::OptionReader;
use super::value::{OptionSet, OptionValue};
use crate::error::{ImagescError, Result};
use crate::geometry::FigureSize;

/// Where column labels are drawn relative to the heatmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOrientation {
    Above,
    #[default]
    Below,
}

impl LabelOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelOrientation::Above => "above",
            LabelOrientation::Below => "below",
        }
    }
}

impl fmt::Display for LabelOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelOrientation {
    type Err = ImagescError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "above" => Ok(LabelOrientation::Above),
            "below" => Ok(LabelOrientation::Below),
            _ => Err(ImagescError::invalid_option(
                "label_orientation",
                format!("Unknown orientation: {}. Must be one of: above, below", s),
            )),
        }
    }
}

/// Options consumed by imagesc itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: Option<String>,
    /// Show axes
    pub axis: bool,
    /// Draw cell grid lines
    pub grid: bool,
    /// Center and scale cell values before rendering
    pub normalize: bool,
    pub label_orientation: LabelOrientation,
    /// 0 (silent) to 5 (trace)
    pub verbose: u8,
    /// Column label rotation in degrees
    pub xtick_rot: f64,
    /// Row label rotation in degrees
    pub ytick_rot: f64,
    pub dpi: u32,
    /// Requested figure size in inches
    pub figsize: FigureSize,
    /// Layout values of an unexpected type, kept as given
    #[serde(default)]
    pub unparsed: OptionSet,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            xlabel: None,
            ylabel: None,
            title: None,
            axis: true,
            grid: true,
            normalize: false,
            label_orientation: LabelOrientation::Below,
            verbose: 3,
            xtick_rot: 90.0,
            ytick_rot: 0.0,
            dpi: 100,
            figsize: FigureSize::new(15.0, 5.0),
            unparsed: OptionSet::new(),
        }
    }
}

impl LayoutOptions {
    /// Names of all layout keys, as they appear in an option set
    pub const KEYS: [&'static str; 12] = [
        "xlabel",
        "ylabel",
        "title",
        "axis",
        "grid",
        "normalize",
        "label_orientation",
        "verbose",
        "xtickRot",
        "ytickRot",
        "dpi",
        "figsize",
    ];

    /// Move every layout key out of the reader, filling absent keys with
    /// their defaults.
    pub(crate) fn read(reader: &mut OptionReader) -> Self {
        let d = Self::default();

        let mut layout = Self {
            xlabel: reader.take("xlabel", d.xlabel, to_text),
            ylabel: reader.take("ylabel", d.ylabel, to_text),
            title: reader.take("title", d.title, to_text),
            axis: reader.take("axis", d.axis, to_bool),
            grid: reader.take("grid", d.grid, to_bool),
            normalize: reader.take("normalize", d.normalize, to_bool),
            label_orientation: reader.take("label_orientation", d.label_orientation, |v| {
                v.as_str()
                    .ok_or_else(|| format!("expected text, got {}", v.kind()))?
                    .parse::<LabelOrientation>()
                    .map_err(|e| e.to_string())
            }),
            verbose: reader.take("verbose", d.verbose, |v| {
                v.as_i64()
                    .and_then(|i| u8::try_from(i).ok())
                    .ok_or_else(|| format!("expected a level between 0 and 255, got {}", v))
            }),
            xtick_rot: reader.take("xtickRot", d.xtick_rot, to_angle),
            ytick_rot: reader.take("ytickRot", d.ytick_rot, to_angle),
            dpi: reader.take("dpi", d.dpi, |v| {
                v.as_i64()
                    .filter(|&i| i > 0)
                    .and_then(|i| u32::try_from(i).ok())
                    .ok_or_else(|| format!("expected a positive integer, got {}", v))
            }),
            figsize: reader.take("figsize", d.figsize, |v| {
                v.as_pair()
                    .filter(|(w, h)| w.is_finite() && h.is_finite() && *w > 0.0 && *h > 0.0)
                    .map(|(w, h)| FigureSize::new(w, h))
                    .ok_or_else(|| format!("expected [width, height] with positive values, got {}", v))
            }),
            unparsed: OptionSet::new(),
        };

        // lenient reads leave malformed layout values behind
        for key in Self::KEYS {
            if let Some(value) = reader.remove(key) {
                layout.unparsed.insert(key, value);
            }
        }

        layout
    }

    /// The layout options as a plain option set, keyed like the input.
    /// Unparsed values take the place of their typed defaults.
    pub fn to_option_set(&self) -> OptionSet {
        let mut set = OptionSet::new()
            .with("xlabel", self.xlabel.clone())
            .with("ylabel", self.ylabel.clone())
            .with("title", self.title.clone())
            .with("axis", self.axis)
            .with("grid", self.grid)
            .with("normalize", self.normalize)
            .with("label_orientation", self.label_orientation.as_str())
            .with("verbose", self.verbose as i64)
            .with("xtickRot", self.xtick_rot)
            .with("ytickRot", self.ytick_rot)
            .with("dpi", self.dpi)
            .with("figsize", (self.figsize.width, self.figsize.height));
        set.merge(self.unparsed.clone());
        set
    }
}

fn to_text(v: &OptionValue) -> std::result::Result<Option<String>, String> {
    match v {
        OptionValue::Null => Ok(None),
        OptionValue::Text(s) => Ok(Some(s.clone())),
        OptionValue::Int(i) => Ok(Some(i.to_string())),
        OptionValue::Float(f) => Ok(Some(f.to_string())),
        other => Err(format!("expected text, got {}", other.kind())),
    }
}

fn to_bool(v: &OptionValue) -> std::result::Result<bool, String> {
    v.as_bool()
        .ok_or_else(|| format!("expected bool, got {}", v.kind()))
}

fn to_angle(v: &OptionValue) -> std::result::Result<f64, String> {
    v.as_f64()
        .filter(|a| a.is_finite())
        .ok_or_else(|| format!("expected an angle in degrees, got {}", v))
}
