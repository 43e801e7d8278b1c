//! Interactive d3 web export.
//!
//! Writes a self-contained directory: `index.html` with the edge records
//! embedded inline, the `d3heatmap.js` drawing script, and a
//! `d3heatmap.csv` mirror of the records. Embedding the data avoids reading
//! local files from the browser at view time.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::codec::EdgeRecord;
use crate::error::Result;
use crate::logging::{log_operation_end, log_operation_start};
use crate::matrix::LabeledMatrix;
use crate::options::normalize::{Mode, OptionReader};
use crate::options::{OptionSet, OptionValue};

const HTML_TEMPLATE: &str = include_str!("template.html");
const SCRIPT_TEMPLATE: &str = include_str!("d3heatmap.js");

pub const HTML_FILE: &str = "index.html";
pub const SCRIPT_FILE: &str = "d3heatmap.js";
pub const CSV_FILE: &str = "d3heatmap.csv";

/// Settings of the web export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct D3Options {
    pub title: String,
    pub description: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    pub fontsize: u32,
    /// Name of a d3-scale-chromatic interpolator
    pub cmap: String,
    /// Outline color of the hovered cell
    pub stroke: String,
    /// Lower color-scale bound; the data minimum when unset
    pub vmin: Option<f64>,
    /// Upper color-scale bound; the data maximum when unset
    pub vmax: Option<f64>,
}

impl Default for D3Options {
    fn default() -> Self {
        Self {
            title: "d3heatmap".to_string(),
            description: String::new(),
            width: 720,
            height: 720,
            fontsize: 10,
            cmap: "interpolateInferno".to_string(),
            stroke: "#000000".to_string(),
            vmin: None,
            vmax: None,
        }
    }
}

impl D3Options {
    /// Read export settings from an option set. Keys not related to the
    /// export are ignored; wrong types fail with `InvalidOption`.
    pub fn from_options(options: &OptionSet) -> Result<Self> {
        let mut reader = OptionReader::new(options.clone(), Mode::Strict);
        let d = Self::default();

        let d3 = Self {
            title: reader.take("title", d.title, text),
            description: reader.take("description", d.description, text),
            width: reader.take("width", d.width, pixels),
            height: reader.take("height", d.height, pixels),
            fontsize: reader.take("fontsize", d.fontsize, pixels),
            cmap: reader.take("cmap", d.cmap, text),
            stroke: reader.take("stroke", d.stroke, text),
            vmin: reader.take("vmin", d.vmin, bound),
            vmax: reader.take("vmax", d.vmax, bound),
        };
        reader.finish()?;

        Ok(d3)
    }
}

fn text(v: &OptionValue) -> std::result::Result<String, String> {
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("expected text, got {}", v.kind()))
}

fn pixels(v: &OptionValue) -> std::result::Result<u32, String> {
    v.as_i64()
        .filter(|&i| i > 0)
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| format!("expected a positive integer, got {}", v))
}

fn bound(v: &OptionValue) -> std::result::Result<Option<f64>, String> {
    match v {
        OptionValue::Null => Ok(None),
        other => other
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("expected a number or null, got {}", other.kind())),
    }
}

/// Paths written by [`write_d3`]
#[derive(Debug, Clone, PartialEq)]
pub struct D3Export {
    pub html: PathBuf,
    pub script: PathBuf,
    pub csv: PathBuf,
}

/// Values handed to the drawing script
#[derive(Debug, Serialize)]
struct Settings<'a> {
    width: u32,
    height: u32,
    fontsize: u32,
    cmap: &'a str,
    stroke: &'a str,
    vmin: f64,
    vmax: f64,
}

/// Write the web export of `matrix` into `out_dir`.
pub fn write_d3(matrix: &LabeledMatrix, options: &D3Options, out_dir: &Path) -> Result<D3Export> {
    let start = Instant::now();
    let details = out_dir.display().to_string();
    log_operation_start("d3_export", Some(&details));

    let result = write_files(matrix, options, out_dir);
    log_operation_end("d3_export", start, result.is_ok());
    result
}

fn write_files(matrix: &LabeledMatrix, options: &D3Options, out_dir: &Path) -> Result<D3Export> {
    std::fs::create_dir_all(out_dir)?;

    let records = matrix.to_edge_list();
    let (data_min, data_max) = matrix.finite_range().unwrap_or((0.0, 1.0));

    let settings = Settings {
        width: options.width,
        height: options.height,
        fontsize: options.fontsize,
        cmap: &options.cmap,
        stroke: &options.stroke,
        vmin: options.vmin.unwrap_or(data_min),
        vmax: options.vmax.unwrap_or(data_max),
    };

    let csv = out_dir.join(CSV_FILE);
    write_csv(&csv, &records)?;

    let script = out_dir.join(SCRIPT_FILE);
    std::fs::write(&script, SCRIPT_TEMPLATE)?;

    let html = out_dir.join(HTML_FILE);
    std::fs::write(&html, render_html(&records, options, &settings)?)?;

    Ok(D3Export { html, script, csv })
}

fn write_csv(path: &Path, records: &[EdgeRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["source", "target", "value"])?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn render_html(records: &[EdgeRecord], options: &D3Options, settings: &Settings) -> Result<String> {
    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let title = escape_html(&options.title);
    let description = escape_html(&options.description);
    let settings = inline_json(settings)?;
    let data = inline_json(records)?;

    Ok(fill_template(
        HTML_TEMPLATE,
        &[
            ("VERSION", env!("CARGO_PKG_VERSION")),
            ("GENERATED", &generated),
            ("TITLE", &title),
            ("DESCRIPTION", &description),
            ("SETTINGS", &settings),
            ("DATA", &data),
        ],
    ))
}

/// Replace `{{NAME}}` placeholders in one pass. Inserted text is never
/// scanned again; unknown placeholders are left as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let replacement = after.find("}}").and_then(|end| {
            let name = &after[..end];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (end, *value))
        });

        match replacement {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// JSON safe to place inside a `<script>` element
fn inline_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImagescError;
    use crate::matrix::Label;
    use ndarray::array;

    #[test]
    fn test_d3_options_from_options() {
        let options = OptionSet::new()
            .with("title", "Example")
            .with("width", 300)
            .with("height", 300)
            .with("vmax", 1)
            .with("linewidth", 0.2);

        let d3 = D3Options::from_options(&options).unwrap();
        assert_eq!(d3.title, "Example");
        assert_eq!(d3.width, 300);
        assert_eq!(d3.vmax, Some(1.0));
        assert_eq!(d3.vmin, None);
        assert_eq!(d3.fontsize, 10);
    }

    #[test]
    fn test_d3_options_reject_bad_width() {
        let err = D3Options::from_options(&OptionSet::new().with("width", "wide")).unwrap_err();
        assert!(matches!(err, ImagescError::InvalidOption { .. }));
        assert!(D3Options::from_options(&OptionSet::new().with("height", 0)).is_err());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_fill_template() {
        let filled = fill_template("<{{A}}|{{B}}|{{C}}>", &[("A", "{{B}}"), ("B", "b")]);
        assert_eq!(filled, "<{{B}}|b|{{C}}>");
    }

    #[test]
    fn test_placeholders_in_user_text_stay_literal() {
        let matrix = LabeledMatrix::new(
            array![[1.0]],
            Some(vec![Label::from("<img src=x onerror=alert(1)>")]),
            None,
        )
        .unwrap();
        let options = D3Options {
            title: "{{SETTINGS}}".to_string(),
            description: "see {{DATA}}".to_string(),
            ..Default::default()
        };

        let dir = tempfile::tempdir().unwrap();
        let export = write_d3(&matrix, &options, dir.path()).unwrap();
        let html = std::fs::read_to_string(&export.html).unwrap();

        assert!(html.contains(r#"<div class="desc">see {{DATA}}</div>"#));
        assert!(html.contains("<title>{{SETTINGS}}</title>"));
        // the label only appears inside the inline records
        assert_eq!(html.matches("<img").count(), 1);
    }

    #[test]
    fn test_inline_json_escapes_script_end() {
        let json = inline_json(&vec!["</script>"]).unwrap();
        assert_eq!(json, r#"["<\/script>"]"#);
    }

    #[test]
    fn test_write_d3() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export");
        let matrix = LabeledMatrix::new(
            array![[1.0, 2.0], [3.0, f64::NAN]],
            Some(vec!["r0".into(), "r1".into()]),
            Some(vec!["c0".into(), "c1".into()]),
        )
        .unwrap();

        let options = D3Options {
            title: "<Title>".to_string(),
            ..Default::default()
        };
        let export = write_d3(&matrix, &options, &out).unwrap();

        let csv = std::fs::read_to_string(&export.csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "source,target,value");
        assert_eq!(lines[1], "r0,c0,1.0");
        assert_eq!(lines.len(), 5);

        let html = std::fs::read_to_string(&export.html).unwrap();
        assert!(html.contains("&lt;Title&gt;"));
        assert!(html.contains(r#"{"source":"r0","target":"c0","value":1.0}"#));
        assert!(html.contains(r#"{"source":"r1","target":"c1","value":null}"#));
        assert!(html.contains(r#""vmin":1.0,"vmax":3.0"#));
        assert!(!html.contains("{{"));

        assert!(export.script.exists());
    }
}
