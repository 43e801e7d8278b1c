//! Option values and the open option mapping.
//!
//! Options arrive as a free-form mapping from name to a JSON-like value. The
//! normalizer pulls the reserved keys out of it; everything else is carried
//! along untouched for the renderer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ImagescError, Result};

/// A single option value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Explicitly unset (`None` on the renderer side)
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integral number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text value (colors, colormap names, labels)
    Text(String),
    /// Sequence of values, e.g. a figure size
    List(Vec<OptionValue>),
    /// Nested mapping, e.g. annotation keyword arguments
    Map(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Int(i) => Some(*i as f64),
            OptionValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integral view of the value; floats are accepted when they carry no
    /// fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            OptionValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// A two-element numeric list such as `[15, 5]`.
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match self {
            OptionValue::List(items) if items.len() == 2 => {
                Some((items[0].as_f64()?, items[1].as_f64()?))
            }
            _ => None,
        }
    }

    /// Short name of the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Null => "null",
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "int",
            OptionValue::Float(_) => "float",
            OptionValue::Text(_) => "text",
            OptionValue::List(_) => "list",
            OptionValue::Map(_) => "map",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "<{}>", self.kind()),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value as i64)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Int(value as i64)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<(f64, f64)> for OptionValue {
    fn from((a, b): (f64, f64)) -> Self {
        OptionValue::List(vec![OptionValue::Float(a), OptionValue::Float(b)])
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => OptionValue::Null,
        }
    }
}

/// An ordered mapping from option name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, OptionValue>);

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<OptionValue>) -> Option<OptionValue> {
        self.0.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a key if present. Absence is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Merge `other` into this set; keys in `other` win.
    pub fn merge(&mut self, other: OptionSet) {
        self.0.extend(other.0);
    }

    /// Parse a `key=value` assignment as given on the command line.
    ///
    /// The value is read as JSON when possible (`dpi=200`, `figsize=[10,10]`,
    /// `cbar=false`), otherwise it is taken verbatim as text (`cmap=rainbow`).
    pub fn parse_assignment(assignment: &str) -> Result<(String, OptionValue)> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| ImagescError::Parse {
                message: format!("Expected key=value, got '{}'", assignment),
            })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(ImagescError::Parse {
                message: format!("Missing option name in '{}'", assignment),
            });
        }

        let value = serde_json::from_str::<OptionValue>(raw.trim())
            .unwrap_or_else(|_| OptionValue::Text(raw.to_string()));

        Ok((key.to_string(), value))
    }
}

impl FromIterator<(String, OptionValue)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        OptionSet(iter.into_iter().collect())
    }
}

impl IntoIterator for OptionSet {
    type Item = (String, OptionValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_value_deserialization() {
        let v: OptionValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, OptionValue::Null);

        let v: OptionValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, OptionValue::Int(3));

        let v: OptionValue = serde_json::from_str("0.5").unwrap();
        assert_eq!(v, OptionValue::Float(0.5));

        let v: OptionValue = serde_json::from_str("[15, 5]").unwrap();
        assert_eq!(v.as_pair(), Some((15.0, 5.0)));

        let v: OptionValue = serde_json::from_str(r#"{"size": 12}"#).unwrap();
        assert_eq!(v.kind(), "map");
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(OptionValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(OptionValue::Float(90.0).as_i64(), Some(90));
        assert_eq!(OptionValue::Float(0.5).as_i64(), None);
        assert_eq!(OptionValue::Text("1".into()).as_f64(), None);
    }

    #[test]
    fn test_parse_assignment() {
        let (k, v) = OptionSet::parse_assignment("dpi=200").unwrap();
        assert_eq!(k, "dpi");
        assert_eq!(v, OptionValue::Int(200));

        let (k, v) = OptionSet::parse_assignment("cmap=rainbow").unwrap();
        assert_eq!(k, "cmap");
        assert_eq!(v, OptionValue::Text("rainbow".to_string()));

        let (_, v) = OptionSet::parse_assignment("figsize=[10,10]").unwrap();
        assert_eq!(v.as_pair(), Some((10.0, 10.0)));

        let (_, v) = OptionSet::parse_assignment("linecolor=#ffffff").unwrap();
        assert_eq!(v.as_str(), Some("#ffffff"));

        assert!(OptionSet::parse_assignment("novalue").is_err());
        assert!(OptionSet::parse_assignment("=3").is_err());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut options = OptionSet::new().with("cbar", false);
        assert_eq!(options.remove("cbar"), Some(OptionValue::Bool(false)));
        assert_eq!(options.remove("cbar"), None);
        assert!(options.is_empty());
    }
}
