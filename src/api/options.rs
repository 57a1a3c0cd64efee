use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PlotsError, PlotsResult};
use crate::render::Color;

/// Loosely typed value for options without a dedicated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<f64>),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<f64>> for OptionValue {
    fn from(value: Vec<f64>) -> Self {
        Self::List(value)
    }
}

/// Drawing parameters forwarded to the canvas with a chart request.
///
/// Common parameters have typed fields; anything else travels through
/// `extra` untouched and is interpreted (or rejected) by the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    pub color: Option<Color>,
    pub edge_color: Option<Color>,
    pub line_width: Option<f64>,
    pub alpha: Option<f64>,
    pub cmap: Option<String>,
    pub bins: Option<usize>,
    pub width: Option<f64>,
    /// Marker area in square points.
    pub marker_size: Option<f64>,
    pub extra: IndexMap<String, OptionValue>,
}

impl DrawOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn with_cmap(mut self, cmap: impl Into<String>) -> Self {
        self.cmap = Some(cmap.into());
        self
    }

    #[must_use]
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = Some(bins);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_marker_size(mut self, marker_size: f64) -> Self {
        self.marker_size = Some(marker_size);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Rejects `extra` keys outside `accepted`.
    pub fn ensure_extras(&self, chart: &'static str, accepted: &[&str]) -> PlotsResult<()> {
        match self
            .extra
            .keys()
            .find(|key| !accepted.contains(&key.as_str()))
        {
            Some(key) => Err(PlotsError::UnsupportedOption {
                chart,
                key: key.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn extra_bool(&self, key: &str) -> PlotsResult<Option<bool>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(OptionValue::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(invalid(key, "a boolean")),
        }
    }

    pub fn extra_f64(&self, key: &str) -> PlotsResult<Option<f64>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(OptionValue::Float(value)) => Ok(Some(*value)),
            Some(OptionValue::Int(value)) => Ok(Some(*value as f64)),
            Some(_) => Err(invalid(key, "a number")),
        }
    }

    pub fn extra_usize(&self, key: &str) -> PlotsResult<Option<usize>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(OptionValue::Int(value)) => usize::try_from(*value)
                .map(Some)
                .map_err(|_| invalid(key, "a non-negative integer")),
            Some(_) => Err(invalid(key, "a non-negative integer")),
        }
    }

    pub fn extra_text(&self, key: &str) -> PlotsResult<Option<&str>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(OptionValue::Text(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(invalid(key, "a string")),
        }
    }

    /// A list, or a scalar broadcast to `len` entries.
    pub fn extra_list(&self, key: &str, len: usize) -> PlotsResult<Option<Vec<f64>>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(OptionValue::List(values)) => Ok(Some(values.clone())),
            Some(OptionValue::Float(value)) => Ok(Some(vec![*value; len])),
            Some(OptionValue::Int(value)) => Ok(Some(vec![*value as f64; len])),
            Some(_) => Err(invalid(key, "a number or a list of numbers")),
        }
    }
}

fn invalid(key: &str, expected: &'static str) -> PlotsError {
    PlotsError::InvalidOption {
        key: key.to_owned(),
        expected,
    }
}
