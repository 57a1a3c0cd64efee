use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlotsError, PlotsResult};

/// Host configuration key for the default color map.
pub const PLOTS_CMAP: &str = "PLOTS_CMAP";
/// Host configuration key for the bundled static asset directory.
pub const STATIC_FOLDER: &str = "STATIC_FOLDER";
/// Host configuration key for the default bar height.
pub const BAR_HEIGHT: &str = "BAR_HEIGHT";

pub const DEFAULT_COLOR_MAP: &str = "Greys";
pub const DEFAULT_STATIC_FOLDER: &str = "plots";
pub const DEFAULT_BAR_HEIGHT: f64 = 50.0;

/// Defaults the dispatcher substitutes into drawing calls.
///
/// Built once when the extension is bound; `Plots` only hands out shared
/// references afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotsConfig {
    pub color_map_name: String,
    pub bar_height_default: f64,
    pub static_asset_path: String,
}

impl Default for PlotsConfig {
    fn default() -> Self {
        Self {
            color_map_name: DEFAULT_COLOR_MAP.to_owned(),
            bar_height_default: DEFAULT_BAR_HEIGHT,
            static_asset_path: DEFAULT_STATIC_FOLDER.to_owned(),
        }
    }
}

impl PlotsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color_map_name(mut self, name: impl Into<String>) -> Self {
        self.color_map_name = name.into();
        self
    }

    #[must_use]
    pub fn with_bar_height_default(mut self, height: f64) -> Self {
        self.bar_height_default = height;
        self
    }

    #[must_use]
    pub fn with_static_asset_path(mut self, path: impl Into<String>) -> Self {
        self.static_asset_path = path.into();
        self
    }

    pub fn validate(&self) -> PlotsResult<()> {
        if !self.bar_height_default.is_finite() {
            return Err(PlotsError::InvalidConfig(format!(
                "{BAR_HEIGHT} must be a finite number"
            )));
        }
        if self.static_asset_path.trim().is_empty() {
            return Err(PlotsError::InvalidConfig(format!(
                "{STATIC_FOLDER} must not be empty"
            )));
        }
        Ok(())
    }

    /// Reads the three keys from a host configuration, falling back to the
    /// defaults for absent keys.
    pub fn from_app_config(app: &AppConfig) -> PlotsResult<Self> {
        let defaults = Self::default();
        let config = Self {
            color_map_name: match app.get(PLOTS_CMAP) {
                None => defaults.color_map_name,
                Some(value) => text(PLOTS_CMAP, value)?,
            },
            bar_height_default: match app.get(BAR_HEIGHT) {
                None => defaults.bar_height_default,
                Some(value) => value.as_f64().ok_or_else(|| {
                    PlotsError::InvalidConfig(format!("{BAR_HEIGHT} must be a number"))
                })?,
            },
            static_asset_path: match app.get(STATIC_FOLDER) {
                None => defaults.static_asset_path,
                Some(value) => text(STATIC_FOLDER, value)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> PlotsResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotsError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> PlotsResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotsError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn text(key: &str, value: &Value) -> PlotsResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| PlotsError::InvalidConfig(format!("{key} must be a string")))
}

/// Key/value configuration of the hosting application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfig {
    values: IndexMap<String, Value>,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Inserts `value` only when `key` is absent; returns the value now
    /// stored under `key`.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &Value {
        self.values.entry(key.into()).or_insert_with(|| value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_json_str(input: &str) -> PlotsResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotsError::InvalidConfig(format!("failed to parse host config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{AppConfig, PlotsConfig};

    #[test]
    fn set_default_keeps_existing_values() {
        let mut app = AppConfig::new();
        app.insert("PLOTS_CMAP", "Blues");
        assert_eq!(app.set_default("PLOTS_CMAP", "Greys"), &json!("Blues"));
        assert_eq!(app.set_default("BAR_HEIGHT", 50.0), &json!(50.0));
    }

    #[test]
    fn integer_bar_height_is_accepted() {
        let mut app = AppConfig::new();
        app.insert("BAR_HEIGHT", 20);
        let config = PlotsConfig::from_app_config(&app).expect("config");
        assert_eq!(config.bar_height_default, 20.0);
    }

    #[test]
    fn color_map_names_are_not_resolved_at_bind_time() {
        let config = PlotsConfig::new().with_color_map_name("coolwarm");
        assert!(config.validate().is_ok());
    }
}
