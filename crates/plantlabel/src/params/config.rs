//! Renderer defaults, operator overrides and the parameter set type.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::value::ParamValue;
use crate::error::{PlantLabelError, Result};

pub const PLANT_NAME: &str = "plant_name";
pub const SCIENTIFIC_NAME: &str = "scientific_name";
pub const NICKNAME: &str = "nickname";
pub const WATER_DROPS: &str = "water_drops";
pub const LIGHT_TYPE: &str = "light_type";
pub const SHOW_DRY_SOIL_SYMBOL: &str = "show_dry_soil_symbol";
pub const SPIKE_ENABLED: &str = "spike_enabled";
pub const ENABLE_HANGING_HOLES: &str = "enable_hanging_holes";
pub const LABEL_WIDTH: &str = "label_width";
pub const LABEL_HEIGHT: &str = "label_height";

/// Keys filled from each record; these always beat global settings.
pub const RECORD_KEYS: [&str; 10] = [
    PLANT_NAME,
    SCIENTIFIC_NAME,
    NICKNAME,
    WATER_DROPS,
    LIGHT_TYPE,
    SHOW_DRY_SOIL_SYMBOL,
    SPIKE_ENABLED,
    ENABLE_HANGING_HOLES,
    LABEL_WIDTH,
    LABEL_HEIGHT,
];

/// Named values handed to the renderer for one label, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderParameterSet {
    values: IndexMap<String, ParamValue>,
}

impl RenderParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, keeping the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `name=literal` definitions, one per parameter.
    pub fn definitions(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| format!("{}={}", key, value.to_literal()))
            .collect()
    }
}

impl FromIterator<(String, ParamValue)> for RenderParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Default values of every parameter the label template understands.
pub fn renderer_defaults() -> RenderParameterSet {
    use ParamValue::{Bool, Integer, Number, Text};

    [
        (PLANT_NAME, Text(String::new())),
        (SCIENTIFIC_NAME, Text(String::new())),
        (NICKNAME, Text(String::new())),
        (WATER_DROPS, Integer(2)),
        (LIGHT_TYPE, Integer(2)),
        (SHOW_DRY_SOIL_SYMBOL, Bool(false)),
        (SPIKE_ENABLED, Bool(false)),
        (ENABLE_HANGING_HOLES, Bool(false)),
        (LABEL_WIDTH, Number(80.0)),
        (LABEL_HEIGHT, Number(30.0)),
        ("label_thickness", Number(2.0)),
        ("corner_radius", Number(3.0)),
        ("text_depth", Number(0.8)),
        ("plant_name_size", Number(6.0)),
        ("scientific_name_size", Number(4.0)),
        ("nickname_size", Number(4.5)),
        ("symbol_size_multiplier", Number(1.0)),
        ("show_scientific_name", Bool(true)),
        ("show_nickname", Bool(true)),
        ("show_care_symbols", Bool(true)),
        ("frame_enabled", Bool(true)),
        ("frame_width", Number(1.5)),
        ("spike_length", Number(60.0)),
        ("spike_width", Number(8.0)),
        ("hole_diameter", Number(4.0)),
        ("font", Text("Liberation Sans:style=Bold".to_string())),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Renderer defaults merged with operator overrides.
///
/// Built once at startup and shared by reference; it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderConfig {
    base: RenderParameterSet,
}

impl RenderConfig {
    /// Configuration with the template defaults only.
    pub fn new() -> Self {
        Self {
            base: renderer_defaults(),
        }
    }

    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Merged global parameters, before any per-record values.
    pub fn base(&self) -> &RenderParameterSet {
        &self.base
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects overrides and checks them against the defaults.
#[derive(Debug, Clone, Default)]
pub struct RenderConfigBuilder {
    overrides: IndexMap<String, ParamValue>,
}

impl RenderConfigBuilder {
    /// Override one parameter. Later calls win.
    pub fn set(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.overrides.insert(key.into(), value);
        self
    }

    /// Override from `KEY=VALUE` text; the value is typed when building.
    pub fn set_assignment(self, assignment: &str) -> Result<Self> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            PlantLabelError::Config(format!(
                "Expected KEY=VALUE, got '{}'",
                assignment
            ))
        })?;
        Ok(self.set(key.trim(), ParamValue::Text(value.to_string())))
    }

    /// Merge overrides from a JSON object file.
    pub fn load_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PlantLabelError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let values: IndexMap<String, ParamValue> = serde_json::from_str(&text)?;
        debug!(path = %path.display(), count = values.len(), "loaded parameter overrides");
        self.overrides.extend(values);
        Ok(self)
    }

    /// Type-check every override and merge it over the defaults.
    pub fn build(self) -> Result<RenderConfig> {
        let mut base = renderer_defaults();

        for (key, value) in self.overrides {
            let Some(default) = base.get(&key) else {
                return Err(PlantLabelError::Config(format!(
                    "Unknown renderer parameter '{}'",
                    key
                )));
            };
            let kind = default.kind();
            let shown = value.to_literal();
            let value = value.coerce(kind).ok_or_else(|| {
                PlantLabelError::Config(format!(
                    "Parameter '{}' expects a {} value, got {}",
                    key,
                    kind.label(),
                    shown
                ))
            })?;

            if RECORD_KEYS.contains(&key.as_str()) {
                warn!(parameter = %key, "override is replaced by each plant's own value");
            }
            base.insert(key, value);
        }

        Ok(RenderConfig { base })
    }
}
