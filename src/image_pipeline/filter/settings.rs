use serde::Deserialize;
use serde_json::{Map, Value};

use crate::image_pipeline::common::error::{PipelineError, Result};

/// The recognised keys of a filter settings map.
///
/// Unknown keys are ignored. Absent and `null` keys both mean "leave this
/// field alone". A recognised key holding the wrong kind of value fails the
/// whole parse.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterSettings {
    /// Replacement colour, up to three 0-255 components
    #[serde(default)]
    pub colour: Option<Vec<f64>>,
    /// Key threshold, passed through unscaled
    #[serde(default)]
    pub sensitivity: Option<f64>,
    /// Background image location
    #[serde(default, rename = "backgroundPath")]
    pub background_path: Option<String>,
}

impl FilterSettings {
    pub fn from_map(settings: &Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(settings.clone()))
            .map_err(|e| PipelineError::InvalidArgument(format!("filter settings: {}", e)))
    }

    /// Parses a JSON document that must be a single object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => Self::from_map(&map),
            Ok(other) => Err(PipelineError::InvalidArgument(format!(
                "filter settings must be a JSON object, got {}",
                other
            ))),
            Err(e) => Err(PipelineError::InvalidArgument(format!("filter settings: {}", e))),
        }
    }
}
