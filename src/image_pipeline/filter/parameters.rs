use serde_json::{Map, Value};
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::filter::settings::FilterSettings;

/// Key colour used until the user picks one (pure green).
pub const DEFAULT_REPLACEMENT_COLOUR: [f32; 3] = [0.0, 1.0, 0.0];
pub const DEFAULT_SENSITIVITY: f32 = 0.4;
pub const DEFAULT_SMOOTHING: f32 = 0.3;

/// Largest 8-bit colour component.
const COLOUR_SCALE: f32 = 255.0;

/// Values the chroma-key shader is bound with for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaKeyUniforms {
    pub key_colour: [f32; 3],
    pub sensitivity: f32,
    pub smoothing: f32,
}

/// The tunable parameters of the chroma-key filter.
///
/// Every field is optional: a value built from a settings map only carries the
/// fields the user changed, and [`FilterParameters::update_with`] overlays those
/// onto the current parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParameters {
    replacement_colour: Option<[f32; 3]>,
    background_image: Option<String>,
    sensitivity: Option<f32>,
    smoothing: Option<f32>,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            replacement_colour: Some(DEFAULT_REPLACEMENT_COLOUR),
            background_image: None,
            sensitivity: Some(DEFAULT_SENSITIVITY),
            smoothing: Some(DEFAULT_SMOOTHING),
        }
    }
}

impl FilterParameters {
    /// Parameters with every field absent.
    pub fn unset() -> Self {
        Self {
            replacement_colour: None,
            background_image: None,
            sensitivity: None,
            smoothing: None,
        }
    }

    /// Builds parameters from an untyped settings map.
    ///
    /// Recognised keys are `colour` (up to three components in `0..=255`),
    /// `sensitivity` and `backgroundPath`. Fields whose key is missing stay
    /// unset, they do not take the defaults.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when a recognised key holds a value of the wrong shape
    /// or a colour component outside `0..=255`.
    pub fn from_map(settings: &Map<String, Value>) -> Result<Self> {
        Self::from_settings(FilterSettings::from_map(settings)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_settings(FilterSettings::from_json_str(json)?)
    }

    pub fn from_settings(settings: FilterSettings) -> Result<Self> {
        let mut parameters = Self::unset();

        if let Some(colour) = settings.colour {
            parameters.set_replacement_colour(&colour)?;
        }
        if let Some(sensitivity) = settings.sensitivity {
            // Checked after narrowing, values past f32::MAX become infinite
            let narrowed = sensitivity as f32;
            if !narrowed.is_finite() {
                return Err(PipelineError::InvalidArgument(format!(
                    "sensitivity must be a finite f32, got {}",
                    sensitivity
                )));
            }
            parameters.sensitivity = Some(narrowed);
        }
        if let Some(path) = settings.background_path {
            parameters.background_image = Some(path);
        }

        Ok(parameters)
    }

    /// Normalized `[r, g, b]` in `0.0..=1.0`.
    pub fn replacement_colour(&self) -> Option<[f32; 3]> {
        self.replacement_colour
    }

    pub fn background_image(&self) -> Option<&str> {
        self.background_image.as_deref()
    }

    pub fn sensitivity(&self) -> Option<f32> {
        self.sensitivity
    }

    pub fn smoothing(&self) -> Option<f32> {
        self.smoothing
    }

    /// Replaces the whole colour from 0-255 components.
    ///
    /// Components past the third are ignored, missing ones become `0.0`.
    pub fn set_replacement_colour(&mut self, components: &[f64]) -> Result<()> {
        let mut colour = [0.0f32; 3];
        for (channel, &value) in colour.iter_mut().zip(components) {
            if !value.is_finite() || !(0.0..=COLOUR_SCALE as f64).contains(&value) {
                return Err(PipelineError::InvalidArgument(format!(
                    "colour component {} is outside 0-255",
                    value
                )));
            }
            *channel = value as f32 / COLOUR_SCALE;
        }
        self.replacement_colour = Some(colour);
        Ok(())
    }

    pub fn set_background_image(&mut self, path: impl Into<String>) {
        self.background_image = Some(path.into());
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = Some(sensitivity);
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = Some(smoothing);
    }

    /// Overlays the fields `other` has set onto `self`.
    ///
    /// Background image, replacement colour and sensitivity are each replaced
    /// whole when present in `other`. Smoothing is never taken from `other`.
    pub fn update_with(&mut self, other: &FilterParameters) {
        if let Some(path) = &other.background_image {
            debug!(background = %path, "Updating background image");
            self.background_image = Some(path.clone());
        }
        if let Some(colour) = other.replacement_colour {
            debug!(?colour, "Updating replacement colour");
            self.replacement_colour = Some(colour);
        }
        if let Some(sensitivity) = other.sensitivity {
            debug!(sensitivity, "Updating sensitivity");
            self.sensitivity = Some(sensitivity);
        }
    }

    /// Shader values, with unset fields falling back to the defaults.
    pub fn uniforms(&self) -> ChromaKeyUniforms {
        ChromaKeyUniforms {
            key_colour: self.replacement_colour.unwrap_or(DEFAULT_REPLACEMENT_COLOUR),
            sensitivity: self.sensitivity.unwrap_or(DEFAULT_SENSITIVITY),
            smoothing: self.smoothing.unwrap_or(DEFAULT_SMOOTHING),
        }
    }
}
