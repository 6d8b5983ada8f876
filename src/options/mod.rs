//! Centralized hero-scene options with TOML and JSON support.
//!
//! Every tuned constant of the scene (projection, motion rates, geometry,
//! palette) lives here so a page can restyle the hero without a rebuild.
//! Options serialize to/from TOML for the native viewer and from JSON for
//! the web entry point.

mod camera;
mod motion;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use motion::MotionOptions;
pub use scene::{GradientStops, SceneOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::HorizonError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial documents (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and render-surface parameters.
    pub camera: CameraOptions,
    /// Per-frame motion rates and pointer response.
    pub motion: MotionOptions,
    /// Geometry and palette of the hero objects.
    pub scene: SceneOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds an out-of-range value.
    pub fn load(path: &Path) -> Result<Self, HorizonError> {
        let content = std::fs::read_to_string(path).map_err(HorizonError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| HorizonError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), HorizonError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HorizonError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HorizonError::Io)?;
        }
        std::fs::write(path, content).map_err(HorizonError::Io)
    }

    /// Parse options from a JSON string (as handed over by the page).
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::OptionsParse`] for malformed JSON and
    /// [`HorizonError::InvalidOption`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, HorizonError> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| HorizonError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Reject values the scene cannot be built or animated with.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::InvalidOption`] naming the first bad field.
    pub fn validate(&self) -> Result<(), HorizonError> {
        self.camera.validate()?;
        self.motion.validate()?;
        self.scene.validate()
    }
}

/// Shorthand for building an [`HorizonError::InvalidOption`].
pub(crate) fn invalid(field: &str, reason: &str) -> HorizonError {
    HorizonError::InvalidOption {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[motion]
damping = 0.05
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.motion.damping, 0.05);
        // Everything else should be default
        assert_eq!(opts.motion.drag_sensitivity, 0.005);
        assert_eq!(opts.camera.fovy, 60.0);
        assert_eq!(opts.scene.star_count, 800);
    }

    #[test]
    fn json_overrides_single_field() {
        let opts =
            Options::from_json(r#"{ "scene": { "star_count": 12 } }"#).unwrap();
        assert_eq!(opts.scene.star_count, 12);
        assert_eq!(opts.scene.disk_outer_radius, 1.9);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Options::from_json("{ not json").unwrap_err();
        assert!(matches!(err, HorizonError::OptionsParse(_)));
    }

    #[test]
    fn validation_rejects_unstable_damping() {
        let err = Options::from_json(r#"{ "motion": { "damping": 1.5 } }"#)
            .unwrap_err();
        assert!(
            matches!(err, HorizonError::InvalidOption { ref field, .. } if field == "motion.damping")
        );
    }

    #[test]
    fn validation_rejects_inverted_disk() {
        let mut opts = Options::default();
        opts.scene.disk_inner_radius = 2.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("motion"));
        assert!(props.contains_key("scene"));

        let motion = &props["motion"]["properties"];
        assert!(motion.get("damping").is_some());
        assert!(motion.get("drag_sensitivity").is_some());
    }
}
