use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::invalid;
use crate::error::HorizonError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Per-frame motion rates and pointer response.
///
/// All rates are applied once per display refresh, not per second.
pub struct MotionOptions {
    /// Idle rotation added to the group's X angle every frame (radians).
    #[schemars(title = "Idle Spin X", range(min = 0.0, max = 0.02), extend("step" = 0.0005))]
    pub idle_spin_x: f32,
    /// Idle rotation added to the group's Y angle every frame (radians).
    #[schemars(title = "Idle Spin Y", range(min = 0.0, max = 0.02), extend("step" = 0.0005))]
    pub idle_spin_y: f32,
    /// Fraction of the remaining gap to the pointer target closed per frame.
    #[schemars(title = "Damping", range(min = 0.001, max = 0.2), extend("step" = 0.001))]
    pub damping: f32,
    /// Radians of rotation per pixel of drag.
    #[schemars(title = "Drag Sensitivity", range(min = 0.001, max = 0.02), extend("step" = 0.0005))]
    pub drag_sensitivity: f32,
    /// Full angular span of the pointer parallax; targets fall in
    /// `±parallax_span / 2`.
    #[schemars(title = "Parallax Span", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub parallax_span: f32,
    /// Accretion disk spin about its own axis per frame (radians).
    #[schemars(title = "Disk Spin", range(min = 0.0, max = 0.05), extend("step" = 0.001))]
    pub disk_spin: f32,
    /// Starfield drift about the world Y axis per frame (radians).
    #[schemars(title = "Star Drift", range(min = 0.0, max = 0.01), extend("step" = 0.0001))]
    pub star_drift: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            idle_spin_x: 0.0015,
            idle_spin_y: 0.0025,
            damping: 0.02,
            drag_sensitivity: 0.005,
            parallax_span: PI * 0.1,
            disk_spin: 0.004,
            star_drift: 0.0005,
        }
    }
}

impl MotionOptions {
    pub(crate) fn validate(&self) -> Result<(), HorizonError> {
        // Damping outside (0, 1] either never converges or overshoots.
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(invalid("motion.damping", "must be in (0, 1]"));
        }
        if !self.parallax_span.is_finite() || self.parallax_span < 0.0 {
            return Err(invalid(
                "motion.parallax_span",
                "must be finite and non-negative",
            ));
        }
        if !self.drag_sensitivity.is_finite() {
            return Err(invalid("motion.drag_sensitivity", "must be finite"));
        }
        Ok(())
    }
}
