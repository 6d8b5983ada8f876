use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::invalid;
use crate::error::HorizonError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and render-surface parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Distance of the eye from the hero along +Z.
    #[schemars(title = "Distance", range(min = 1.5, max = 10.0), extend("step" = 0.1))]
    pub distance: f32,
    /// Upper bound on the device pixel ratio used for the backing store.
    #[schemars(title = "Max Pixel Ratio", range(min = 1.0, max = 4.0), extend("step" = 0.5))]
    pub max_pixel_ratio: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.1,
            zfar: 200.0,
            distance: 3.2,
            max_pixel_ratio: 2.0,
        }
    }
}

impl CameraOptions {
    pub(super) fn validate(&self) -> Result<(), HorizonError> {
        if !(self.fovy > 0.0 && self.fovy < 180.0) {
            return Err(invalid("camera.fovy", "must be in (0, 180) degrees"));
        }
        if !(self.znear > 0.0 && self.zfar > self.znear) {
            return Err(invalid("camera.zfar", "must exceed a positive znear"));
        }
        if self.max_pixel_ratio < 1.0 {
            return Err(invalid("camera.max_pixel_ratio", "must be at least 1"));
        }
        Ok(())
    }
}
