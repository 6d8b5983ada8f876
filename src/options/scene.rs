use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::invalid;
use crate::error::HorizonError;

/// Largest sphere or disk segment count; keeps vertex indices well inside
/// `u32`.
const MAX_SEGMENTS: u32 = 1024;
/// WebGL2's guaranteed `max_texture_dimension_2d`.
const MAX_TEXTURE_SIZE: u32 = 2048;
const MAX_STARS: u32 = 100_000;

/// Two-stop radial gradient, center color to rim color.
///
/// Colors are straight (non-premultiplied) RGBA in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GradientStops {
    /// Color at the center of the texture.
    pub inner: [f32; 4],
    /// Color at the inscribed circle and beyond.
    pub outer: [f32; 4],
}

impl GradientStops {
    /// Build from 8-bit RGB channels and float alphas, CSS `rgba()` style.
    #[must_use]
    pub fn from_rgba8(
        inner: [u8; 3],
        inner_a: f32,
        outer: [u8; 3],
        outer_a: f32,
    ) -> Self {
        let norm = |c: [u8; 3], a: f32| {
            [
                f32::from(c[0]) / 255.0,
                f32::from(c[1]) / 255.0,
                f32::from(c[2]) / 255.0,
                a,
            ]
        };
        Self {
            inner: norm(inner, inner_a),
            outer: norm(outer, outer_a),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Geometry and palette of the hero objects.
pub struct SceneOptions {
    /// Radius of the event-horizon sphere.
    #[schemars(title = "Horizon Radius", range(min = 0.2, max = 2.0), extend("step" = 0.05))]
    pub horizon_radius: f32,
    /// Longitudinal and latitudinal segment count of the sphere.
    #[schemars(skip)]
    pub horizon_segments: u32,
    /// Inner radius of the accretion disk.
    #[schemars(title = "Disk Inner Radius", range(min = 0.5, max = 3.0), extend("step" = 0.05))]
    pub disk_inner_radius: f32,
    /// Outer radius of the accretion disk.
    #[schemars(title = "Disk Outer Radius", range(min = 0.5, max = 4.0), extend("step" = 0.05))]
    pub disk_outer_radius: f32,
    /// Angular segment count of the disk.
    #[schemars(skip)]
    pub disk_segments: u32,
    /// Disk tilt about the group's X axis (radians).
    #[schemars(title = "Disk Tilt", range(min = 0.0, max = 3.2), extend("step" = 0.01))]
    pub disk_tilt: f32,
    /// Disk gradient (center bright, rim transparent).
    #[schemars(skip)]
    pub disk_gradient: GradientStops,
    /// World-space edge length of the halo sprite.
    #[schemars(title = "Halo Scale", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub halo_scale: f32,
    /// Halo gradient.
    #[schemars(skip)]
    pub halo_gradient: GradientStops,
    /// Edge length in texels of the generated gradient textures.
    #[schemars(skip)]
    pub texture_size: u32,
    /// Number of background stars.
    #[schemars(title = "Star Count", range(min = 0, max = 5000))]
    pub star_count: u32,
    /// Inner radius of the starfield shell.
    #[schemars(skip)]
    pub star_min_radius: f32,
    /// Outer radius of the starfield shell.
    #[schemars(skip)]
    pub star_max_radius: f32,
    /// Star size in world units, attenuated by distance.
    #[schemars(title = "Star Size", range(min = 0.005, max = 0.2), extend("step" = 0.005))]
    pub star_size: f32,
    /// Seed for the starfield layout.
    #[schemars(skip)]
    pub star_seed: u64,
    /// Color written where nothing is drawn (transparent by default so the
    /// page shows through).
    #[schemars(skip)]
    pub clear_color: [f64; 4],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            horizon_radius: 1.0,
            horizon_segments: 64,
            disk_inner_radius: 1.2,
            disk_outer_radius: 1.9,
            disk_segments: 128,
            disk_tilt: PI / 2.2,
            disk_gradient: GradientStops::from_rgba8(
                [255, 180, 80],
                0.9,
                [255, 120, 40],
                0.0,
            ),
            halo_scale: 4.2,
            halo_gradient: GradientStops::from_rgba8(
                [255, 200, 120],
                0.25,
                [0, 0, 0],
                0.0,
            ),
            texture_size: 256,
            star_count: 800,
            star_min_radius: 20.0,
            star_max_radius: 80.0,
            star_size: 0.02,
            star_seed: 0x5eed_b1ac,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl SceneOptions {
    pub(super) fn validate(&self) -> Result<(), HorizonError> {
        if self.horizon_radius <= 0.0 {
            return Err(invalid("scene.horizon_radius", "must be positive"));
        }
        if !(3..=MAX_SEGMENTS).contains(&self.horizon_segments) {
            return Err(invalid(
                "scene.horizon_segments",
                "must be in 3..=1024",
            ));
        }
        if !(self.disk_inner_radius >= 0.0
            && self.disk_outer_radius > self.disk_inner_radius)
        {
            return Err(invalid(
                "scene.disk_outer_radius",
                "must exceed a non-negative inner radius",
            ));
        }
        if !(3..=MAX_SEGMENTS).contains(&self.disk_segments) {
            return Err(invalid("scene.disk_segments", "must be in 3..=1024"));
        }
        if !(2..=MAX_TEXTURE_SIZE).contains(&self.texture_size) {
            return Err(invalid("scene.texture_size", "must be in 2..=2048"));
        }
        if self.star_count > MAX_STARS {
            return Err(invalid("scene.star_count", "must be at most 100000"));
        }
        if !(self.star_min_radius > 0.0
            && self.star_max_radius >= self.star_min_radius)
        {
            return Err(invalid(
                "scene.star_max_radius",
                "must not be below a positive minimum radius",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_oversized_geometry() {
        let huge_texture = SceneOptions {
            texture_size: 70_000,
            ..SceneOptions::default()
        };
        assert!(matches!(
            huge_texture.validate(),
            Err(HorizonError::InvalidOption { ref field, .. })
                if field == "scene.texture_size"
        ));

        let huge_sphere = SceneOptions {
            horizon_segments: 70_000,
            ..SceneOptions::default()
        };
        assert!(matches!(
            huge_sphere.validate(),
            Err(HorizonError::InvalidOption { ref field, .. })
                if field == "scene.horizon_segments"
        ));

        let huge_disk = SceneOptions {
            disk_segments: 70_000,
            ..SceneOptions::default()
        };
        assert!(huge_disk.validate().is_err());
    }

    #[test]
    fn largest_accepted_geometry_validates() {
        let scene = SceneOptions {
            horizon_segments: 1024,
            disk_segments: 1024,
            texture_size: 2048,
            ..SceneOptions::default()
        };
        assert!(scene.validate().is_ok());
    }
}
