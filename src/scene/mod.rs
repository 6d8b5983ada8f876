//! The hero object group: procedural geometry, textures, and per-frame
//! transforms.
//!
//! [`HeroGeometry`] is built once from [`SceneOptions`] and uploaded to the
//! GPU; [`HeroGroup`] is recomputed from the motion state every frame.

mod gradient;
mod group;
mod mesh;
mod starfield;

pub use gradient::{radial_gradient, GradientTexture};
pub use group::HeroGroup;
pub use mesh::{ring_mesh, sphere_mesh, Mesh, Vertex};
pub use starfield::{generate_starfield, StarInstance};

use crate::options::SceneOptions;

/// CPU-side geometry and textures for every hero object.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroGeometry {
    /// Event-horizon sphere.
    pub horizon: Mesh,
    /// Accretion disk annulus.
    pub disk: Mesh,
    /// Background stars.
    pub stars: Vec<StarInstance>,
    /// Disk glow texture.
    pub disk_texture: GradientTexture,
    /// Halo sprite texture.
    pub halo_texture: GradientTexture,
}

impl HeroGeometry {
    /// Build all hero geometry from scene options.
    #[must_use]
    pub fn build(scene: &SceneOptions) -> Self {
        Self {
            horizon: sphere_mesh(
                scene.horizon_radius,
                scene.horizon_segments,
                scene.horizon_segments,
            ),
            disk: ring_mesh(
                scene.disk_inner_radius,
                scene.disk_outer_radius,
                scene.disk_segments,
            ),
            stars: generate_starfield(
                scene.star_count,
                scene.star_min_radius,
                scene.star_max_radius,
                scene.star_seed,
            ),
            disk_texture: radial_gradient(
                scene.texture_size,
                &scene.disk_gradient,
            ),
            halo_texture: radial_gradient(
                scene.texture_size,
                &scene.halo_gradient,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_builds_every_part() {
        let geometry = HeroGeometry::build(&SceneOptions::default());
        assert_eq!(geometry.horizon.vertices.len(), 65 * 65);
        assert_eq!(geometry.disk.vertices.len(), 2 * 129);
        assert_eq!(geometry.stars.len(), 800);
        assert_eq!(geometry.disk_texture.size, 256);
        assert_eq!(geometry.halo_texture.size, 256);
    }

    #[test]
    fn halo_is_fainter_than_disk() {
        let geometry = HeroGeometry::build(&SceneOptions::default());
        let disk = geometry.disk_texture.texel(128, 128)[3];
        let halo = geometry.halo_texture.texel(128, 128)[3];
        assert!(halo < disk);
    }
}
