//! World transforms of the hero objects for one frame.

use glam::{Mat4, Vec3};

use crate::animation::HeroMotion;
use crate::options::SceneOptions;

/// Model matrices for every hero object, derived from [`HeroMotion`].
///
/// The horizon, disk and halo share the group rotation; the disk adds its
/// tilt and spin on top. The starfield sits outside the group and only
/// drifts about the world Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroGroup {
    /// Group rotation (event horizon, halo anchor).
    pub group: Mat4,
    /// Group rotation × disk tilt × disk spin.
    pub disk: Mat4,
    /// Starfield drift.
    pub stars: Mat4,
}

impl HeroGroup {
    /// Transforms for the current motion state.
    #[must_use]
    pub fn new(motion: &HeroMotion, scene: &SceneOptions) -> Self {
        let rotation = motion.rotation();
        let group =
            Mat4::from_rotation_x(rotation.x) * Mat4::from_rotation_y(rotation.y);
        let disk = group
            * Mat4::from_rotation_x(scene.disk_tilt)
            * Mat4::from_rotation_z(motion.disk_angle());
        let stars = Mat4::from_rotation_y(motion.star_angle());
        Self { group, disk, stars }
    }

    /// World-space center of the halo sprite.
    #[must_use]
    pub fn halo_center(&self) -> Vec3 {
        self.group.transform_point3(Vec3::ZERO)
    }

    /// World-space normal of the disk plane.
    #[must_use]
    pub fn disk_normal(&self) -> Vec3 {
        self.disk.transform_vector3(Vec3::Z).normalize()
    }
}
