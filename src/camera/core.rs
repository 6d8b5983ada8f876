use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and the camera
/// basis used to orient billboards.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera right vector in world space.
    pub right: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Camera up vector in world space.
    pub up: [f32; 3],
    /// Backing-store height in physical pixels (for point sizing).
    pub viewport_height: f32,
}

impl Camera {
    /// Camera on +Z at `options.distance`, looking at the origin.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, options.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Recompute the aspect ratio for a new surface size. Ignores
    /// zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            right: [1.0, 0.0, 0.0],
            fovy: 60.0,
            up: [0.0, 1.0, 0.0],
            viewport_height: 1.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera, viewport_height: u32) {
        let view = camera.build_view();
        self.view_proj = (camera.build_projection() * view).to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.fovy = camera.fovy;
        // Rows of the view rotation are the camera basis in world space.
        self.right = view.row(0).truncate().to_array();
        self.up = view.row(1).truncate().to_array();
        self.viewport_height = viewport_height.max(1) as f32;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn hero_camera_defaults() {
        let camera = Camera::new(&CameraOptions::default(), 1.5);
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 3.2));
        assert_eq!(camera.fovy, 60.0);
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 200.0);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::new(&CameraOptions::default(), 4.0 / 3.0);
        let clip = camera.build_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut camera = Camera::new(&CameraOptions::default(), 2.0);
        camera.resize(0, 600);
        assert_eq!(camera.aspect, 2.0);
        camera.resize(800, 600);
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn uniform_basis_matches_unrotated_camera() {
        let camera = Camera::new(&CameraOptions::default(), 1.0);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, 600);
        assert_eq!(uniform.right, [1.0, 0.0, 0.0]);
        assert_eq!(uniform.up, [0.0, 1.0, 0.0]);
        assert_eq!(uniform.viewport_height, 600.0);
        assert_eq!(size_of::<CameraUniform>(), 112);
    }
}
