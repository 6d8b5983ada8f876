//! Background starfield scattered on a spherical shell.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One star, drawn as a distance-attenuated square point.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    /// World-space position before the starfield's own drift.
    pub position: [f32; 3],
}

impl StarInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];

    /// Per-instance vertex buffer layout.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Scatter `count` stars between `min_radius` and `max_radius`.
///
/// Directions are uniform over the sphere (polar angle drawn through
/// `acos`, so the poles are not over-sampled). The same seed always yields
/// the same sky.
#[must_use]
pub fn generate_starfield(
    count: u32,
    min_radius: f32,
    max_radius: f32,
    seed: u64,
) -> Vec<StarInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    let span = max_radius - min_radius;
    (0..count)
        .map(|_| {
            let radius = min_radius + rng.random::<f32>() * span;
            let theta = rng.random::<f32>() * TAU;
            let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
            let (sin_phi, cos_phi) = phi.sin_cos();
            let (sin_theta, cos_theta) = theta.sin_cos();
            StarInstance {
                position: [
                    radius * sin_phi * cos_theta,
                    radius * sin_phi * sin_theta,
                    radius * cos_phi,
                ],
            }
        })
        .collect()
}
