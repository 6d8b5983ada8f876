//! Procedural triangle meshes for the event horizon and accretion disk.

use std::f32::consts::{PI, TAU};

/// Position + texture coordinate vertex shared by all hero meshes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching `@location(0)` / `@location(1)`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle indices, three per face.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of indices (for `draw_indexed`).
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// UV sphere centered at the origin with its poles on ±Y.
///
/// Rows of vertices run pole to pole; the seam column is duplicated so UVs
/// wrap cleanly. Degenerate triangles at the poles are skipped.
#[must_use]
pub fn sphere_mesh(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
) -> Mesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let row = w + 1;

    let mut vertices = Vec::with_capacity(row as usize * (h as usize + 1));
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();
            let (sin_theta, cos_theta) = (v * PI).sin_cos();
            vertices.push(Vertex {
                position: [
                    -radius * cos_phi * sin_theta,
                    radius * cos_theta,
                    radius * sin_phi * sin_theta,
                ],
                uv: [u, 1.0 - v],
            });
        }
    }

    let mut indices =
        Vec::with_capacity(w as usize * (h as usize * 2 - 2) * 3);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Mesh { vertices, indices }
}

/// Flat annulus in the XY plane facing +Z.
///
/// UVs map the outer radius onto the unit square, so a radial texture
/// centered at (0.5, 0.5) fades out exactly at the rim.
#[must_use]
pub fn ring_mesh(inner_radius: f32, outer_radius: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let row = segments + 1;

    let mut vertices = Vec::with_capacity(row as usize * 2);
    for radius in [inner_radius, outer_radius] {
        for i in 0..=segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            let x = radius * cos;
            let y = radius * sin;
            vertices.push(Vertex {
                position: [x, y, 0.0],
                uv: [
                    (x / outer_radius + 1.0) / 2.0,
                    (y / outer_radius + 1.0) / 2.0,
                ],
            });
        }
    }

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let a = i;
        let b = i + row;
        let c = i + row + 1;
        let d = i + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    Mesh { vertices, indices }
}
