//! Per-object uniform data and its bind group.

use glam::Mat4;

use crate::gpu::buffer::UniformBuffer;

/// GPU-side per-object parameters (group 1, binding 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    /// Model (object-to-world) matrix.
    pub model: [[f32; 4]; 4],
    /// Color multiplier; premultiplication is not applied.
    pub tint: [f32; 4],
    /// `x`: billboard edge length in world units, or star point size.
    pub params: [f32; 4],
}

impl ObjectUniform {
    /// Uniform for `model` with the given tint and primary size parameter.
    #[must_use]
    pub fn new(model: Mat4, tint: [f32; 4], size: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint,
            params: [size, 0.0, 0.0, 0.0],
        }
    }
}

/// An object's uniform buffer plus the bind group exposing it (and, for
/// textured objects, its texture and sampler).
pub(crate) struct ObjectBinding {
    uniform: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
    /// Last value written, so unchanged frames skip the upload.
    current: ObjectUniform,
}

impl ObjectBinding {
    /// Uniform-only binding.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        initial: ObjectUniform,
    ) -> Self {
        Self::with_entries(device, layout, label, initial, &[])
    }

    /// Binding with extra entries after the uniform at binding 0.
    #[must_use]
    pub fn with_entries(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        initial: ObjectUniform,
        extra: &[wgpu::BindGroupEntry<'_>],
    ) -> Self {
        let uniform =
            UniformBuffer::new(device, &format!("{label} Uniform"), &initial);
        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform.buffer().as_entire_binding(),
        }];
        entries.extend_from_slice(extra);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout,
            entries: &entries,
        });
        Self {
            uniform,
            bind_group,
            current: initial,
        }
    }

    /// Upload `value` if it differs from the last upload.
    pub fn update(&mut self, queue: &wgpu::Queue, value: ObjectUniform) {
        if value != self.current {
            self.uniform.write(queue, &value);
            self.current = value;
        }
    }

    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_wgsl() {
        // mat4x4 + vec4 + vec4
        assert_eq!(size_of::<ObjectUniform>(), 96);
    }

    #[test]
    fn size_lands_in_params_x() {
        let u = ObjectUniform::new(Mat4::IDENTITY, [1.0; 4], 4.2);
        assert_eq!(u.params, [4.2, 0.0, 0.0, 0.0]);
        assert_eq!(u.model, Mat4::IDENTITY.to_cols_array_2d());
    }
}
