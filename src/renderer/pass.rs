//! Draw-pass primitives: one pipeline plus the buffers it draws from.
//!
//! Every hero pass binds the camera at group 0 and its object binding at
//! group 1; the passes differ only in vertex input and blending.

use super::object::ObjectBinding;
use super::pipeline_util::{self, Blending};
use crate::error::HorizonError;
use crate::gpu::buffer::StaticBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderSource};
use crate::scene::{Mesh, Vertex};

/// Everything needed to build one hero pipeline.
pub(crate) struct PipelineDesc<'a> {
    pub shader: &'a ShaderSource,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'static>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub blending: Blending,
}

/// Create a triangle-list pipeline with `vs_main` / `fs_main` entry points
/// drawing into the surface format with depth testing.
pub(crate) fn create_pipeline(
    context: &RenderContext,
    composer: &mut ShaderComposer,
    desc: &PipelineDesc<'_>,
) -> Result<wgpu::RenderPipeline, HorizonError> {
    let label = desc.shader.label;
    let shader = composer.compose(&context.device, desc.shader)?;

    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Pipeline Layout")),
            bind_group_layouts: desc.bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    Ok(context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} Pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: desc.vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::color_target(
                    context.format(),
                    desc.blending,
                ),
                compilation_options: Default::default(),
            }),
            // The disk is visible from both sides; nothing else is ever
            // seen from behind.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state(
                desc.blending,
            )),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        }))
}

/// An indexed-mesh draw pass.
pub(crate) struct MeshPass {
    pipeline: wgpu::RenderPipeline,
    vertices: StaticBuffer<Vertex>,
    indices: StaticBuffer<u32>,
    pub object: ObjectBinding,
}

impl MeshPass {
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        pipeline: wgpu::RenderPipeline,
        mesh: &Mesh,
        object: ObjectBinding,
    ) -> Self {
        Self {
            pipeline,
            vertices: StaticBuffer::new(
                device,
                &format!("{label} Vertices"),
                &mesh.vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            indices: StaticBuffer::new(
                device,
                &format!("{label} Indices"),
                &mesh.indices,
                wgpu::BufferUsages::INDEX,
            ),
            object,
        }
    }

    /// Set pipeline, object bind group and buffers, then draw.
    ///
    /// Caller must set the camera bind group before calling this.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.indices.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(1, self.object.bind_group(), &[]);
        render_pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        render_pass.set_index_buffer(
            self.indices.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.indices.count(), 0, 0..1);
    }
}

/// A quad-per-instance draw pass: six vertices generated in the shader for
/// each instance, with optional per-instance vertex data.
pub(crate) struct SpritePass {
    pipeline: wgpu::RenderPipeline,
    instances: Option<wgpu::Buffer>,
    instance_count: u32,
    pub object: ObjectBinding,
}

impl SpritePass {
    /// A single sprite with no instance buffer.
    #[must_use]
    pub fn single(pipeline: wgpu::RenderPipeline, object: ObjectBinding) -> Self {
        Self {
            pipeline,
            instances: None,
            instance_count: 1,
            object,
        }
    }

    /// One sprite per element of `instances`.
    #[must_use]
    pub fn instanced<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        pipeline: wgpu::RenderPipeline,
        instances: &[T],
        object: ObjectBinding,
    ) -> Self {
        let buffer = StaticBuffer::new(
            device,
            &format!("{label} Instances"),
            instances,
            wgpu::BufferUsages::VERTEX,
        );
        Self {
            pipeline,
            instance_count: buffer.count(),
            instances: Some(buffer.into_buffer()),
            object,
        }
    }

    /// Number of sprites drawn.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Set pipeline, object bind group and instance buffer, then draw.
    ///
    /// Caller must set the camera bind group before calling this.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(1, self.object.bind_group(), &[]);
        if let Some(instances) = &self.instances {
            render_pass.set_vertex_buffer(0, instances.slice(..));
        }
        render_pass.draw(0..6, 0..self.instance_count);
    }
}
