//! GPU rendering of the hero scene.
//!
//! [`HeroRenderer`] owns one pass per hero object and draws them in a
//! single render pass: stars, horizon, disk, halo. Opaque objects write
//! depth; the additive disk and halo only test against it.

mod object;
mod pass;
pub(crate) mod pipeline_util;

pub use object::ObjectUniform;

use object::ObjectBinding;
use pass::{MeshPass, PipelineDesc, SpritePass};
use pipeline_util::Blending;

use crate::camera::{Camera, CameraUniform};
use crate::error::HorizonError;
use crate::gpu::buffer::UniformBuffer;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{
    ShaderComposer, BILLBOARD_SHADER, DISK_SHADER, HORIZON_SHADER,
    STARS_SHADER,
};
use crate::gpu::texture::{DepthTarget, SampledTexture};
use crate::options::SceneOptions;
use crate::scene::{HeroGeometry, HeroGroup, StarInstance, Vertex};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

fn textured_entries<'a>(
    texture: &'a SampledTexture,
    sampler: &'a wgpu::Sampler,
) -> [wgpu::BindGroupEntry<'a>; 2] {
    [
        wgpu::BindGroupEntry {
            binding: 1,
            resource: wgpu::BindingResource::TextureView(&texture.view),
        },
        wgpu::BindGroupEntry {
            binding: 2,
            resource: wgpu::BindingResource::Sampler(sampler),
        },
    ]
}

/// Bind group layouts shared by every hero pipeline.
pub struct PipelineLayouts {
    /// Group 0: camera uniform.
    pub camera: wgpu::BindGroupLayout,
    /// Group 1 for untextured objects: object uniform.
    pub object: wgpu::BindGroupLayout,
    /// Group 1 for textured objects: object uniform, texture, sampler.
    pub textured: wgpu::BindGroupLayout,
}

impl PipelineLayouts {
    fn new(device: &wgpu::Device) -> Self {
        let camera =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Layout"),
                entries: &[pipeline_helpers::uniform_buffer(0)],
            });
        let object =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Layout"),
                entries: &[pipeline_helpers::uniform_buffer(0)],
            });
        let textured =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Textured Object Layout"),
                entries: &[
                    pipeline_helpers::uniform_buffer(0),
                    pipeline_helpers::texture_2d(1),
                    pipeline_helpers::filtering_sampler(2),
                ],
            });
        Self {
            camera,
            object,
            textured,
        }
    }
}

/// Draws the hero scene into a surface texture.
pub struct HeroRenderer {
    camera_uniform: CameraUniform,
    camera_buffer: UniformBuffer<CameraUniform>,
    camera_bind_group: wgpu::BindGroup,
    stars: SpritePass,
    horizon: MeshPass,
    disk: MeshPass,
    halo: SpritePass,
    depth: DepthTarget,
    clear_color: wgpu::Color,
    star_size: f32,
    halo_scale: f32,
    // Textures must outlive the bind groups that reference their views.
    _disk_texture: SampledTexture,
    _halo_texture: SampledTexture,
}

impl HeroRenderer {
    /// Upload `geometry` and build every pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::Shader`] if a shader fails to compose.
    pub fn new(
        context: &RenderContext,
        geometry: &HeroGeometry,
        scene: &SceneOptions,
    ) -> Result<Self, HorizonError> {
        let device = &context.device;
        let layouts = PipelineLayouts::new(device);
        let mut composer = ShaderComposer::new()?;

        let camera_uniform = CameraUniform::new();
        let camera_buffer =
            UniformBuffer::new(device, "Camera Uniform", &camera_uniform);
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &layouts.camera,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.buffer().as_entire_binding(),
                }],
            });

        let sampler = pipeline_helpers::linear_sampler(device, "Hero Sampler");
        let disk_texture = SampledTexture::from_gradient(
            device,
            &context.queue,
            "Disk Texture",
            &geometry.disk_texture,
        );
        let halo_texture = SampledTexture::from_gradient(
            device,
            &context.queue,
            "Halo Texture",
            &geometry.halo_texture,
        );

        let untextured = [&layouts.camera, &layouts.object];
        let textured = [&layouts.camera, &layouts.textured];

        let stars_pipeline = pass::create_pipeline(
            context,
            &mut composer,
            &PipelineDesc {
                shader: &STARS_SHADER,
                vertex_buffers: &[StarInstance::layout()],
                bind_group_layouts: &untextured,
                blending: Blending::Opaque,
            },
        )?;
        let horizon_pipeline = pass::create_pipeline(
            context,
            &mut composer,
            &PipelineDesc {
                shader: &HORIZON_SHADER,
                vertex_buffers: &[Vertex::layout()],
                bind_group_layouts: &untextured,
                blending: Blending::Opaque,
            },
        )?;
        let disk_pipeline = pass::create_pipeline(
            context,
            &mut composer,
            &PipelineDesc {
                shader: &DISK_SHADER,
                vertex_buffers: &[Vertex::layout()],
                bind_group_layouts: &textured,
                blending: Blending::Additive,
            },
        )?;
        let halo_pipeline = pass::create_pipeline(
            context,
            &mut composer,
            &PipelineDesc {
                shader: &BILLBOARD_SHADER,
                vertex_buffers: &[],
                bind_group_layouts: &textured,
                blending: Blending::Additive,
            },
        )?;

        let identity = glam::Mat4::IDENTITY;
        let stars = SpritePass::instanced(
            device,
            "Stars",
            stars_pipeline,
            &geometry.stars,
            ObjectBinding::new(
                device,
                &layouts.object,
                "Stars",
                ObjectUniform::new(identity, WHITE, scene.star_size),
            ),
        );
        let horizon = MeshPass::new(
            device,
            "Horizon",
            horizon_pipeline,
            &geometry.horizon,
            ObjectBinding::new(
                device,
                &layouts.object,
                "Horizon",
                ObjectUniform::new(identity, BLACK, 0.0),
            ),
        );
        let disk = MeshPass::new(
            device,
            "Disk",
            disk_pipeline,
            &geometry.disk,
            ObjectBinding::with_entries(
                device,
                &layouts.textured,
                "Disk",
                ObjectUniform::new(identity, WHITE, 0.0),
                &textured_entries(&disk_texture, &sampler),
            ),
        );
        let halo = SpritePass::single(
            halo_pipeline,
            ObjectBinding::with_entries(
                device,
                &layouts.textured,
                "Halo",
                ObjectUniform::new(identity, WHITE, scene.halo_scale),
                &textured_entries(&halo_texture, &sampler),
            ),
        );

        let (width, height) = context.size();
        let [r, g, b, a] = scene.clear_color;
        log::debug!(
            "hero renderer ready: {} stars, {} horizon indices",
            stars.instance_count(),
            geometry.horizon.index_count()
        );

        Ok(Self {
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            stars,
            horizon,
            disk,
            halo,
            depth: DepthTarget::new(device, width, height),
            clear_color: wgpu::Color { r, g, b, a },
            star_size: scene.star_size,
            halo_scale: scene.halo_scale,
            _disk_texture: disk_texture,
            _halo_texture: halo_texture,
        })
    }

    /// Recreate the depth buffer for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTarget::new(device, width, height);
    }

    /// Draw one frame of `group` as seen by `camera` and present it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped; a
    /// timed-out acquire just skips the frame.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::Surface`] when the surface is out of memory
    /// or otherwise unusable.
    pub fn render(
        &mut self,
        context: &RenderContext,
        group: &HeroGroup,
        camera: &Camera,
    ) -> Result<(), HorizonError> {
        let frame = match context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("surface acquire timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(HorizonError::Surface(e)),
        };

        self.update(&context.queue, camera, context.config.height, group);
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder();
        self.encode(&mut encoder, &view);
        context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Upload this frame's camera and object group.
    fn update(
        &mut self,
        queue: &wgpu::Queue,
        camera: &Camera,
        viewport_height: u32,
        group: &HeroGroup,
    ) {
        self.camera_uniform.update_view_proj(camera, viewport_height);
        self.camera_buffer.write(queue, &self.camera_uniform);

        self.stars.object.update(
            queue,
            ObjectUniform::new(group.stars, WHITE, self.star_size),
        );
        self.horizon
            .object
            .update(queue, ObjectUniform::new(group.group, BLACK, 0.0));
        self.disk
            .object
            .update(queue, ObjectUniform::new(group.disk, WHITE, 0.0));
        self.halo.object.update(
            queue,
            ObjectUniform::new(group.group, WHITE, self.halo_scale),
        );
    }

    /// Record the hero pass into `encoder`, targeting `view`.
    fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        let mut render_pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Hero Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        self.stars.draw(&mut render_pass);
        self.horizon.draw(&mut render_pass);
        self.disk.draw(&mut render_pass);
        self.halo.draw(&mut render_pass);
    }
}
