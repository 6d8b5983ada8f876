//! Blend and depth presets shared by the hero pipelines.

use crate::gpu::texture::DepthTarget;

/// How a pass composites over what is already in the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Blending {
    /// Replace the destination.
    Opaque,
    /// `src * src_alpha + dst` on color, `src + dst` on alpha, so the
    /// premultiplied surface stays consistent.
    Additive,
}

impl Blending {
    pub(crate) fn state(self) -> Option<wgpu::BlendState> {
        match self {
            Self::Opaque => None,
            Self::Additive => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
        }
    }

    /// Additive passes test against depth but never write it.
    pub(crate) fn writes_depth(self) -> bool {
        matches!(self, Self::Opaque)
    }
}

/// Single color target in the surface format.
pub(crate) fn color_target(
    format: wgpu::TextureFormat,
    blending: Blending,
) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: blending.state(),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

/// Depth-stencil state for a pass with the given blending.
pub(crate) fn depth_stencil_state(blending: Blending) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DepthTarget::FORMAT,
        depth_write_enabled: blending.writes_depth(),
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_adds_onto_destination() {
        let blend = Blending::Additive.state().unwrap();
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::One);
        assert!(!depth_stencil_state(Blending::Additive).depth_write_enabled);
    }

    #[test]
    fn opaque_replaces_and_writes_depth() {
        assert!(Blending::Opaque.state().is_none());
        assert!(depth_stencil_state(Blending::Opaque).depth_write_enabled);
    }
}
