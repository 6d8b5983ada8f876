//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, typed buffers, textures and
//! shader composition.

/// Typed static and uniform buffers.
pub mod buffer;
/// Shared bind group layout entry helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth target and sampled gradient textures.
pub mod texture;
