//! Perspective camera and render-surface sizing.
//!
//! The hero camera never moves: it sits on +Z looking at the origin. Only
//! its aspect ratio changes, driven by [`viewport::Viewport`] on resize.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Container-size to backing-store and aspect mapping.
pub mod viewport;

pub use self::core::{Camera, CameraUniform};
pub use viewport::Viewport;
