//! Pointer input: event types and the tracker that turns them into a
//! parallax target and drag deltas.

/// Platform-agnostic pointer events.
pub mod event;
/// Parallax target and drag state.
pub mod tracker;

pub use event::{Bounds, PointerEvent};
pub use tracker::{DragState, InputTracker};
