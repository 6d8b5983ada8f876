//! Turns pointer events into a parallax target and drag deltas.
//!
//! The `InputTracker` owns all transient pointer state: the latest parallax
//! target and whether a drag is in progress. It never touches rotation
//! itself; drag deltas are handed back to the caller, who applies them
//! immediately.

use glam::Vec2;

use super::event::{Bounds, PointerEvent};
use crate::options::MotionOptions;

/// Button-held state plus the last sampled pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    /// Whether a button is held over the container.
    pub active: bool,
    /// Client position of the previous sample while dragging.
    pub last: Vec2,
}

/// Tracks pointer input for the hero scene.
///
/// # Usage
///
/// ```ignore
/// if let Some(delta) = tracker.handle_event(event, bounds) {
///     motion.apply_drag(delta);
/// }
/// // once per frame:
/// motion.step(tracker.target(), tracker.is_dragging());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InputTracker {
    /// Desired group rotation from pointer position: `x` is the rotation
    /// about the X axis (driven by vertical position), `y` the rotation
    /// about the Y axis (driven by horizontal position).
    target: Vec2,
    drag: DragState,
    /// Full angular span of the parallax.
    parallax_span: f32,
}

impl InputTracker {
    /// Create a tracker with a zero target and no drag.
    #[must_use]
    pub fn new(options: &MotionOptions) -> Self {
        Self {
            target: Vec2::ZERO,
            drag: DragState::default(),
            parallax_span: options.parallax_span,
        }
    }

    /// Latest parallax target (radians).
    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Current drag state.
    #[must_use]
    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Adopt new motion options without losing pointer state.
    pub fn set_options(&mut self, options: &MotionOptions) {
        self.parallax_span = options.parallax_span;
    }

    /// Process one pointer event.
    ///
    /// Returns the pixel delta since the previous sample when the event is a
    /// move during an active drag. Only the latest sample matters; nothing
    /// is queued.
    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        bounds: Bounds,
    ) -> Option<Vec2> {
        match event {
            PointerEvent::Move { x, y } => self.handle_move(x, y, bounds),
            PointerEvent::Down { x, y, .. } => {
                self.drag = DragState {
                    active: true,
                    last: Vec2::new(x, y),
                };
                None
            }
            PointerEvent::Up { .. } | PointerEvent::Leave => {
                self.drag.active = false;
                None
            }
        }
    }

    fn handle_move(&mut self, x: f32, y: f32, bounds: Bounds) -> Option<Vec2> {
        if !bounds.is_degenerate() {
            let nx = (x - bounds.left) / bounds.width - 0.5;
            let ny = (y - bounds.top) / bounds.height - 0.5;
            self.target = Vec2::new(ny, nx) * self.parallax_span;
        }

        if !self.drag.active {
            return None;
        }
        let current = Vec2::new(x, y);
        let delta = current - self.drag.last;
        self.drag.last = current;
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn tracker() -> InputTracker {
        InputTracker::new(&MotionOptions::default())
    }

    fn bounds() -> Bounds {
        Bounds::new(100.0, 50.0, 800.0, 600.0)
    }

    #[test]
    fn targets_stay_within_parallax_range() {
        let mut t = tracker();
        let b = bounds();
        let half_span = PI * 0.05 + 1e-6;
        for i in 0..=20 {
            for j in 0..=20 {
                let x = b.left + b.width * i as f32 / 20.0;
                let y = b.top + b.height * j as f32 / 20.0;
                let _ = t.handle_event(PointerEvent::Move { x, y }, b);
                let target = t.target();
                assert!(target.x.abs() <= half_span, "{target:?}");
                assert!(target.y.abs() <= half_span, "{target:?}");
                assert!(target.x.abs() <= PI * 0.1);
                assert!(target.y.abs() <= PI * 0.1);
            }
        }
    }

    #[test]
    fn center_is_zero_and_corner_is_extreme() {
        let mut t = tracker();
        let b = bounds();
        let _ = t.handle_event(PointerEvent::Move { x: 500.0, y: 350.0 }, b);
        assert!(t.target().length() < 1e-6);

        let _ = t.handle_event(PointerEvent::Move { x: 900.0, y: 50.0 }, b);
        // Right edge drives Y rotation, top edge drives X rotation.
        assert!((t.target().y - PI * 0.05).abs() < 1e-6);
        assert!((t.target().x + PI * 0.05).abs() < 1e-6);
    }

    #[test]
    fn hover_produces_no_delta() {
        let mut t = tracker();
        let delta =
            t.handle_event(PointerEvent::Move { x: 10.0, y: 10.0 }, bounds());
        assert!(delta.is_none());
        assert!(!t.is_dragging());
    }

    #[test]
    fn drag_reports_frame_to_frame_deltas() {
        let mut t = tracker();
        let b = bounds();
        let _ = t.handle_event(
            PointerEvent::Down {
                x: 200.0,
                y: 200.0,
                pointer_id: 1,
            },
            b,
        );
        assert!(t.is_dragging());

        let d1 = t.handle_event(PointerEvent::Move { x: 210.0, y: 195.0 }, b);
        assert_eq!(d1, Some(Vec2::new(10.0, -5.0)));
        let d2 = t.handle_event(PointerEvent::Move { x: 213.0, y: 195.0 }, b);
        assert_eq!(d2, Some(Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn drag_still_updates_target() {
        let mut t = tracker();
        let b = bounds();
        let _ = t.handle_event(
            PointerEvent::Down {
                x: 500.0,
                y: 350.0,
                pointer_id: 1,
            },
            b,
        );
        let _ = t.handle_event(PointerEvent::Move { x: 900.0, y: 350.0 }, b);
        assert!((t.target().y - PI * 0.05).abs() < 1e-6);
    }

    #[test]
    fn pointer_up_ends_drag() {
        let mut t = tracker();
        let b = bounds();
        let _ = t.handle_event(
            PointerEvent::Down {
                x: 200.0,
                y: 200.0,
                pointer_id: 7,
            },
            b,
        );
        let _ = t.handle_event(PointerEvent::Up { pointer_id: 7 }, b);
        assert!(!t.is_dragging());

        let delta =
            t.handle_event(PointerEvent::Move { x: 300.0, y: 300.0 }, b);
        assert!(delta.is_none());
        let expected = Vec2::new(
            (250.0 / 600.0 - 0.5) * PI * 0.1,
            (200.0 / 800.0 - 0.5) * PI * 0.1,
        );
        assert!((t.target() - expected).length() < 1e-6);
    }

    #[test]
    fn pointer_leave_ends_drag() {
        let mut t = tracker();
        let b = bounds();
        let _ = t.handle_event(
            PointerEvent::Down {
                x: 200.0,
                y: 200.0,
                pointer_id: 1,
            },
            b,
        );
        let _ = t.handle_event(PointerEvent::Leave, b);
        assert!(!t.is_dragging());
        assert!(t
            .handle_event(PointerEvent::Move { x: 250.0, y: 250.0 }, b)
            .is_none());
    }

    #[test]
    fn degenerate_bounds_keep_previous_target() {
        let mut t = tracker();
        let _ = t.handle_event(PointerEvent::Move { x: 900.0, y: 50.0 }, bounds());
        let before = t.target();
        let _ = t.handle_event(
            PointerEvent::Move { x: 10.0, y: 10.0 },
            Bounds::sized(0.0, 0.0),
        );
        assert_eq!(t.target(), before);
        assert!(t.target().is_finite());
    }
}
