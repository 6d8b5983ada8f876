/// Platform-agnostic pointer events delivered to the hero container.
///
/// These are fed into an [`InputTracker`](super::InputTracker), which
/// updates the parallax target and reports drag deltas.
///
/// # Example
///
/// ```ignore
/// let bounds = Bounds::new(rect.left(), rect.top(), rect.width(), rect.height());
/// if let Some(delta) = tracker.handle_event(
///     PointerEvent::Move { x: 100.0, y: 200.0 },
///     bounds,
/// ) {
///     motion.apply_drag(delta);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to a client-space position.
    Move {
        /// Horizontal client coordinate in CSS pixels.
        x: f32,
        /// Vertical client coordinate in CSS pixels.
        y: f32,
    },
    /// A button went down over the container.
    Down {
        /// Horizontal client coordinate in CSS pixels.
        x: f32,
        /// Vertical client coordinate in CSS pixels.
        y: f32,
        /// Host pointer id, used for pointer capture.
        pointer_id: i32,
    },
    /// The button was released.
    Up {
        /// Host pointer id, used to release pointer capture.
        pointer_id: i32,
    },
    /// The pointer left the container.
    Leave,
}

/// Client-space rectangle of the hero container, as returned by
/// `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge in client pixels.
    pub left: f32,
    /// Top edge in client pixels.
    pub top: f32,
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
}

impl Bounds {
    /// Rectangle from its top-left corner and size.
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin (native windows).
    #[must_use]
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Whether the rectangle has a usable area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
