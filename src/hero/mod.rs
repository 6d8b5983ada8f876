//! The hero scene: camera, pointer tracking, motion and (optionally) the
//! GPU renderer, owned together as one instance.
//!
//! [`HeroScene`] runs headless when built with [`HeroScene::new`], which is
//! how its behavior is tested; [`HeroScene::with_surface`] attaches a
//! renderer to a canvas or window.

pub mod bootstrap;
pub mod frame_loop;

use crate::animation::HeroMotion;
use crate::camera::{Camera, Viewport};
use crate::error::HorizonError;
use crate::gpu::render_context::RenderContext;
use crate::input::{Bounds, InputTracker, PointerEvent};
use crate::options::{MotionOptions, Options};
use crate::renderer::HeroRenderer;
use crate::scene::{HeroGeometry, HeroGroup};

/// Device resources for a scene that draws.
struct HeroGpu {
    context: RenderContext,
    renderer: HeroRenderer,
}

/// One independent hero instance.
///
/// # Frame lifecycle
///
/// 1. Pointer events arrive through [`handle_pointer`](Self::handle_pointer);
///    drag deltas are applied to the rotation immediately.
/// 2. Once per display refresh, [`frame`](Self::frame) advances the motion
///    by one step and draws.
/// 3. [`resize`](Self::resize) applies a new container size to the camera
///    and the surface.
pub struct HeroScene {
    options: Options,
    camera: Camera,
    viewport: Viewport,
    tracker: InputTracker,
    motion: HeroMotion,
    group: HeroGroup,
    gpu: Option<HeroGpu>,
}

impl HeroScene {
    /// A scene with no renderer attached.
    #[must_use]
    pub fn new(options: Options, viewport: Viewport) -> Self {
        let camera = Camera::new(&options.camera, viewport.aspect());
        let tracker = InputTracker::new(&options.motion);
        let motion = HeroMotion::new(options.motion.clone());
        let group = HeroGroup::new(&motion, &options.scene);
        Self {
            options,
            camera,
            viewport,
            tracker,
            motion,
            group,
            gpu: None,
        }
    }

    /// A scene rendering into `target`, sized to `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::Unavailable`] when no usable GPU exists for
    /// the target, or [`HorizonError::Shader`] if a pipeline fails to build.
    pub async fn with_surface(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        options: Options,
        viewport: Viewport,
    ) -> Result<Self, HorizonError> {
        let context = RenderContext::new(target, &viewport).await?;
        let geometry = HeroGeometry::build(&options.scene);
        let renderer = HeroRenderer::new(&context, &geometry, &options.scene)?;
        let mut scene = Self::new(options, viewport);
        scene.gpu = Some(HeroGpu { context, renderer });
        Ok(scene)
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current surface size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pointer state.
    #[must_use]
    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    /// Rotation state.
    #[must_use]
    pub fn motion(&self) -> &HeroMotion {
        &self.motion
    }

    /// Model matrices for the current frame.
    #[must_use]
    pub fn group(&self) -> &HeroGroup {
        &self.group
    }

    /// Whether a renderer is attached.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.gpu.is_some()
    }

    /// Feed one pointer event. Drag deltas rotate the group right away; the
    /// parallax target is picked up by the next [`step`](Self::step).
    pub fn handle_pointer(&mut self, event: PointerEvent, bounds: Bounds) {
        if let Some(delta) = self.tracker.handle_event(event, bounds) {
            self.motion.apply_drag(delta);
            self.group = HeroGroup::new(&self.motion, &self.options.scene);
        }
    }

    /// Advance the motion by one display frame without drawing.
    pub fn step(&mut self) {
        self.motion
            .step(self.tracker.target(), self.tracker.is_dragging());
        self.group = HeroGroup::new(&self.motion, &self.options.scene);
    }

    /// Advance one frame and draw it (when a renderer is attached).
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::Surface`] if the surface is unusable.
    pub fn frame(&mut self) -> Result<(), HorizonError> {
        self.step();
        match &mut self.gpu {
            Some(gpu) => {
                gpu.renderer.render(&gpu.context, &self.group, &self.camera)
            }
            None => Ok(()),
        }
    }

    /// Apply a new container size. Calling it again with the same viewport
    /// leaves the scene unchanged.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        if let Some(gpu) = &mut self.gpu {
            gpu.context.resize(viewport.width, viewport.height);
            gpu.renderer.resize(
                &gpu.context.device,
                viewport.width,
                viewport.height,
            );
        }
        log::debug!(
            "hero resized to {}x{} (ratio {})",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
    }

    /// Replace motion options; rotation and pointer state carry over.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::InvalidOption`] and keeps the current
    /// options when `motion` is out of range.
    pub fn set_motion_options(
        &mut self,
        motion: MotionOptions,
    ) -> Result<(), HorizonError> {
        motion.validate()?;
        self.tracker.set_options(&motion);
        self.motion.set_options(motion.clone());
        self.options.motion = motion;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn scene() -> HeroScene {
        let options = Options::default();
        let viewport = Viewport::from_css(800.0, 600.0, 1.0, 2.0);
        HeroScene::new(options, viewport)
    }

    fn bounds() -> Bounds {
        Bounds::sized(800.0, 600.0)
    }

    #[test]
    fn headless_scene_starts_at_rest() {
        let s = scene();
        assert!(!s.is_rendering());
        assert_eq!(s.motion().rotation(), Vec2::ZERO);
        assert!((s.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut s = scene();
        let viewport = Viewport::from_css(800.0, 600.0, 1.0, 2.0);
        s.resize(viewport);
        let first = s.camera().clone();
        s.resize(viewport);
        assert_eq!(s.camera(), &first);
        assert!((s.camera().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(s.viewport(), viewport);
    }

    #[test]
    fn resize_tracks_new_aspect() {
        let mut s = scene();
        s.resize(Viewport::from_css(1200.0, 400.0, 2.0, 2.0));
        assert!((s.camera().aspect - 3.0).abs() < 1e-6);
        assert_eq!(s.viewport().width, 2400);
    }

    #[test]
    fn frame_without_renderer_steps_motion() {
        let mut s = scene();
        s.frame().unwrap();
        let expected = Vec2::new(0.0015, 0.0025);
        assert!((s.motion().rotation() - expected).length() < 1e-7);
    }

    #[test]
    fn drag_rotates_immediately() {
        let mut s = scene();
        s.handle_pointer(
            PointerEvent::Down {
                x: 400.0,
                y: 300.0,
                pointer_id: 1,
            },
            bounds(),
        );
        s.handle_pointer(PointerEvent::Move { x: 420.0, y: 290.0 }, bounds());
        let rotation = s.motion().rotation();
        assert!((rotation.y - 20.0 * 0.005).abs() < 1e-6);
        assert!((rotation.x + 10.0 * 0.005).abs() < 1e-6);

        // While dragging, a frame does not add idle spin or spring.
        s.step();
        assert_eq!(s.motion().rotation(), rotation);
    }

    #[test]
    fn release_returns_to_spring() {
        let mut s = scene();
        let b = bounds();
        s.handle_pointer(
            PointerEvent::Down {
                x: 400.0,
                y: 300.0,
                pointer_id: 1,
            },
            b,
        );
        s.handle_pointer(PointerEvent::Up { pointer_id: 1 }, b);
        s.handle_pointer(PointerEvent::Move { x: 500.0, y: 300.0 }, b);
        assert_eq!(s.motion().rotation(), Vec2::ZERO);
        assert!(s.tracker().target().y > 0.0);
    }

    #[test]
    fn hover_converges_toward_target() {
        let mut s = scene();
        let mut motion = MotionOptions::default();
        motion.idle_spin_x = 0.0;
        motion.idle_spin_y = 0.0;
        s.set_motion_options(motion).unwrap();
        s.handle_pointer(PointerEvent::Move { x: 800.0, y: 0.0 }, bounds());
        let target = s.tracker().target();

        let mut gap = (target - s.motion().rotation()).length();
        for _ in 0..200 {
            s.step();
            let next = (target - s.motion().rotation()).length();
            assert!(next < gap);
            gap = next;
        }
    }

    #[test]
    fn group_follows_motion() {
        let mut s = scene();
        let before = *s.group();
        s.step();
        assert_ne!(*s.group(), before);
        assert_eq!(*s.group(), HeroGroup::new(s.motion(), &s.options().scene));
    }

    #[test]
    fn rejected_motion_options_leave_scene_unchanged() {
        let mut s = scene();
        let mut motion = MotionOptions::default();
        motion.damping = 0.0;
        let err = s.set_motion_options(motion).unwrap_err();
        assert!(matches!(
            err,
            HorizonError::InvalidOption { ref field, .. }
                if field == "motion.damping"
        ));
        assert_eq!(s.options().motion, MotionOptions::default());
        assert_eq!(s.motion().options(), &MotionOptions::default());
        let eq = s.motion().equilibrium(Vec2::ZERO);
        assert!(eq.is_finite());
    }
}
