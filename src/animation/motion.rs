use std::f32::consts::TAU;

use glam::Vec2;

use crate::options::MotionOptions;

/// Rotation state of the hero group and its decorative parts.
///
/// Each frame, while no drag is active, every group axis advances by its
/// idle spin plus `damping` times the gap to the pointer target. That is an
/// exponential approach toward `target + idle / damping`; the idle spin
/// keeps the hero turning even when the pointer is still.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroMotion {
    /// Group Euler angles: `x` about the X axis, `y` about the Y axis.
    rotation: Vec2,
    /// Accretion disk spin about its own normal.
    disk_angle: f32,
    /// Starfield rotation about the world Y axis.
    star_angle: f32,
    options: MotionOptions,
}

impl HeroMotion {
    /// Motion at rest, with all angles zero.
    #[must_use]
    pub fn new(options: MotionOptions) -> Self {
        Self {
            rotation: Vec2::ZERO,
            disk_angle: 0.0,
            star_angle: 0.0,
            options,
        }
    }

    /// Group rotation (radians).
    #[must_use]
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// Disk spin angle (radians, in `[0, 2π)`).
    #[must_use]
    pub fn disk_angle(&self) -> f32 {
        self.disk_angle
    }

    /// Starfield drift angle (radians, in `[0, 2π)`).
    #[must_use]
    pub fn star_angle(&self) -> f32 {
        self.star_angle
    }

    /// Active motion options.
    #[must_use]
    pub fn options(&self) -> &MotionOptions {
        &self.options
    }

    /// Swap motion options; angles are kept.
    pub fn set_options(&mut self, options: MotionOptions) {
        self.options = options;
    }

    /// Advance one display frame toward `target`.
    ///
    /// While `dragging`, the group's idle spin and spring are suspended so
    /// the only group motion is what [`apply_drag`](Self::apply_drag) adds.
    /// The disk and starfield keep spinning either way.
    pub fn step(&mut self, target: Vec2, dragging: bool) {
        if !dragging {
            let gap = target - self.rotation;
            self.rotation += self.idle() + gap * self.options.damping;
        }
        // Wrapped so f32 precision does not degrade over long sessions.
        self.disk_angle =
            (self.disk_angle + self.options.disk_spin).rem_euclid(TAU);
        self.star_angle =
            (self.star_angle + self.options.star_drift).rem_euclid(TAU);
    }

    /// Rotate directly by a pointer delta in pixels.
    ///
    /// Horizontal movement turns the group about Y, vertical about X.
    pub fn apply_drag(&mut self, delta: Vec2) {
        let s = self.options.drag_sensitivity;
        self.rotation.y += delta.x * s;
        self.rotation.x += delta.y * s;
    }

    /// Angles the group settles at for a fixed `target` when not dragging.
    #[must_use]
    pub fn equilibrium(&self, target: Vec2) -> Vec2 {
        target + self.idle() / self.options.damping
    }

    fn idle(&self) -> Vec2 {
        Vec2::new(self.options.idle_spin_x, self.options.idle_spin_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still() -> MotionOptions {
        MotionOptions {
            idle_spin_x: 0.0,
            idle_spin_y: 0.0,
            ..MotionOptions::default()
        }
    }

    #[test]
    fn gap_to_target_shrinks_every_frame_without_idle_spin() {
        let mut motion = HeroMotion::new(still());
        let target = Vec2::new(0.12, -0.15);
        let mut gap = (target - motion.rotation()).abs();
        for _ in 0..500 {
            motion.step(target, false);
            let next = (target - motion.rotation()).abs();
            assert!(next.x < gap.x && next.y < gap.y);
            gap = next;
        }
        // Exponential decay: never exact, never overshooting.
        assert!(gap.x > 0.0 && gap.y > 0.0);
        assert!(motion.rotation().x < target.x);
        assert!(motion.rotation().y > target.y);
    }

    #[test]
    fn idle_spin_settles_at_equilibrium() {
        let mut motion = HeroMotion::new(MotionOptions::default());
        let target = Vec2::new(0.05, -0.05);
        let eq = motion.equilibrium(target);
        let mut gap = (eq - motion.rotation()).length();
        for _ in 0..300 {
            motion.step(target, false);
            let next = (eq - motion.rotation()).length();
            assert!(next < gap);
            gap = next;
        }
        assert!(gap < 0.01);
    }

    #[test]
    fn single_frame_matches_formula() {
        let mut motion = HeroMotion::new(MotionOptions::default());
        motion.step(Vec2::new(0.1, 0.2), false);
        let r = motion.rotation();
        assert!((r.x - (0.0015 + 0.1 * 0.02)).abs() < 1e-7);
        assert!((r.y - (0.0025 + 0.2 * 0.02)).abs() < 1e-7);
    }

    #[test]
    fn drag_change_is_delta_times_sensitivity() {
        let mut motion = HeroMotion::new(MotionOptions::default());
        motion.step(Vec2::new(0.1, 0.1), false);
        let before = motion.rotation();

        motion.apply_drag(Vec2::new(12.0, -4.0));
        motion.step(Vec2::new(0.1, 0.1), true);

        let change = motion.rotation() - before;
        assert!((change.y - 12.0 * 0.005).abs() < 1e-7);
        assert!((change.x + 4.0 * 0.005).abs() < 1e-7);
    }

    #[test]
    fn dragging_frame_without_delta_holds_group() {
        let mut motion = HeroMotion::new(MotionOptions::default());
        motion.step(Vec2::ZERO, true);
        assert_eq!(motion.rotation(), Vec2::ZERO);
    }

    #[test]
    fn decorations_spin_regardless_of_drag() {
        let mut motion = HeroMotion::new(MotionOptions::default());
        motion.step(Vec2::ZERO, false);
        motion.step(Vec2::ZERO, true);
        assert!((motion.disk_angle() - 0.008).abs() < 1e-7);
        assert!((motion.star_angle() - 0.001).abs() < 1e-7);
    }

    #[test]
    fn decoration_angles_wrap_without_losing_steps() {
        let mut motion = HeroMotion::new(MotionOptions::default());
        // An unwrapped f32 star angle passes 8192 after ~16.4M frames,
        // where a 0.0005 step no longer rounds to 0.0005.
        for _ in 0..17_000_000_u32 {
            motion.step(Vec2::ZERO, true);
        }
        assert!((0.0..=TAU).contains(&motion.star_angle()));
        assert!((0.0..=TAU).contains(&motion.disk_angle()));

        let before = motion.star_angle();
        motion.step(Vec2::ZERO, true);
        let advanced = (motion.star_angle() - before).rem_euclid(TAU);
        assert!((advanced - 0.0005).abs() < 1e-5, "advanced = {advanced}");
    }
}
