//! Per-frame motion of the hero objects.
//!
//! [`HeroMotion`] is the only owner of rotation state. Pointer input reaches
//! it either as a target (read once per frame) or as a drag delta applied on
//! the spot; nothing else mutates the angles.

mod motion;

pub use motion::HeroMotion;
