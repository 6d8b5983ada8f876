//! Soft radial gradient textures generated on the CPU.

use crate::options::GradientStops;

/// Square RGBA8 texture with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientTexture {
    /// Edge length in texels.
    pub size: u32,
    /// Row-major RGBA8 texels, `size * size * 4` bytes.
    pub pixels: Vec<u8>,
}

impl GradientTexture {
    /// Texel at `(x, y)`.
    #[must_use]
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.size as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Radial gradient from the texture center (`stops.inner`) to the
/// inscribed circle (`stops.outer`); texels outside the circle take the
/// outer color.
///
/// Interpolation happens in premultiplied space, so fading into a
/// transparent rim does not drag the hue toward the rim's RGB.
#[must_use]
pub fn radial_gradient(size: u32, stops: &GradientStops) -> GradientTexture {
    let size = size.max(1);
    let half = size as f32 / 2.0;
    let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let t = ((dx * dx + dy * dy).sqrt() / half).clamp(0.0, 1.0);
            pixels.extend_from_slice(&sample(stops, t));
        }
    }

    GradientTexture { size, pixels }
}

fn sample(stops: &GradientStops, t: f32) -> [u8; 4] {
    let [r0, g0, b0, a0] = stops.inner;
    let [r1, g1, b1, a1] = stops.outer;
    let lerp = |a: f32, b: f32| a + (b - a) * t;

    let alpha = lerp(a0, a1);
    let unpremultiply = |c0: f32, c1: f32| {
        if alpha > 0.0 {
            lerp(c0 * a0, c1 * a1) / alpha
        } else {
            0.0
        }
    };
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;

    [
        to_u8(unpremultiply(r0, r1)),
        to_u8(unpremultiply(g0, g1)),
        to_u8(unpremultiply(b0, b1)),
        to_u8(alpha),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk_stops() -> GradientStops {
        GradientStops::from_rgba8([255, 180, 80], 0.9, [255, 120, 40], 0.0)
    }

    #[test]
    fn size_and_layout() {
        let tex = radial_gradient(16, &disk_stops());
        assert_eq!(tex.size, 16);
        assert_eq!(tex.pixels.len(), 16 * 16 * 4);
    }

    #[test]
    fn center_takes_inner_color() {
        let tex = radial_gradient(256, &disk_stops());
        let [r, g, b, a] = tex.texel(128, 128);
        assert_eq!(r, 255);
        assert!((i32::from(g) - 180).abs() <= 1);
        assert!((i32::from(b) - 80).abs() <= 1);
        assert!((i32::from(a) - 229).abs() <= 2);
    }

    #[test]
    fn corners_are_transparent() {
        let tex = radial_gradient(256, &disk_stops());
        assert_eq!(tex.texel(0, 0)[3], 0);
        assert_eq!(tex.texel(255, 255)[3], 0);
    }

    #[test]
    fn alpha_falls_off_with_radius() {
        let tex = radial_gradient(64, &disk_stops());
        let mut prev = u8::MAX;
        for x in 32..64 {
            let a = tex.texel(x, 32)[3];
            assert!(a <= prev);
            prev = a;
        }
    }

    #[test]
    fn transparent_rim_keeps_inner_hue() {
        let tex = radial_gradient(64, &disk_stops());
        // Near the rim the green channel should still be close to the
        // inner 180, not the outer 120.
        let [_, g, _, a] = tex.texel(61, 32);
        assert!(a > 0);
        assert!(g > 170, "g = {g}");
    }
}
