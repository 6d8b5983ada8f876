//! Maps a container's CSS size to the render surface.

/// Render-surface dimensions derived from a container's CSS size.
///
/// The backing store is the CSS size scaled by the device pixel ratio,
/// capped so high-density screens do not pay for more than
/// `max_pixel_ratio` pixels per CSS pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Container width in CSS pixels.
    pub css_width: f32,
    /// Container height in CSS pixels.
    pub css_height: f32,
    /// Effective pixel ratio after capping.
    pub pixel_ratio: f64,
    /// Backing-store width in physical pixels (at least 1).
    pub width: u32,
    /// Backing-store height in physical pixels (at least 1).
    pub height: u32,
}

impl Viewport {
    /// Size the surface for a container of `css_width` × `css_height`.
    #[must_use]
    pub fn from_css(
        css_width: f32,
        css_height: f32,
        device_pixel_ratio: f64,
        max_pixel_ratio: f64,
    ) -> Self {
        let pixel_ratio = if device_pixel_ratio.is_finite()
            && device_pixel_ratio > 0.0
        {
            device_pixel_ratio.min(max_pixel_ratio)
        } else {
            1.0
        };
        let scale = |css: f32| -> u32 {
            let px = (f64::from(css.max(0.0)) * pixel_ratio).round();
            (px as u32).max(1)
        };
        Self {
            css_width,
            css_height,
            pixel_ratio,
            width: scale(css_width),
            height: scale(css_height),
        }
    }

    /// Size the surface from physical pixels directly (native windows
    /// already report physical sizes).
    #[must_use]
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            css_width: (f64::from(width) / scale) as f32,
            css_height: (f64::from(height) / scale) as f32,
            pixel_ratio: scale,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Width over height of the container.
    ///
    /// Uses the CSS size when it is non-degenerate so the projection
    /// matches the layout box exactly, falling back to the backing store.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.css_width > 0.0 && self.css_height > 0.0 {
            self.css_width / self.css_height
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_twice_gives_same_aspect() {
        let first = Viewport::from_css(800.0, 600.0, 1.0, 2.0);
        let second = Viewport::from_css(800.0, 600.0, 1.0, 2.0);
        assert_eq!(first.aspect(), 800.0 / 600.0);
        assert_eq!(second.aspect(), 800.0 / 600.0);
        assert_eq!(first, second);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let vp = Viewport::from_css(400.0, 300.0, 3.0, 2.0);
        assert_eq!(vp.pixel_ratio, 2.0);
        assert_eq!((vp.width, vp.height), (800, 600));

        let low = Viewport::from_css(400.0, 300.0, 1.5, 2.0);
        assert_eq!((low.width, low.height), (600, 450));
    }

    #[test]
    fn degenerate_container_keeps_one_pixel() {
        let vp = Viewport::from_css(0.0, 0.0, 2.0, 2.0);
        assert_eq!((vp.width, vp.height), (1, 1));
        assert!(vp.aspect().is_finite());
    }

    #[test]
    fn bogus_pixel_ratio_falls_back_to_one() {
        let vp = Viewport::from_css(100.0, 50.0, f64::NAN, 2.0);
        assert_eq!(vp.pixel_ratio, 1.0);
        assert_eq!((vp.width, vp.height), (100, 50));
    }

    #[test]
    fn physical_sizes_pass_through() {
        let vp = Viewport::from_physical(1600, 1200, 2.0);
        assert_eq!((vp.width, vp.height), (1600, 1200));
        assert_eq!(vp.css_width, 800.0);
        assert_eq!(vp.aspect(), 1600.0 / 1200.0);
    }
}
