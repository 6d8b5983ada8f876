//! Mounting a hero into a host page.
//!
//! Bootstrapping is split at the only asynchronous step, GPU device
//! creation. [`prepare`] does the synchronous lookups (container, size,
//! renderer probe) and [`start`] creates the device, then attaches the
//! canvas. The canvas is attached only once a device exists, so a page
//! without a usable GPU is never modified.
//!
//! The [`Host`] trait is the seam between this logic and the DOM.

use crate::camera::Viewport;
use crate::error::{HorizonError, Unavailable};
use crate::hero::HeroScene;
use crate::options::Options;

/// Container id used when the caller does not name one.
pub const DEFAULT_CONTAINER_ID: &str = "hero-canvas";

/// The page environment a hero is mounted into.
pub trait Host {
    /// Handle to the container element.
    type Container;
    /// Handle to a drawable surface (a canvas element) not yet in the page.
    type Canvas;

    /// Look up the container by id.
    fn find_container(&self, id: &str) -> Option<Self::Container>;

    /// Container size in CSS pixels.
    fn container_size(&self, container: &Self::Container) -> (f32, f32);

    /// Physical pixels per CSS pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// Create a detached canvas sized to `viewport`, or `None` when no
    /// rendering backend is available.
    fn create_canvas(&self, viewport: &Viewport) -> Option<Self::Canvas>;

    /// The wgpu target for `canvas`.
    fn surface_target(
        &self,
        canvas: &Self::Canvas,
    ) -> wgpu::SurfaceTarget<'static>;

    /// Insert `canvas` into `container`.
    fn attach(&self, container: &Self::Container, canvas: &Self::Canvas);
}

/// Result of trying to start a hero: either it is running, or the
/// environment lacks something and nothing was changed.
#[derive(Debug)]
pub enum InitOutcome<T> {
    /// The hero is set up.
    Mounted(T),
    /// The hero cannot run here; the page was left untouched.
    Skipped(Unavailable),
}

impl<T> InitOutcome<T> {
    /// Whether the hero is set up.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        matches!(self, Self::Mounted(_))
    }

    /// The mounted value, if any.
    #[must_use]
    pub fn mounted(self) -> Option<T> {
        match self {
            Self::Mounted(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }

    /// `Mounted` with `value` when present, otherwise skipped for `reason`.
    #[must_use]
    pub fn require(value: Option<T>, reason: Unavailable) -> Self {
        value.map_or_else(|| Self::skip(reason), Self::Mounted)
    }

    fn skip(reason: Unavailable) -> Self {
        log::debug!("hero not mounted: {reason}");
        Self::Skipped(reason)
    }
}

/// Everything found synchronously, ready for device creation.
pub struct Prepared<H: Host> {
    /// The container the canvas will join.
    pub container: H::Container,
    /// The detached canvas.
    pub canvas: H::Canvas,
    /// Surface size for the container.
    pub viewport: Viewport,
    /// Options the scene will run with.
    pub options: Options,
}

/// A running hero and the page objects it lives in.
pub struct Mounted<H: Host> {
    /// The container the canvas was attached to.
    pub container: H::Container,
    /// The attached canvas.
    pub canvas: H::Canvas,
    /// The scene drawing into the canvas.
    pub scene: HeroScene,
}

/// Find the container, size the surface and probe for a renderer.
///
/// Never touches the page.
#[must_use]
pub fn prepare<H: Host>(
    host: &H,
    container_id: &str,
    options: Options,
) -> InitOutcome<Prepared<H>> {
    let Some(container) = host.find_container(container_id) else {
        return InitOutcome::skip(Unavailable::Container(
            container_id.to_owned(),
        ));
    };
    let (width, height) = host.container_size(&container);
    let viewport = Viewport::from_css(
        width,
        height,
        host.device_pixel_ratio(),
        options.camera.max_pixel_ratio,
    );
    let Some(canvas) = host.create_canvas(&viewport) else {
        return InitOutcome::skip(Unavailable::Renderer);
    };
    InitOutcome::Mounted(Prepared {
        container,
        canvas,
        viewport,
        options,
    })
}

/// Create the GPU scene for `prepared` and, on success, attach its canvas.
///
/// # Errors
///
/// Environment problems become [`InitOutcome::Skipped`]; only genuine
/// defects (a shader that fails to compose) are returned as errors.
pub async fn start<H: Host>(
    host: &H,
    prepared: Prepared<H>,
) -> Result<InitOutcome<Mounted<H>>, HorizonError> {
    let Prepared {
        container,
        canvas,
        viewport,
        options,
    } = prepared;
    let target = host.surface_target(&canvas);
    let scene = match HeroScene::with_surface(target, options, viewport).await
    {
        Ok(scene) => scene,
        Err(HorizonError::Unavailable(reason)) => {
            return Ok(InitOutcome::skip(reason));
        }
        Err(e) => return Err(e),
    };
    host.attach(&container, &canvas);
    log::info!(
        "hero mounted at {}x{} physical pixels",
        viewport.width,
        viewport.height
    );
    Ok(InitOutcome::Mounted(Mounted {
        container,
        canvas,
        scene,
    }))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// In-memory page: a set of container ids with sizes.
    struct FakeHost {
        containers: Vec<(&'static str, (f32, f32))>,
        dpr: f64,
        renderer: bool,
        canvases: RefCell<Vec<Viewport>>,
        attached: Cell<usize>,
    }

    impl FakeHost {
        fn with_container(id: &'static str) -> Self {
            Self {
                containers: vec![(id, (800.0, 600.0))],
                dpr: 3.0,
                renderer: true,
                canvases: RefCell::new(Vec::new()),
                attached: Cell::new(0),
            }
        }
    }

    impl Host for FakeHost {
        type Container = &'static str;
        type Canvas = Viewport;

        fn find_container(&self, id: &str) -> Option<Self::Container> {
            self.containers
                .iter()
                .find(|(name, _)| *name == id)
                .map(|(name, _)| *name)
        }

        fn container_size(&self, container: &Self::Container) -> (f32, f32) {
            self.containers
                .iter()
                .find(|(name, _)| name == container)
                .map_or((0.0, 0.0), |(_, size)| *size)
        }

        fn device_pixel_ratio(&self) -> f64 {
            self.dpr
        }

        fn create_canvas(&self, viewport: &Viewport) -> Option<Self::Canvas> {
            self.canvases.borrow_mut().push(*viewport);
            self.renderer.then_some(*viewport)
        }

        fn surface_target(
            &self,
            _canvas: &Self::Canvas,
        ) -> wgpu::SurfaceTarget<'static> {
            unreachable!("no GPU in unit tests")
        }

        fn attach(&self, _container: &Self::Container, _canvas: &Self::Canvas) {
            self.attached.set(self.attached.get() + 1);
        }
    }

    #[test]
    fn missing_container_is_a_quiet_no_op() {
        let host = FakeHost::with_container("elsewhere");
        let outcome = prepare(&host, DEFAULT_CONTAINER_ID, Options::default());
        assert!(matches!(
            outcome,
            InitOutcome::Skipped(Unavailable::Container(ref id)) if id == "hero-canvas"
        ));
        assert!(host.canvases.borrow().is_empty());
        assert_eq!(host.attached.get(), 0);
    }

    #[test]
    fn missing_renderer_is_a_quiet_no_op() {
        let mut host = FakeHost::with_container(DEFAULT_CONTAINER_ID);
        host.renderer = false;
        let outcome = prepare(&host, DEFAULT_CONTAINER_ID, Options::default());
        assert!(matches!(
            outcome,
            InitOutcome::Skipped(Unavailable::Renderer)
        ));
        assert_eq!(host.attached.get(), 0);
    }

    #[test]
    fn prepare_sizes_surface_with_capped_ratio() {
        let host = FakeHost::with_container(DEFAULT_CONTAINER_ID);
        let prepared = prepare(&host, DEFAULT_CONTAINER_ID, Options::default())
            .mounted()
            .unwrap();
        assert_eq!(prepared.container, DEFAULT_CONTAINER_ID);
        assert_eq!(prepared.viewport.width, 1600);
        assert_eq!(prepared.viewport.height, 1200);
        assert_eq!(prepared.viewport.pixel_ratio, 2.0);
        // Preparing never touches the page.
        assert_eq!(host.attached.get(), 0);
    }

    #[test]
    fn missing_window_is_a_quiet_no_op() {
        let outcome: InitOutcome<FakeHost> =
            InitOutcome::require(None, Unavailable::NoWindow);
        assert!(matches!(
            outcome,
            InitOutcome::Skipped(Unavailable::NoWindow)
        ));

        let host = FakeHost::with_container(DEFAULT_CONTAINER_ID);
        let found = InitOutcome::require(Some(host), Unavailable::NoWindow);
        assert!(found.is_mounted());
    }

    #[test]
    fn outcome_accessors() {
        let mounted: InitOutcome<u8> = InitOutcome::Mounted(3);
        assert!(mounted.is_mounted());
        assert_eq!(mounted.mounted(), Some(3));
        let skipped: InitOutcome<u8> =
            InitOutcome::Skipped(Unavailable::NoWindow);
        assert!(!skipped.is_mounted());
        assert_eq!(skipped.mounted(), None);
    }
}
