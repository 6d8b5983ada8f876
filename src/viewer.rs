//! Standalone preview window backed by winit.
//!
//! Runs the same [`HeroScene`] the browser mounts, with the window standing
//! in for the container element.
//!
//! ```no_run
//! # use horizon::Viewer;
//! Viewer::builder()
//!     .with_title("Horizon")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    camera::Viewport,
    error::HorizonError,
    hero::HeroScene,
    input::{Bounds, PointerEvent},
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with title "Horizon" and default options.
    fn new() -> Self {
        Self {
            options: None,
            title: "Horizon".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the hero scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`HorizonError::Viewer`] if the event loop cannot be created
    /// or fails, and the scene's error if the GPU cannot be initialized.
    pub fn run(self) -> Result<(), HorizonError> {
        let event_loop = EventLoop::new()
            .map_err(|e| HorizonError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            scene: None,
            cursor: (0.0, 0.0),
            options: Some(self.options),
            title: self.title,
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| HorizonError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    scene: Option<HeroScene>,
    /// Last cursor position in physical pixels.
    cursor: (f32, f32),
    options: Option<Options>,
    title: String,
    /// First fatal error, reported once the loop exits.
    error: Option<HorizonError>,
}

impl ViewerApp {
    fn viewport(window: &Window, size: PhysicalSize<u32>) -> Viewport {
        Viewport::from_physical(size.width, size.height, window.scale_factor())
    }

    fn bounds(&self) -> Bounds {
        self.window.as_ref().map_or(Bounds::sized(0.0, 0.0), |w| {
            let inner = w.inner_size();
            Bounds::sized(inner.width as f32, inner.height as f32)
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: HorizonError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn pointer(&mut self, event: PointerEvent) {
        let bounds = self.bounds();
        if let Some(scene) = &mut self.scene {
            scene.handle_pointer(event, bounds);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.5) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, HorizonError::Viewer(e.to_string()));
                return;
            }
        };

        let viewport = Self::viewport(&window, window.inner_size());
        let scene = match pollster::block_on(HeroScene::with_surface(
            window.clone(),
            options,
            viewport,
        )) {
            Ok(scene) => scene,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.scene = Some(scene);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                if let Some(scene) = &mut self.scene {
                    scene.resize(Self::viewport(&window, size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(scene) = &mut self.scene {
                    scene.resize(Self::viewport(&window, window.inner_size()));
                }
            }

            WindowEvent::RedrawRequested => {
                let result = self.scene.as_mut().map(HeroScene::frame);
                if let Some(Err(e)) = result {
                    self.fail(event_loop, e);
                    return;
                }
                window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.cursor;
                self.pointer(PointerEvent::Move { x, y });
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let (x, y) = self.cursor;
                let event = if state == ElementState::Pressed {
                    PointerEvent::Down {
                        x,
                        y,
                        pointer_id: 0,
                    }
                } else {
                    PointerEvent::Up { pointer_id: 0 }
                };
                self.pointer(event);
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer(PointerEvent::Leave);
            }

            _ => (),
        }
    }
}
