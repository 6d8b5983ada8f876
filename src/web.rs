//! Browser entry points.
//!
//! ```js
//! import init, { mount_hero } from "./horizon.js";
//! await init();
//! const hero = await mount_hero("hero-canvas");
//! // later, e.g. on navigation:
//! hero?.stop();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::camera::Viewport;
use crate::error::Unavailable;
use crate::hero::bootstrap::{self, Host, InitOutcome, DEFAULT_CONTAINER_ID};
use crate::hero::frame_loop::{FrameHost, FrameLoop};
use crate::hero::HeroScene;
use crate::input::{Bounds, PointerEvent};
use crate::options::Options;

/// Installs the panic hook and console logger when the module loads.
#[wasm_bindgen(start)]
pub fn on_load() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Mount a hero into the element with id `container_id` (default
/// `"hero-canvas"`), configured by an optional JSON options document.
///
/// Resolves to `undefined` when the container is missing, no GPU backend is
/// available, or the options are invalid; the page is left untouched in
/// every such case.
#[wasm_bindgen]
pub async fn mount_hero(
    container_id: Option<String>,
    options_json: Option<String>,
) -> Option<HeroHandle> {
    let options = match options_json.as_deref().map(Options::from_json) {
        None => Options::default(),
        Some(Ok(options)) => options,
        Some(Err(e)) => {
            log::error!("hero options rejected: {e}");
            return None;
        }
    };
    let InitOutcome::Mounted(host) =
        InitOutcome::require(WebHost::new(), Unavailable::NoWindow)
    else {
        return None;
    };
    let id = container_id.as_deref().unwrap_or(DEFAULT_CONTAINER_ID);

    let InitOutcome::Mounted(prepared) = bootstrap::prepare(&host, id, options)
    else {
        return None;
    };
    let mounted = match bootstrap::start(&host, prepared).await {
        Ok(outcome) => outcome.mounted()?,
        Err(e) => {
            log::error!("hero failed to start: {e}");
            return None;
        }
    };

    let hero = Rc::new(Hero {
        frame: FrameLoop::new(WebFrameHost {
            window: host.window.clone(),
            callback: RefCell::new(None),
        }),
        window: host.window,
        container: mounted.container,
        canvas: mounted.canvas,
        scene: RefCell::new(mounted.scene),
    });
    if let Err(e) = Hero::listen(&hero) {
        log::error!("hero listeners failed: {e:?}");
        hero.stop();
        return None;
    }
    Hero::start(&hero);
    Some(HeroHandle { hero })
}

/// A running hero. Freeing the handle from JS stops it too.
#[wasm_bindgen]
pub struct HeroHandle {
    hero: Rc<Hero>,
}

#[wasm_bindgen]
impl HeroHandle {
    /// Cancel the pending animation frame and remove every listener. The
    /// canvas stays in the page showing the last frame.
    pub fn stop(&self) {
        self.hero.stop();
    }

    /// Whether the animation loop is still scheduled.
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.hero.frame.is_running()
    }
}

// ── Host ─────────────────────────────────────────────────────────────────

struct WebHost {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebHost {
    fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// WebGPU if the browser advertises it, else a WebGL2 context on a
    /// scratch canvas.
    fn has_renderer(&self) -> bool {
        let navigator = self.window.navigator();
        let has_gpu = js_sys::Reflect::get(&navigator, &"gpu".into())
            .is_ok_and(|gpu| !gpu.is_undefined() && !gpu.is_null());
        has_gpu || self.scratch_webgl2()
    }

    fn scratch_webgl2(&self) -> bool {
        self.document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            .and_then(|canvas| canvas.get_context("webgl2").ok().flatten())
            .is_some()
    }
}

impl Host for WebHost {
    type Container = web_sys::HtmlElement;
    type Canvas = web_sys::HtmlCanvasElement;

    fn find_container(&self, id: &str) -> Option<Self::Container> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
    }

    fn container_size(&self, container: &Self::Container) -> (f32, f32) {
        (container.client_width() as f32, container.client_height() as f32)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn create_canvas(&self, viewport: &Viewport) -> Option<Self::Canvas> {
        if !self.has_renderer() {
            return None;
        }
        let canvas = self
            .document
            .create_element("canvas")
            .ok()?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .ok()?;
        size_canvas(&canvas, viewport);
        let style = canvas.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("width", "100%");
        let _ = style.set_property("height", "100%");
        let _ = style.set_property("touch-action", "none");
        Some(canvas)
    }

    fn surface_target(
        &self,
        canvas: &Self::Canvas,
    ) -> wgpu::SurfaceTarget<'static> {
        wgpu::SurfaceTarget::Canvas(canvas.clone())
    }

    fn attach(&self, container: &Self::Container, canvas: &Self::Canvas) {
        if let Err(e) = container.append_child(canvas) {
            log::error!("hero canvas could not be attached: {e:?}");
        }
    }
}

fn size_canvas(canvas: &web_sys::HtmlCanvasElement, viewport: &Viewport) {
    canvas.set_width(viewport.width);
    canvas.set_height(viewport.height);
}

// ── Running hero ─────────────────────────────────────────────────────────

type Listener = Closure<dyn FnMut(web_sys::Event)>;

struct Hero {
    window: web_sys::Window,
    container: web_sys::HtmlElement,
    canvas: web_sys::HtmlCanvasElement,
    scene: RefCell<HeroScene>,
    frame: FrameLoop<WebFrameHost>,
}

impl Hero {
    fn bounds(&self) -> Bounds {
        let rect = self.container.get_bounding_client_rect();
        Bounds::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn viewport(&self) -> Viewport {
        let max = self.scene.borrow().options().camera.max_pixel_ratio;
        Viewport::from_css(
            self.container.client_width() as f32,
            self.container.client_height() as f32,
            self.window.device_pixel_ratio(),
            max,
        )
    }

    fn listen(hero: &Rc<Self>) -> Result<(), JsValue> {
        let target: &web_sys::EventTarget = hero.container.as_ref();
        for kind in ["pointermove", "pointerdown", "pointerup", "pointerleave"]
        {
            let weak = Rc::downgrade(hero);
            let closure = Listener::new(move |event: web_sys::Event| {
                if let Some(hero) = weak.upgrade() {
                    hero.on_pointer(&event);
                }
            });
            hero.add_listener(target, kind, closure)?;
        }

        let weak = Rc::downgrade(hero);
        let on_resize = Listener::new(move |_event: web_sys::Event| {
            if let Some(hero) = weak.upgrade() {
                hero.on_resize();
            }
        });
        hero.add_listener(hero.window.as_ref(), "resize", on_resize)
    }

    fn add_listener(
        &self,
        target: &web_sys::EventTarget,
        kind: &'static str,
        closure: Listener,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(
            kind,
            closure.as_ref().unchecked_ref(),
        )?;
        self.frame.add_listener(WebListener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    fn on_pointer(&self, event: &web_sys::Event) {
        let Some(pointer) = event.dyn_ref::<web_sys::PointerEvent>() else {
            return;
        };
        let x = pointer.client_x() as f32;
        let y = pointer.client_y() as f32;
        let id = pointer.pointer_id();
        let mapped = match event.type_().as_str() {
            "pointermove" => PointerEvent::Move { x, y },
            "pointerdown" => {
                let _ = self.container.set_pointer_capture(id);
                PointerEvent::Down {
                    x,
                    y,
                    pointer_id: id,
                }
            }
            "pointerup" => {
                let _ = self.container.release_pointer_capture(id);
                PointerEvent::Up { pointer_id: id }
            }
            "pointerleave" => PointerEvent::Leave,
            _ => return,
        };
        let bounds = self.bounds();
        self.scene.borrow_mut().handle_pointer(mapped, bounds);
    }

    fn on_resize(&self) {
        let viewport = self.viewport();
        size_canvas(&self.canvas, &viewport);
        self.scene.borrow_mut().resize(viewport);
    }

    fn start(hero: &Rc<Self>) {
        let weak = Rc::downgrade(hero);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(hero) = weak.upgrade() {
                hero.frame.tick(|| hero.scene.borrow_mut().frame());
            }
        });
        *hero.frame.host().callback.borrow_mut() = Some(callback);
        hero.frame.start();
    }

    fn stop(&self) {
        self.frame.stop();
    }
}

impl Drop for Hero {
    fn drop(&mut self) {
        self.stop();
    }
}

// ── Animation loop ───────────────────────────────────────────────────────

struct WebListener {
    target: web_sys::EventTarget,
    kind: &'static str,
    closure: Listener,
}

/// `requestAnimationFrame` and listener removal for [`FrameLoop`]. The
/// frame callback is kept alive here: it may be the caller of `stop`.
struct WebFrameHost {
    window: web_sys::Window,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameHost for WebFrameHost {
    type Listener = WebListener;

    fn request_frame(&self) -> Option<i32> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| log::error!("requestAnimationFrame failed: {e:?}"))
            .ok()
    }

    fn cancel_frame(&self, id: i32) {
        let _ = self.window.cancel_animation_frame(id);
    }

    fn remove_listener(&self, listener: Self::Listener) {
        let _ = listener.target.remove_event_listener_with_callback(
            listener.kind,
            listener.closure.as_ref().unchecked_ref(),
        );
    }
}
