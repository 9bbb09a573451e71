use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    window, CanvasRenderingContext2d, Document, EventTarget, HtmlCanvasElement, MouseEvent,
};

use super::events::Listener;
use crate::geometry::Point;
use crate::{AmbientField, NetworkMap, Scene, VizConfig};

pub const AMBIENT_CANVAS_ID: &str = "geo-canvas";
pub const HERO_CANVAS_ID: &str = "hero-geo-canvas";

thread_local! {
    static MOUNTED: RefCell<Vec<CanvasScene>> = RefCell::new(Vec::new());
}

pub(crate) fn js_error(err: impl fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn js_value_to_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// How a canvas backing store follows the page layout.
#[derive(Debug, Clone, Copy)]
enum Fit {
    /// Full window, one backing pixel per CSS pixel.
    Viewport,
    /// The canvas' own CSS box, scaled by the device pixel ratio.
    Element,
}

impl Fit {
    /// Size the backing store and return the drawing size in CSS pixels.
    fn apply(self, canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) -> (f64, f64) {
        let window = window();
        match self {
            Fit::Viewport => {
                let dimension =
                    |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
                let (w, h) = match &window {
                    Some(window) => (
                        dimension(window.inner_width()),
                        dimension(window.inner_height()),
                    ),
                    None => (0.0, 0.0),
                };
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
                (w, h)
            }
            Fit::Element => {
                let dpr = window.map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
                let w = canvas.client_width().max(0) as f64;
                let h = canvas.client_height().max(0) as f64;
                canvas.set_width((w * dpr) as u32);
                canvas.set_height((h * dpr) as u32);
                // resizing resets the context, so scale after
                ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
                (w, h)
            }
        }
    }
}

/// The `requestAnimationFrame` loop behind a mounted scene.
///
/// `stop()` cancels the pending frame, and a frame that still fires checks
/// `running` before doing any work, so nothing is scheduled after a stop.
struct FrameLoop {
    running: Cell<bool>,
    handle: Cell<Option<i32>>,
    on_frame: RefCell<Box<dyn FnMut()>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameLoop {
    fn new(on_frame: impl FnMut() + 'static) -> Rc<Self> {
        let frames = Rc::new(FrameLoop {
            running: Cell::new(false),
            handle: Cell::new(None),
            on_frame: RefCell::new(Box::new(on_frame)),
            callback: RefCell::new(None),
        });
        // The closure holds a weak reference so dropping the scene frees it.
        let weak = Rc::downgrade(&frames);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(frames) = weak.upgrade() {
                frames.tick();
            }
        }) as Box<dyn FnMut()>);
        *frames.callback.borrow_mut() = Some(callback);
        frames
    }

    fn tick(&self) {
        self.handle.set(None);
        if !self.running.get() {
            return;
        }
        self.step();
        if self.running.get() {
            if let Err(err) = self.request() {
                log::error!("animation stopped: {}", js_value_to_string(&err));
                self.running.set(false);
            }
        }
    }

    fn step(&self) {
        if let Ok(mut on_frame) = self.on_frame.try_borrow_mut() {
            (&mut **on_frame)();
        }
    }

    fn request(&self) -> Result<(), JsValue> {
        let window = window().ok_or("no window")?;
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| js_error("animation callback released"))?;
        let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.handle.set(Some(id));
        Ok(())
    }

    fn start(&self) -> Result<(), JsValue> {
        if self.running.replace(true) {
            return Ok(());
        }
        self.request().map_err(|err| {
            self.running.set(false);
            err
        })
    }

    fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Some(window) = window() {
                window.cancel_animation_frame(id).ok();
            }
        }
    }
}

/// A scene bound to a canvas, with an explicit start/stop lifecycle.
#[wasm_bindgen]
pub struct CanvasScene {
    frames: Rc<FrameLoop>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl CanvasScene {
    /// Ambient particle field filling the window.
    pub fn ambient(canvas: HtmlCanvasElement) -> Result<CanvasScene, JsValue> {
        let config = VizConfig::default();
        Self::mount(canvas, Fit::Viewport, false, |w, h, rng| {
            Ok(AmbientField::new(&config, w, h, rng))
        })
    }

    /// Railway network map sized to the canvas box.
    pub fn network(canvas: HtmlCanvasElement) -> Result<CanvasScene, JsValue> {
        let config = VizConfig::default();
        Self::mount(canvas, Fit::Element, true, |w, h, rng| {
            NetworkMap::new(&config, w, h, rng).map_err(js_error)
        })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.frames.start()
    }

    pub fn stop(&self) {
        self.frames.stop();
    }

    /// Advance and paint exactly one frame, whether or not the loop runs.
    pub fn step(&self) {
        self.frames.step();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.frames.running.get()
    }
}

impl CanvasScene {
    fn mount<S, B>(
        canvas: HtmlCanvasElement,
        fit: Fit,
        track_pointer: bool,
        build: B,
    ) -> Result<CanvasScene, JsValue>
    where
        S: Scene + 'static,
        B: FnOnce(f64, f64, &mut SmallRng) -> Result<S, JsValue>,
    {
        let mut ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("2d context not supported"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let mut rng = SmallRng::seed_from_u64(seed);
        let (width, height) = fit.apply(&canvas, &ctx);
        let mut scene = build(width, height, &mut rng)?;

        // Listeners only record; the next frame applies the change.
        let resized = Rc::new(Cell::new(false));
        let pointer = Rc::new(Cell::new(None::<Point>));

        let mut listeners = Vec::new();
        let window = window().ok_or("no window")?;
        listeners.push(Listener::new(window.as_ref(), "resize", {
            let resized = resized.clone();
            move |_| resized.set(true)
        })?);

        if track_pointer {
            let target: &EventTarget = canvas.as_ref();
            listeners.push(Listener::new(target, "mousemove", {
                let pointer = pointer.clone();
                let canvas = canvas.clone();
                move |event| {
                    if let Some(event) = event.dyn_ref::<MouseEvent>() {
                        let rect = canvas.get_bounding_client_rect();
                        pointer.set(Some(Point::new(
                            event.client_x() as f64 - rect.left(),
                            event.client_y() as f64 - rect.top(),
                        )));
                    }
                }
            })?);
            listeners.push(Listener::new(target, "mouseleave", {
                let pointer = pointer.clone();
                move |_| pointer.set(None)
            })?);
        }

        let frames = FrameLoop::new(move || {
            if resized.replace(false) {
                let (width, height) = fit.apply(&canvas, &ctx);
                scene.resize(width, height, &mut rng);
            }
            scene.set_pointer(pointer.get());
            scene.step(&mut ctx, &mut rng);
        });

        Ok(CanvasScene {
            frames,
            _listeners: listeners,
        })
    }
}

impl Drop for CanvasScene {
    fn drop(&mut self) {
        self.frames.stop();
    }
}

fn find_canvas(document: &Document, id: &str) -> Option<HtmlCanvasElement> {
    let canvas = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    if canvas.is_none() {
        log::debug!("#{id} not found, skipping");
    }
    canvas
}

/// Mount and start whichever page canvases exist and return how many scenes
/// are running. Each scene mounts and starts on its own, so a failure in one
/// is logged and leaves the other running.
pub fn mount_page(document: &Document) -> usize {
    let mut mounted = Vec::new();

    if let Some(canvas) = find_canvas(document, AMBIENT_CANVAS_ID) {
        match CanvasScene::ambient(canvas) {
            Ok(scene) => mounted.push(scene),
            Err(err) => log::error!("ambient field disabled: {}", js_value_to_string(&err)),
        }
    }
    if let Some(canvas) = find_canvas(document, HERO_CANVAS_ID) {
        match CanvasScene::network(canvas) {
            Ok(scene) => mounted.push(scene),
            Err(err) => log::error!("network map disabled: {}", js_value_to_string(&err)),
        }
    }

    mounted.retain(|scene| match scene.start() {
        Ok(()) => true,
        Err(err) => {
            log::error!("scene failed to start: {}", js_value_to_string(&err));
            false
        }
    });
    let running = mounted.len();
    log::info!("{running} canvas scene(s) running");
    MOUNTED.with(|scenes| scenes.borrow_mut().extend(mounted));
    running
}

/// Stop every scene mounted at startup.
#[wasm_bindgen(js_name = pauseAll)]
pub fn pause_all() {
    MOUNTED.with(|scenes| scenes.borrow().iter().for_each(CanvasScene::stop));
}

/// Restart every scene mounted at startup.
#[wasm_bindgen(js_name = resumeAll)]
pub fn resume_all() -> Result<(), JsValue> {
    MOUNTED.with(|scenes| scenes.borrow().iter().try_for_each(CanvasScene::start))
}

/// Advance every mounted scene by one frame.
#[wasm_bindgen(js_name = stepAll)]
pub fn step_all() {
    MOUNTED.with(|scenes| scenes.borrow().iter().for_each(CanvasScene::step));
}

#[wasm_bindgen(js_name = isRunning)]
pub fn is_running() -> bool {
    MOUNTED.with(|scenes| scenes.borrow().iter().any(CanvasScene::running))
}
