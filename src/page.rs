//! Browser wiring: binds the effects to canvases on the page, window resize,
//! scroll position and the one-shot start gesture.
//!
//! Every entry point is a silent no-op when its canvas is missing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::config::{FieldConfig, MatrixConfig};
use crate::frame::{LoopControl, LoopHandle, run_on_animation_frames};
use crate::matrix::MatrixRain;
use crate::renderer::ParticleFieldRenderer;
use crate::rng::MathRandom;
use crate::surface::CanvasSurface;
use crate::viewport::Viewport;

const START_EVENTS: [&str; 3] = ["keydown", "mousedown", "touchstart"];

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Binds the starfield to `canvas_id` and runs it for the life of the page.
pub fn start_starfield(canvas_id: &str, config: FieldConfig) -> Option<LoopHandle> {
    let win = window()?;
    let renderer = ParticleFieldRenderer::initialize(
        CanvasSurface::find(canvas_id),
        Viewport::from_window(&win),
        MathRandom,
        config,
    )?;
    let renderer = Rc::new(RefCell::new(renderer));

    {
        let renderer = renderer.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(w) = window() {
                renderer.borrow_mut().on_resize(Viewport::from_window(&w));
            }
        }) as Box<dyn FnMut()>);
        if let Err(e) =
            win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            log::warn!("resize listener not installed: {e:?}");
        }
        closure.forget();
    }

    log::info!("starfield running on #{canvas_id}");
    Some(run_on_animation_frames(move |now: f64| {
        renderer.borrow_mut().render_frame(now, scroll_y());
        LoopControl::Continue
    }))
}

/// Plays one matrix-rain session on `canvas_id`. Each call gets its own
/// column state; callers must not reuse a canvas for two live sessions.
pub fn run_matrix_rain(
    canvas_id: &str,
    duration_ms: f64,
    config: MatrixConfig,
) -> Option<LoopHandle> {
    let win = window()?;
    let session = MatrixRain::start(
        CanvasSurface::find(canvas_id),
        Viewport::from_window(&win),
        now_ms(),
        duration_ms,
        MathRandom,
        config,
    )?;
    log::info!("matrix rain on #{canvas_id} for {duration_ms}ms");
    Some(run_on_animation_frames(session))
}

/// Runs the matrix rain once, on the first key press, mouse press or touch.
/// The listeners remove themselves after that first gesture.
pub fn install_start_trigger(
    canvas_id: &str,
    duration_ms: f64,
    config: MatrixConfig,
) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let fired = Rc::new(Cell::new(false));
    let self_ref: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));

    let id = canvas_id.to_string();
    let cb_ref = self_ref.clone();
    let closure = Closure::wrap(Box::new(move || {
        if fired.replace(true) {
            return;
        }
        if let (Some(w), Some(f)) = (window(), cb_ref.borrow().as_ref()) {
            for ev in START_EVENTS {
                let _ = w.remove_event_listener_with_callback(ev, f);
            }
        }
        run_matrix_rain(&id, duration_ms, config.clone());
    }) as Box<dyn FnMut()>);

    let func: &js_sys::Function = closure.as_ref().unchecked_ref();
    for ev in START_EVENTS {
        win.add_event_listener_with_callback(ev, func)?;
    }
    *self_ref.borrow_mut() = Some(func.clone());
    closure.forget();
    Ok(())
}
