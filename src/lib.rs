//! Portfolio starfield crate.
//!
//! Decorative canvas effects for the portfolio page: a three-layer parallax
//! starfield with twinkle and shooting stars behind the content, and a
//! one-shot matrix-rain overlay played when the visitor starts. The frame
//! logic is host-agnostic (see [`surface::Surface`]); [`page`] wires it to
//! the browser.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod constants;
pub mod frame;
pub mod matrix;
pub mod page;
pub mod renderer;
pub mod rng;
pub mod starfield;
pub mod streak;
pub mod surface;
pub mod viewport;

pub use config::{FieldConfig, LayerSpec, MatrixConfig};
pub use frame::{FrameTask, LoopControl, LoopHandle};
pub use matrix::{MatrixRain, RainStatus};
pub use renderer::ParticleFieldRenderer;
pub use starfield::{Layer, Star};
pub use streak::Streak;
pub use surface::{CanvasSurface, DrawCommand, RecordingSurface, Surface, SurfaceError};
pub use viewport::Viewport;

use crate::constants::{MATRIX_CANVAS_ID, MATRIX_DEFAULT_DURATION_MS, STARFIELD_CANVAS_ID};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // a second init (module re-instantiated) is harmless
    console_log::init_with_level(level).ok();
    log::debug!("portfolio-starfield {} loaded", env!("CARGO_PKG_VERSION"));
}

// -----------------------------------------------------------------------------
// JS entry points. All of them quietly do nothing when the canvas is absent.
// -----------------------------------------------------------------------------

/// Starts the background starfield on `canvas_id` (default `bgStars`).
/// Returns whether a canvas was found.
#[wasm_bindgen]
pub fn start_starfield(canvas_id: Option<String>) -> bool {
    let id = canvas_id.as_deref().unwrap_or(STARFIELD_CANVAS_ID);
    page::start_starfield(id, FieldConfig::default()).is_some()
}

/// Plays the matrix-rain transition once on `canvas_id` (default
/// `matrixRain`) for `duration_ms` (default 1000).
#[wasm_bindgen]
pub fn run_matrix_rain(canvas_id: Option<String>, duration_ms: Option<f64>) -> bool {
    let id = canvas_id.as_deref().unwrap_or(MATRIX_CANVAS_ID);
    let duration = duration_ms.unwrap_or(MATRIX_DEFAULT_DURATION_MS);
    page::run_matrix_rain(id, duration, MatrixConfig::default()).is_some()
}

/// Arms the matrix rain to play on the visitor's first key, click or touch.
#[wasm_bindgen]
pub fn install_start_trigger(
    canvas_id: Option<String>,
    duration_ms: Option<f64>,
) -> Result<(), JsValue> {
    let id = canvas_id.as_deref().unwrap_or(MATRIX_CANVAS_ID);
    let duration = duration_ms.unwrap_or(MATRIX_DEFAULT_DURATION_MS);
    page::install_start_trigger(id, duration, MatrixConfig::default())
}

/// Like [`start_starfield`] with a JSON `FieldConfig` override. Bad JSON is
/// logged and the defaults are used.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_starfield_with_config(canvas_id: Option<String>, config_json: &str) -> bool {
    let id = canvas_id.as_deref().unwrap_or(STARFIELD_CANVAS_ID);
    let config = FieldConfig::from_json(config_json).unwrap_or_else(|e| {
        log::warn!("starfield config ignored: {e}");
        FieldConfig::default()
    });
    page::start_starfield(id, config).is_some()
}

/// Like [`run_matrix_rain`] with a JSON `MatrixConfig` override.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn run_matrix_rain_with_config(
    canvas_id: Option<String>,
    duration_ms: Option<f64>,
    config_json: &str,
) -> bool {
    let id = canvas_id.as_deref().unwrap_or(MATRIX_CANVAS_ID);
    let duration = duration_ms.unwrap_or(MATRIX_DEFAULT_DURATION_MS);
    let config = MatrixConfig::from_json(config_json).unwrap_or_else(|e| {
        log::warn!("matrix config ignored: {e}");
        MatrixConfig::default()
    });
    page::run_matrix_rain(id, duration, config).is_some()
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
