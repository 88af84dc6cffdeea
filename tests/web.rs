// Browser-only checks (wasm-pack test --headless --chrome).
#![cfg(target_arch = "wasm32")]

use portfolio_starfield::{CanvasSurface, Surface, SurfaceError, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let doc = web_sys::window().unwrap().document().unwrap();
    let c: HtmlCanvasElement = doc.create_element("canvas").unwrap().dyn_into().unwrap();
    c.set_id(id);
    doc.body().unwrap().append_child(&c).unwrap();
    c
}

#[wasm_bindgen_test]
fn missing_canvas_is_a_silent_noop() {
    assert!(matches!(
        CanvasSurface::bind("no-such-canvas"),
        Err(SurfaceError::NotFound(_))
    ));
    assert!(!portfolio_starfield::start_starfield(Some("no-such-canvas".into())));
    assert!(!portfolio_starfield::run_matrix_rain(
        Some("no-such-canvas".into()),
        None
    ));
}

#[wasm_bindgen_test]
fn resize_sets_backing_and_css_size() {
    let canvas = add_canvas("resize-test");
    let mut s = CanvasSurface::find("resize-test").unwrap();
    s.resize(&Viewport::new(300.0, 150.0, 2.0));
    assert_eq!(s.backing_size(), (600, 300));
    assert_eq!(canvas.style().get_property_value("width").unwrap(), "300px");
}

#[wasm_bindgen_test]
fn matrix_rain_makes_canvas_opaque_immediately() {
    let canvas = add_canvas("rain-test");
    assert!(portfolio_starfield::run_matrix_rain(
        Some("rain-test".into()),
        Some(1000.0)
    ));
    assert_eq!(canvas.style().get_property_value("opacity").unwrap(), "1");
}

#[wasm_bindgen_test]
fn start_trigger_fires_once_then_unhooks() {
    let win = web_sys::window().unwrap();
    let canvas = add_canvas("trigger-test");
    portfolio_starfield::install_start_trigger(Some("trigger-test".into()), Some(1000.0))
        .unwrap();
    // nothing happens until a gesture
    assert_eq!(canvas.style().get_property_value("opacity").unwrap(), "");

    win.dispatch_event(&Event::new("mousedown").unwrap()).unwrap();
    assert_eq!(canvas.style().get_property_value("opacity").unwrap(), "1");
    assert!(canvas.width() > 1);

    // later gestures of any kind must not start a second session
    canvas.set_width(1);
    canvas.style().set_property("opacity", "0.5").unwrap();
    for ev in ["keydown", "mousedown", "touchstart"] {
        win.dispatch_event(&Event::new(ev).unwrap()).unwrap();
    }
    assert_eq!(canvas.width(), 1);
    assert_eq!(canvas.style().get_property_value("opacity").unwrap(), "0.5");
}

#[wasm_bindgen_test]
fn fill_color_reaches_context_and_streak_restores_state() {
    let canvas = add_canvas("style-test");
    let ctx: web_sys::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let mut s = CanvasSurface::find("style-test").unwrap();
    s.resize(&Viewport::new(200.0, 100.0, 1.0));
    s.set_fill("#93c5fd");
    assert_eq!(ctx.fill_style().as_string().as_deref(), Some("#93c5fd"));

    s.stroke_streak((150.0, 40.0), (60.0, -5.0), (90.0, 10.0), 2.0);
    assert_eq!(ctx.global_composite_operation().unwrap(), "source-over");
    assert_eq!(ctx.stroke_style().as_string().as_deref(), Some("#000000"));
}
