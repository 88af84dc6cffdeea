//! Drawing surface seam.
//!
//! Effects draw through [`Surface`] so the same frame logic runs against a
//! real `<canvas>` in the browser or a [`RecordingSurface`] in tests.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::constants::{STREAK_HEAD, STREAK_TAIL};
use crate::viewport::Viewport;

pub trait Surface {
    /// Resize the backing store to `viewport.backing_size()`, set the CSS size
    /// to the logical size and install a `dpr` scale so callers keep drawing
    /// in logical pixels.
    fn resize(&mut self, viewport: &Viewport);
    fn backing_size(&self) -> (u32, u32);
    /// Clear the whole logical area to transparent.
    fn clear(&mut self);
    fn set_fill(&mut self, color: &str);
    fn set_font(&mut self, font: &str);
    /// Fill the whole logical area with the current fill.
    fn fill_all(&mut self);
    /// Filled circle in the current fill color at the given alpha.
    fn fill_circle(&mut self, x: f64, y: f64, r: f64, alpha: f64);
    /// Additive line from `head` to `tail`, stroked with a gradient that runs
    /// from bright at `head` to transparent at `fade_to`.
    fn stroke_streak(&mut self, head: (f64, f64), tail: (f64, f64), fade_to: (f64, f64), width: f64);
    fn fill_glyph(&mut self, glyph: &str, x: f64, y: f64);
    /// CSS opacity of the host element.
    fn set_opacity(&mut self, opacity: f64);
}

/// Reasons a canvas could not be bound.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("no window or document")]
    NoDocument,
    #[error("element #{0} not found")]
    NotFound(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("2d context unavailable on #{0}")]
    ContextUnavailable(String),
}

/// A `<canvas>` element plus its 2d context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    logical: (f64, f64),
}

impl CanvasSurface {
    pub fn bind(id: &str) -> Result<Self, SurfaceError> {
        let doc = window()
            .and_then(|w| w.document())
            .ok_or(SurfaceError::NoDocument)?;
        let el = doc
            .get_element_by_id(id)
            .ok_or_else(|| SurfaceError::NotFound(id.to_string()))?;
        let canvas: HtmlCanvasElement = el
            .dyn_into()
            .map_err(|_| SurfaceError::NotACanvas(id.to_string()))?;
        Self::from_canvas(canvas).map_err(|_| SurfaceError::ContextUnavailable(id.to_string()))
    }

    /// Like [`CanvasSurface::bind`], but a missing or unusable canvas is
    /// logged and reported as `None`.
    pub fn find(id: &str) -> Option<Self> {
        match Self::bind(id) {
            Ok(s) => Some(s),
            Err(e) => {
                log::debug!("surface unavailable: {e}");
                None
            }
        }
    }

    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            logical: (0.0, 0.0),
        })
    }

    fn set_style(&self, prop: &str, value: &str) {
        let _ = self.canvas.style().set_property(prop, value);
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: &Viewport) {
        let (bw, bh) = viewport.backing_size();
        self.canvas.set_width(bw);
        self.canvas.set_height(bh);
        self.set_style("width", &format!("{}px", viewport.width));
        self.set_style("height", &format!("{}px", viewport.height));
        let d = viewport.dpr;
        let _ = self.ctx.set_transform(d, 0.0, 0.0, d, 0.0, 0.0);
        self.logical = (viewport.width, viewport.height);
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.logical.0, self.logical.1);
    }

    fn set_fill(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn fill_all(&mut self) {
        self.ctx.fill_rect(0.0, 0.0, self.logical.0, self.logical.1);
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, r, 0.0, TAU);
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn stroke_streak(&mut self, head: (f64, f64), tail: (f64, f64), fade_to: (f64, f64), width: f64) {
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.set_global_composite_operation("lighter");
        let grad = ctx.create_linear_gradient(head.0, head.1, fade_to.0, fade_to.1);
        let _ = grad.add_color_stop(0.0, STREAK_HEAD);
        let _ = grad.add_color_stop(1.0, STREAK_TAIL);
        ctx.set_stroke_style_canvas_gradient(&grad);
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(head.0, head.1);
        ctx.line_to(tail.0, tail.1);
        ctx.stroke();
        ctx.restore();
    }

    fn fill_glyph(&mut self, glyph: &str, x: f64, y: f64) {
        self.ctx.fill_text(glyph, x, y).ok();
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.set_style("opacity", &opacity.to_string());
    }
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32, dpr: f64 },
    Clear,
    SetFill(String),
    SetFont(String),
    FillAll,
    Circle { x: f64, y: f64, r: f64, alpha: f64 },
    Streak {
        head: (f64, f64),
        tail: (f64, f64),
        fade_to: (f64, f64),
        width: f64,
    },
    Glyph { glyph: String, x: f64, y: f64 },
    Opacity(f64),
}

/// Headless surface that records every call. Used by tests and anything
/// that wants to inspect a frame without a browser.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    backing: (u32, u32),
    opacity: Option<f64>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Last opacity written, if any.
    pub fn opacity(&self) -> Option<f64> {
        self.opacity
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.backing_size();
        self.backing = (width, height);
        self.commands.push(DrawCommand::Resize {
            width,
            height,
            dpr: viewport.dpr,
        });
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill(&mut self, color: &str) {
        self.commands.push(DrawCommand::SetFill(color.to_string()));
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::SetFont(font.to_string()));
    }

    fn fill_all(&mut self) {
        self.commands.push(DrawCommand::FillAll);
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, alpha: f64) {
        self.commands.push(DrawCommand::Circle { x, y, r, alpha });
    }

    fn stroke_streak(&mut self, head: (f64, f64), tail: (f64, f64), fade_to: (f64, f64), width: f64) {
        self.commands.push(DrawCommand::Streak {
            head,
            tail,
            fade_to,
            width,
        });
    }

    fn fill_glyph(&mut self, glyph: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::Glyph {
            glyph: glyph.to_string(),
            x,
            y,
        });
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = Some(opacity);
        self.commands.push(DrawCommand::Opacity(opacity));
    }
}
