//! Logical viewport size and the capped device pixel ratio used to size
//! backing stores.

use web_sys::Window;

/// Upper bound on the device pixel ratio.
pub const DPR_CAP: f64 = 2.0;

/// Logical (CSS pixel) viewport plus the effective pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    /// Builds a viewport, capping `raw_dpr` at [`DPR_CAP`]. Garbage ratios
    /// (zero, negative, NaN) fall back to 1.
    pub fn new(width: f64, height: f64, raw_dpr: f64) -> Self {
        let dpr = if raw_dpr.is_finite() && raw_dpr > 0.0 {
            raw_dpr.min(DPR_CAP)
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Device-pixel size of the backing store: `floor(logical * dpr)`.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).floor() as u32,
            (self.height * self.dpr).floor() as u32,
        )
    }

    /// Reads `innerWidth` / `innerHeight` / `devicePixelRatio`. Missing values
    /// read as zero size and ratio 1.
    pub fn from_window(win: &Window) -> Self {
        let w = win
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = win
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Self::new(w, h, win.device_pixel_ratio())
    }
}
