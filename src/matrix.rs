//! One-shot "matrix rain" transition overlay.
//!
//! Each [`MatrixRain`] owns its surface, its column state and its random
//! source, so any number of sessions can run side by side on distinct
//! canvases without touching each other.

use crate::config::{MatrixConfig, rain_duration};
use crate::frame::{FrameTask, LoopControl};
use crate::rng::RandomSource;
use crate::surface::Surface;
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RainStatus {
    /// Still drawing glyphs.
    Raining,
    /// Duration elapsed; opacity is 0 and the clear is pending.
    Fading,
    /// Surface cleared. Further frames do nothing.
    Done,
}

pub struct MatrixRain<S: Surface, R: RandomSource> {
    surface: S,
    rng: R,
    config: MatrixConfig,
    glyphs: Vec<char>,
    viewport: Viewport,
    /// Fall position of each column, in glyph rows.
    drops: Vec<u32>,
    running: bool,
    start_ms: f64,
    duration_ms: f64,
    stopped_at: Option<f64>,
    cleared: bool,
}

impl<S: Surface, R: RandomSource> MatrixRain<S, R> {
    /// Starts a session at `now_ms`. The surface is sized like the starfield
    /// and made fully opaque right away. `None` surface means no session.
    /// A NaN, infinite or negative `duration_ms` runs for the default second.
    pub fn start(
        surface: Option<S>,
        viewport: Viewport,
        now_ms: f64,
        duration_ms: f64,
        rng: R,
        config: MatrixConfig,
    ) -> Option<Self> {
        let mut surface = surface?;
        let config = config.sanitized();
        let duration_ms = rain_duration(duration_ms);
        surface.resize(&viewport);
        surface.set_opacity(1.0);

        let columns = column_count(viewport.width, config.glyph_size);
        let mut glyphs: Vec<char> = config.glyphs.chars().collect();
        if glyphs.is_empty() {
            glyphs.push('*');
        }
        log::debug!("matrix rain: {columns} columns for {duration_ms}ms");
        Some(Self {
            surface,
            rng,
            config,
            glyphs,
            viewport,
            drops: vec![0; columns],
            running: true,
            start_ms: now_ms,
            duration_ms,
            stopped_at: None,
            cleared: false,
        })
    }

    pub fn frame(&mut self, now_ms: f64) -> RainStatus {
        if self.cleared {
            return RainStatus::Done;
        }
        if !self.running {
            let stopped = self.stopped_at.unwrap_or(now_ms);
            if now_ms - stopped >= self.config.clear_delay_ms {
                self.surface.clear();
                self.cleared = true;
                log::debug!("matrix rain cleared");
                return RainStatus::Done;
            }
            return RainStatus::Fading;
        }

        self.draw_rows();

        if now_ms - self.start_ms >= self.duration_ms {
            self.running = false;
            self.stopped_at = Some(now_ms);
            self.surface.set_opacity(0.0);
            return RainStatus::Fading;
        }
        RainStatus::Raining
    }

    fn draw_rows(&mut self) {
        let size = self.config.glyph_size;
        let height = self.viewport.height;
        self.surface.set_fill(&self.config.fade_fill);
        self.surface.fill_all();
        self.surface.set_fill(&self.config.glyph_color);
        self.surface.set_font(&self.config.font());

        let mut buf = [0u8; 4];
        for (i, drop) in self.drops.iter_mut().enumerate() {
            let ch = self.glyphs[self.rng.index(self.glyphs.len())];
            let y = *drop as f64 * size;
            self.surface
                .fill_glyph(ch.encode_utf8(&mut buf), i as f64 * size, y);
            if y > height && self.rng.chance(self.config.reset_chance) {
                *drop = 0;
            }
            *drop += 1;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface, R: RandomSource> FrameTask for MatrixRain<S, R> {
    fn on_frame(&mut self, now_ms: f64) -> LoopControl {
        match self.frame(now_ms) {
            RainStatus::Done => LoopControl::Stop,
            _ => LoopControl::Continue,
        }
    }
}

/// `ceil(width / glyph_size)`; zero for a degenerate cell size.
pub fn column_count(width: f64, glyph_size: f64) -> usize {
    if glyph_size <= 0.0 || width <= 0.0 {
        return 0;
    }
    (width / glyph_size).ceil() as usize
}
