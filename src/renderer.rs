//! Particle field renderer: layered parallax starfield plus shooting stars.

use crate::config::FieldConfig;
use crate::rng::RandomSource;
use crate::starfield::{Layer, regenerate_layers, star_alpha, wrapped_y};
use crate::streak::Streak;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// Owns a bound surface, three star layers, live streaks and the simulation
/// clock. Built once per page and driven one frame at a time.
pub struct ParticleFieldRenderer<S: Surface, R: RandomSource> {
    surface: S,
    rng: R,
    config: FieldConfig,
    viewport: Viewport,
    layers: Vec<Layer>,
    streaks: Vec<Streak>,
    /// Seconds of simulated time.
    sim_time: f64,
    /// Timestamp (ms) of the previous frame; `None` before the first frame.
    last_ms: Option<f64>,
}

impl<S: Surface, R: RandomSource> ParticleFieldRenderer<S, R> {
    /// Binds to `surface`. An absent surface yields `None` and nothing runs.
    /// `config` is sanitized first, so the three-layer shape and the per-layer
    /// star floors hold whatever the host passed in.
    pub fn initialize(
        surface: Option<S>,
        viewport: Viewport,
        rng: R,
        config: FieldConfig,
    ) -> Option<Self> {
        let surface = surface?;
        let mut renderer = Self {
            surface,
            rng,
            config: config.sanitized(),
            viewport,
            layers: Vec::new(),
            streaks: Vec::new(),
            sim_time: 0.0,
            last_ms: None,
        };
        renderer.surface.resize(&renderer.viewport);
        renderer.regenerate_layers();
        log::debug!(
            "starfield bound at {}x{} (dpr {}), {} stars",
            viewport.width,
            viewport.height,
            viewport.dpr,
            renderer.star_total()
        );
        Some(renderer)
    }

    /// Throws away every star and builds new layers for the current viewport.
    pub fn regenerate_layers(&mut self) {
        self.layers = regenerate_layers(&self.config, &self.viewport, &mut self.rng);
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.resize(&self.viewport);
        self.regenerate_layers();
    }

    /// Draws one frame at monotonic time `now_ms` with the page scrolled to
    /// `scroll_y`.
    pub fn render_frame(&mut self, now_ms: f64, scroll_y: f64) {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0).min(self.config.max_step),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.sim_time += dt;

        self.surface.clear();
        self.draw_layers(scroll_y);

        if self.rng.chance(self.config.streak_chance) {
            let s = Streak::spawn(&self.viewport, &mut self.rng, self.config.streak_steps);
            self.streaks.push(s);
        }
        let surface = &mut self.surface;
        self.streaks.retain_mut(|s| s.step_and_draw(dt, &mut *surface) && !s.is_done());
    }

    fn draw_layers(&mut self, scroll_y: f64) {
        let t = self.sim_time;
        let height = self.viewport.height;
        let margin = self.config.wrap_margin;
        // back to front
        for layer in &self.layers {
            let spec = &layer.spec;
            self.surface.set_fill(&spec.color);
            for star in &layer.stars {
                let y = wrapped_y(star.y, scroll_y, spec.parallax, height, margin);
                let alpha = star_alpha(t, spec.twinkle_speed, star.phase);
                self.surface
                    .fill_circle(star.x, y, star.radius + spec.radius_boost, alpha);
            }
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn star_total(&self) -> usize {
        self.layers.iter().map(|l| l.stars.len()).sum()
    }
}
