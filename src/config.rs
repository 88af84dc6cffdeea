//! Tunables for the starfield and the matrix-rain overlay.
//!
//! Everything has a `Default` matching the look of the live page. With the
//! `serde` feature the host may override any subset of fields; missing
//! fields keep their defaults. Overrides pass through `sanitized` before
//! anything draws with them.

use crate::constants::*;

/// One depth tier of the starfield.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerSpec {
    /// Surface area (px²) per star.
    pub density: f64,
    /// Floor on the star count regardless of area.
    pub minimum: usize,
    pub radius_min: f64,
    pub radius_span: f64,
    /// Fraction of the scroll offset this layer shifts by.
    pub parallax: f64,
    pub color: String,
    /// Angular speed of the twinkle oscillation (rad/s).
    pub twinkle_speed: f64,
    /// Added to every star radius at draw time.
    pub radius_boost: f64,
}

impl Default for LayerSpec {
    fn default() -> Self {
        Self::for_depth(0)
    }
}

impl LayerSpec {
    /// Built-in spec for depth `i` (0 = farthest). Depths past the last
    /// built-in tier reuse the nearest one.
    pub fn for_depth(i: usize) -> Self {
        let i = i.min(LAYER_COUNT - 1);
        Self {
            density: LAYER_DENSITIES[i],
            minimum: LAYER_MINIMUMS[i],
            radius_min: LAYER_RADIUS[i].0,
            radius_span: LAYER_RADIUS[i].1,
            parallax: LAYER_PARALLAX[i],
            color: LAYER_COLORS[i].to_string(),
            twinkle_speed: 1.5 + 0.5 * i as f64,
            radius_boost: 0.2 * i as f64,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConfig {
    /// Back to front.
    pub layers: Vec<LayerSpec>,
    /// Largest simulation step in seconds; longer gaps (tab suspend) are
    /// clamped to this.
    pub max_step: f64,
    /// Extra pixels below the viewport before a star wraps to the top.
    pub wrap_margin: f64,
    /// Per-frame probability of a new shooting star.
    pub streak_chance: f64,
    /// Draw steps each shooting star gets before it is discarded.
    pub streak_steps: u32,
}

/// Replaces `value` with `fallback` unless `ok` holds, logging the repair.
fn repair(name: &str, value: &mut f64, fallback: f64, ok: impl Fn(f64) -> bool) {
    if !ok(*value) {
        log::warn!("{name} = {value} is unusable, using {fallback}");
        *value = fallback;
    }
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl LayerSpec {
    fn sanitize(&mut self, depth: usize) {
        let base = Self::for_depth(depth);
        repair("layer density", &mut self.density, base.density, positive);
        repair("layer radius_min", &mut self.radius_min, base.radius_min, non_negative);
        repair("layer radius_span", &mut self.radius_span, base.radius_span, non_negative);
        repair("layer radius_boost", &mut self.radius_boost, base.radius_boost, non_negative);
        repair("layer parallax", &mut self.parallax, base.parallax, f64::is_finite);
        repair("layer twinkle_speed", &mut self.twinkle_speed, base.twinkle_speed, f64::is_finite);
        if self.minimum < base.minimum {
            log::warn!(
                "layer {depth} minimum {} below floor, using {}",
                self.minimum,
                base.minimum
            );
            self.minimum = base.minimum;
        }
    }
}

impl FieldConfig {
    /// Repairs anything the renderer cannot honour: the field always has
    /// exactly three layers, none below its built-in star floor,
    /// and every step, margin and probability is finite and in range.
    pub fn sanitized(mut self) -> Self {
        if self.layers.len() != LAYER_COUNT {
            log::warn!(
                "{} layers configured, using the {LAYER_COUNT} built-in ones",
                self.layers.len()
            );
            self.layers = (0..LAYER_COUNT).map(LayerSpec::for_depth).collect();
        }
        for (depth, layer) in self.layers.iter_mut().enumerate() {
            layer.sanitize(depth);
        }
        repair("max_step", &mut self.max_step, MAX_STEP_SECS, non_negative);
        repair("wrap_margin", &mut self.wrap_margin, WRAP_MARGIN, non_negative);
        repair("streak_chance", &mut self.streak_chance, STREAK_CHANCE, |p| {
            (0.0..=1.0).contains(&p)
        });
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            layers: (0..LAYER_COUNT).map(LayerSpec::for_depth).collect(),
            max_step: MAX_STEP_SECS,
            wrap_margin: WRAP_MARGIN,
            streak_chance: STREAK_CHANCE,
            streak_steps: STREAK_STEPS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatrixConfig {
    /// Glyph cell size in logical px; also the column width.
    pub glyph_size: f64,
    pub fade_fill: String,
    pub glyph_color: String,
    /// Probability a column that has fallen off the bottom restarts this frame.
    pub reset_chance: f64,
    /// Delay between fade-out and the final clear.
    pub clear_delay_ms: f64,
    pub glyphs: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            glyph_size: MATRIX_GLYPH_SIZE,
            fade_fill: MATRIX_FADE_FILL.to_string(),
            glyph_color: MATRIX_GLYPH_COLOR.to_string(),
            reset_chance: MATRIX_RESET_CHANCE,
            clear_delay_ms: MATRIX_CLEAR_DELAY_MS,
            glyphs: MATRIX_GLYPHS.to_string(),
        }
    }
}

impl MatrixConfig {
    pub fn font(&self) -> String {
        format!("{}px monospace", self.glyph_size)
    }

    /// Same idea as [`FieldConfig::sanitized`]: a positive glyph size, a
    /// reset chance in `[0, 1]` and a non-negative clear delay.
    pub fn sanitized(mut self) -> Self {
        repair("glyph_size", &mut self.glyph_size, MATRIX_GLYPH_SIZE, positive);
        repair("reset_chance", &mut self.reset_chance, MATRIX_RESET_CHANCE, |p| {
            (0.0..=1.0).contains(&p)
        });
        repair("clear_delay_ms", &mut self.clear_delay_ms, MATRIX_CLEAR_DELAY_MS, non_negative);
        self
    }
}

/// Matrix run length in ms; anything but a finite, non-negative value falls
/// back to [`MATRIX_DEFAULT_DURATION_MS`].
pub fn rain_duration(duration_ms: f64) -> f64 {
    let mut d = duration_ms;
    repair("matrix duration_ms", &mut d, MATRIX_DEFAULT_DURATION_MS, non_negative);
    d
}

#[cfg(feature = "serde_json")]
impl FieldConfig {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(s).map(Self::sanitized)
    }
}

#[cfg(feature = "serde_json")]
impl MatrixConfig {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(s).map(Self::sanitized)
    }
}
