//! Visual constants for the backdrop. `FieldConfig` / `MatrixConfig`
//! defaults are built from these.

// Starfield layers, back to front
pub const LAYER_COUNT: usize = 3;
pub const LAYER_DENSITIES: [f64; LAYER_COUNT] = [9000.0, 14000.0, 22000.0];
pub const LAYER_MINIMUMS: [usize; LAYER_COUNT] = [80, 50, 30];
/// (min, span) per layer: radius is uniform in `[min, min + span)`.
pub const LAYER_RADIUS: [(f64, f64); LAYER_COUNT] = [(0.2, 0.8), (0.4, 1.2), (0.6, 1.6)];
pub const LAYER_PARALLAX: [f64; LAYER_COUNT] = [0.15, 0.3, 0.45];
pub const LAYER_COLORS: [&str; LAYER_COUNT] = ["#93c5fd", "#a5b4fc", "#c7d2fe"];

// Clock
pub const MAX_STEP_SECS: f64 = 0.05;
pub const WRAP_MARGIN: f64 = 5.0;

// Twinkle
pub const ALPHA_FLOOR: f64 = 0.2;
pub const ALPHA_RANGE: f64 = 0.8;

// Shooting stars
pub const STREAK_CHANCE: f64 = 0.03;
pub const STREAK_STEPS: u32 = 26;
pub const STREAK_ORIGIN_BAND: f64 = 0.4;
pub const STREAK_VX: (f64, f64) = (-400.0, -200.0);
pub const STREAK_VY: (f64, f64) = (120.0, 280.0);
pub const STREAK_LEN: (f64, f64) = (450.0, 700.0);
/// Vertical rise of the trail per unit of horizontal length.
pub const STREAK_SLOPE: f64 = 0.5;
/// Fraction of the trail length at which the gradient is fully transparent.
pub const STREAK_FADE_SPAN: f64 = 0.6;
/// Trail reaches full length after `1 / STREAK_GROWTH` seconds.
pub const STREAK_GROWTH: f64 = 1.5;
pub const STREAK_WIDTH: f64 = 2.0;
pub const STREAK_HEAD: &str = "rgba(147,197,253,0.8)";
pub const STREAK_TAIL: &str = "rgba(147,197,253,0)";

// Matrix rain
pub const MATRIX_GLYPH_SIZE: f64 = 16.0;
pub const MATRIX_FADE_FILL: &str = "rgba(0, 0, 0, 0.18)";
pub const MATRIX_GLYPH_COLOR: &str = "#36fca1";
pub const MATRIX_RESET_CHANCE: f64 = 0.025;
pub const MATRIX_CLEAR_DELAY_MS: f64 = 250.0;
pub const MATRIX_DEFAULT_DURATION_MS: f64 = 1000.0;
pub const MATRIX_GLYPHS: &str =
    "アイウエオカキクケコｱｲｳｴｵｶｷｸｹｺ0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// Host element ids
pub const STARFIELD_CANVAS_ID: &str = "bgStars";
pub const MATRIX_CANVAS_ID: &str = "matrixRain";
