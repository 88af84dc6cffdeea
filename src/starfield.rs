//! Star layers: generation, twinkle and parallax wrap.

use std::f64::consts::TAU;

use crate::config::{FieldConfig, LayerSpec};
use crate::constants::{ALPHA_FLOOR, ALPHA_RANGE};
use crate::rng::RandomSource;
use crate::viewport::Viewport;

/// A background star. Position and radius are in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Offset into the shared twinkle oscillation, in `[0, 1)`.
    pub phase: f64,
}

/// One depth tier of stars sharing parallax and color.
#[derive(Clone, Debug)]
pub struct Layer {
    pub spec: LayerSpec,
    pub stars: Vec<Star>,
}

/// `max(minimum, floor(area / density))`.
pub fn star_count(spec: &LayerSpec, viewport: &Viewport) -> usize {
    let by_area = if spec.density > 0.0 {
        (viewport.area() / spec.density).floor() as usize
    } else {
        0
    };
    by_area.max(spec.minimum)
}

/// Builds every layer from scratch for the given viewport. Nothing from a
/// previous generation survives.
pub fn regenerate_layers<R: RandomSource + ?Sized>(
    config: &FieldConfig,
    viewport: &Viewport,
    rng: &mut R,
) -> Vec<Layer> {
    config
        .layers
        .iter()
        .map(|spec| {
            let n = star_count(spec, viewport);
            let stars = (0..n)
                .map(|_| Star {
                    x: rng.next_f64() * viewport.width,
                    y: rng.next_f64() * viewport.height,
                    radius: spec.radius_min + rng.next_f64() * spec.radius_span,
                    phase: rng.next_f64(),
                })
                .collect();
            Layer {
                spec: spec.clone(),
                stars,
            }
        })
        .collect()
}

/// Brightness in `[0, 1]`.
pub fn twinkle(time: f64, speed: f64, phase: f64) -> f64 {
    0.5 + 0.5 * (time * speed + phase * TAU).sin()
}

/// Draw alpha for a star: `0.2 + 0.8 * twinkle`, always in `[0.2, 1.0]`.
pub fn star_alpha(time: f64, speed: f64, phase: f64) -> f64 {
    (ALPHA_FLOOR + ALPHA_RANGE * twinkle(time, speed, phase)).clamp(ALPHA_FLOOR, 1.0)
}

/// Vertical draw position after parallax, wrapped into `[0, height + margin)`.
pub fn wrapped_y(y: f64, scroll_y: f64, parallax: f64, height: f64, margin: f64) -> f64 {
    let period = height + margin;
    if period <= 0.0 {
        return y;
    }
    (y + scroll_y * parallax).rem_euclid(period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    fn counts(w: f64, h: f64) -> Vec<usize> {
        let cfg = FieldConfig::default();
        let v = Viewport::new(w, h, 1.0);
        cfg.layers.iter().map(|s| star_count(s, &v)).collect()
    }

    #[test]
    fn full_hd_counts() {
        assert_eq!(counts(1920.0, 1080.0), vec![230, 148, 94]);
    }

    #[test]
    fn tiny_viewport_falls_back_to_minimums() {
        assert_eq!(counts(100.0, 100.0), vec![80, 50, 30]);
        assert_eq!(counts(0.0, 0.0), vec![80, 50, 30]);
    }

    #[test]
    fn counts_follow_formula_across_sizes() {
        let cfg = FieldConfig::default();
        for &(w, h) in &[(320.0, 568.0), (768.0, 1024.0), (2560.0, 1440.0), (3840.0, 2160.0)] {
            let v = Viewport::new(w, h, 1.0);
            for spec in &cfg.layers {
                let expected = ((w * h / spec.density).floor() as usize).max(spec.minimum);
                assert_eq!(star_count(spec, &v), expected);
                assert!(star_count(spec, &v) >= spec.minimum);
            }
        }
    }

    #[test]
    fn generated_stars_lie_inside_viewport_with_layer_radius() {
        let cfg = FieldConfig::default();
        let v = Viewport::new(640.0, 480.0, 2.0);
        let mut rng = seeded(11);
        let layers = regenerate_layers(&cfg, &v, &mut rng);
        assert_eq!(layers.len(), 3);
        for layer in &layers {
            assert_eq!(layer.stars.len(), star_count(&layer.spec, &v));
            for s in &layer.stars {
                assert!((0.0..640.0).contains(&s.x));
                assert!((0.0..480.0).contains(&s.y));
                assert!((0.0..1.0).contains(&s.phase));
                let lo = layer.spec.radius_min;
                assert!(s.radius >= lo && s.radius < lo + layer.spec.radius_span);
            }
        }
    }

    #[test]
    fn alpha_bounds_hold_over_time_and_phase() {
        let mut t = 0.0;
        while t < 20.0 {
            for i in 0..=20 {
                let phase = i as f64 / 20.0;
                for speed in [1.5, 2.0, 2.5] {
                    let a = star_alpha(t, speed, phase);
                    assert!((0.2..=1.0).contains(&a), "alpha {a} at t={t}");
                }
            }
            t += 0.037;
        }
    }

    #[test]
    fn wrap_is_periodic_and_non_negative() {
        let y = wrapped_y(100.0, 0.0, 0.3, 500.0, 5.0);
        assert_eq!(y, 100.0);
        // 100 + 2000*0.3 = 700 -> 700 - 505 = 195
        assert!((wrapped_y(100.0, 2000.0, 0.3, 500.0, 5.0) - 195.0).abs() < 1e-9);
        assert!(wrapped_y(10.0, -1000.0, 0.45, 500.0, 5.0) >= 0.0);
    }

    #[test]
    fn shallow_layers_shift_less() {
        let back = wrapped_y(0.0, 100.0, 0.15, 10_000.0, 5.0);
        let front = wrapped_y(0.0, 100.0, 0.45, 10_000.0, 5.0);
        assert!(back < front);
    }
}
