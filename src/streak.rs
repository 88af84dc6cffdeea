//! Shooting-star streaks.
//!
//! A streak is a plain value: spawn it, call [`Streak::step`] once per frame,
//! and draw whatever geometry it returns. It runs out after a fixed number of
//! steps no matter how far it has travelled.

use crate::constants::*;
use crate::rng::RandomSource;
use crate::surface::Surface;
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct Streak {
    pub origin: (f64, f64),
    /// px/s; always leftward and downward.
    pub velocity: (f64, f64),
    pub trail_len: f64,
    /// Seconds since spawn.
    pub life: f64,
    pub steps_taken: u32,
    pub budget: u32,
}

/// Geometry for one drawn step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreakFrame {
    pub head: (f64, f64),
    /// Far end of the stroked line: `trail_len * p` left of the head and half
    /// that upward, `p` growing from 0 to 1 with age.
    pub tail: (f64, f64),
    /// Where the gradient reaches full transparency. Fixed relative to the
    /// head, so a young streak is drawn in its brightest part only.
    pub fade_to: (f64, f64),
}

impl Streak {
    pub fn new(origin: (f64, f64), velocity: (f64, f64), trail_len: f64, budget: u32) -> Self {
        Self {
            origin,
            velocity,
            trail_len,
            life: 0.0,
            steps_taken: 0,
            budget,
        }
    }

    /// Random streak starting in the upper band of the viewport.
    pub fn spawn<R: RandomSource + ?Sized>(viewport: &Viewport, rng: &mut R, budget: u32) -> Self {
        let origin = (
            rng.next_f64() * viewport.width,
            rng.next_f64() * viewport.height * STREAK_ORIGIN_BAND,
        );
        let velocity = (
            rng.range(STREAK_VX.0, STREAK_VX.1),
            rng.range(STREAK_VY.0, STREAK_VY.1),
        );
        let trail_len = rng.range(STREAK_LEN.0, STREAK_LEN.1);
        Self::new(origin, velocity, trail_len, budget)
    }

    pub fn is_done(&self) -> bool {
        self.steps_taken >= self.budget
    }

    /// Advance by `dt` seconds and return what to draw, or `None` once the
    /// step budget is spent.
    pub fn step(&mut self, dt: f64) -> Option<StreakFrame> {
        if self.is_done() {
            return None;
        }
        self.life += dt.max(0.0);
        self.steps_taken += 1;

        let head = (
            self.origin.0 + self.velocity.0 * self.life,
            self.origin.1 + self.velocity.1 * self.life,
        );
        let len = self.trail_len;
        let p = (self.life * STREAK_GROWTH).min(1.0);
        let tail = (head.0 - len * p, head.1 - len * p * STREAK_SLOPE);
        let fade_to = (
            head.0 - len * STREAK_FADE_SPAN,
            head.1 - len * STREAK_FADE_SPAN * STREAK_SLOPE,
        );
        Some(StreakFrame {
            head,
            tail,
            fade_to,
        })
    }

    /// Step and draw in one go. Returns false once the streak is spent.
    pub fn step_and_draw<S: Surface + ?Sized>(&mut self, dt: f64, surface: &mut S) -> bool {
        match self.step(dt) {
            Some(f) => {
                surface.stroke_streak(f.head, f.tail, f.fade_to, STREAK_WIDTH);
                true
            }
            None => false,
        }
    }
}
