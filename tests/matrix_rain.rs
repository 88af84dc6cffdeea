// Native integration tests for the matrix-rain overlay.

use portfolio_starfield::frame::drive;
use portfolio_starfield::rng::{SmallRng, seeded};
use portfolio_starfield::{
    DrawCommand, LoopHandle, MatrixConfig, MatrixRain, RainStatus, RecordingSurface, Viewport,
};

fn start(w: f64, seed: u64, now: f64) -> MatrixRain<RecordingSurface, SmallRng> {
    MatrixRain::start(
        Some(RecordingSurface::new()),
        Viewport::new(w, 480.0, 2.0),
        now,
        1000.0,
        seeded(seed),
        MatrixConfig::default(),
    )
    .expect("surface present")
}

#[test]
fn sized_like_the_starfield_and_opaque_at_once() {
    let s = start(640.0, 1, 0.0);
    assert_eq!(
        s.surface().commands(),
        &[
            DrawCommand::Resize {
                width: 1280,
                height: 960,
                dpr: 2.0
            },
            DrawCommand::Opacity(1.0),
        ]
    );
    assert_eq!(s.columns(), 40);
    assert!(s.drops().iter().all(|d| *d == 0));
}

#[test]
fn opacity_drops_to_zero_only_at_or_after_duration() {
    let mut s = start(320.0, 2, 500.0);
    let handle = LoopHandle::new();
    // 50 fps for two seconds, starting at the session start time
    let frames = drive(&mut s, &handle, (0..100).map(|i| 500.0 + i as f64 * 20.0));
    assert!(!handle.is_running());

    let cmds = s.surface().commands();
    let zero_at = cmds
        .iter()
        .position(|c| *c == DrawCommand::Opacity(0.0))
        .expect("faded out");
    // frames at elapsed 0..=980ms rain; the frame at exactly 1000ms still
    // draws, then fades
    let fills_before = cmds[..zero_at]
        .iter()
        .filter(|c| **c == DrawCommand::FillAll)
        .count();
    assert_eq!(fills_before, 51);
    // clear lands on the first frame 250ms after the fade (elapsed 1260ms)
    assert_eq!(frames, 64);
    assert_eq!(cmds.last(), Some(&DrawCommand::Clear));
    assert!(!s.is_running());
}

#[test]
fn running_flag_flips_exactly_once() {
    let mut s = start(160.0, 3, 0.0);
    let mut flips = 0;
    let mut was = s.is_running();
    for i in 0..200 {
        s.frame(i as f64 * 10.0);
        if was != s.is_running() {
            flips += 1;
            assert!(was, "flag went back to true");
        }
        was = s.is_running();
    }
    assert_eq!(flips, 1);
    assert_eq!(s.frame(99_999.0), RainStatus::Done);
}

#[test]
fn concurrent_sessions_keep_separate_columns() {
    let mut a = start(320.0, 10, 0.0);
    let mut b = start(160.0, 11, 0.0);
    assert_eq!(a.columns(), 20);
    assert_eq!(b.columns(), 10);

    // interleave frames; b starts late so its drops lag a's
    for i in 0..30 {
        a.frame(i as f64 * 16.0);
        if i >= 10 {
            b.frame(i as f64 * 16.0);
        }
    }
    assert!(a.drops().iter().all(|d| *d == 30));
    assert!(b.drops().iter().all(|d| *d == 20));

    let glyphs = |s: &MatrixRain<RecordingSurface, SmallRng>| {
        s.surface()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glyph { .. }))
            .count()
    };
    assert_eq!(glyphs(&a), 30 * 20);
    assert_eq!(glyphs(&b), 20 * 10);
}

#[test]
fn glyphs_come_from_the_configured_set() {
    let cfg = MatrixConfig {
        glyphs: "01".into(),
        ..MatrixConfig::default()
    };
    let mut s = MatrixRain::start(
        Some(RecordingSurface::new()),
        Viewport::new(96.0, 96.0, 1.0),
        0.0,
        1000.0,
        seeded(4),
        cfg,
    )
    .unwrap();
    for i in 0..20 {
        s.frame(i as f64);
    }
    for c in s.surface().commands() {
        if let DrawCommand::Glyph { glyph, .. } = c {
            assert!(glyph == "0" || glyph == "1", "unexpected glyph {glyph}");
        }
    }
}
