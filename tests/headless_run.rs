//! Headless run integration tests on tokio's paused clock.

use repeatr::engine::{RepeatEngine, TokioTimer};
use repeatr::headless::{LineFormat, run_to_completion};
use std::time::Duration;
use tokio::time::Instant;

fn plain() -> LineFormat {
    LineFormat {
        plain: true,
        ..LineFormat::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_headless_run_timing() {
    let mut engine = RepeatEngine::new(TokioTimer::new());
    engine.set_text("tick");
    engine.set_repeat_count("4");
    engine.start();

    let started = Instant::now();
    let mut out = Vec::new();
    let written = run_to_completion(&mut engine, &mut out, plain()).await.unwrap();

    assert_eq!(written, 4);
    assert_eq!(started.elapsed(), Duration::from_millis(2000));
    assert_eq!(engine.export_output(), "tick\ntick\ntick\ntick");
    assert_eq!(String::from_utf8(out).unwrap(), "tick\ntick\ntick\ntick\n");
}

#[tokio::test(start_paused = true)]
async fn test_headless_restart_ignores_old_timer() {
    let mut engine = RepeatEngine::with_period(TokioTimer::new(), Duration::from_millis(200));
    engine.set_text("old");
    engine.set_repeat_count("10");
    engine.start();

    let first = engine.timer_mut().recv().await.unwrap();
    engine.on_tick(first);
    assert_eq!(engine.output(), ["old"]);

    engine.set_text("new");
    engine.set_repeat_count("3");
    engine.start();
    assert_eq!(engine.timer().active(), 1);

    let mut out = Vec::new();
    run_to_completion(&mut engine, &mut out, plain()).await.unwrap();
    assert_eq!(engine.output(), ["new", "new", "new"]);
    assert_eq!(engine.timer().active(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_headless_refused_start_writes_nothing() {
    let mut engine = RepeatEngine::new(TokioTimer::new());
    engine.set_text("x");
    engine.set_repeat_count("-1");
    engine.start();

    let mut out = Vec::new();
    assert_eq!(run_to_completion(&mut engine, &mut out, plain()).await.unwrap(), 0);
    assert!(out.is_empty());
}
