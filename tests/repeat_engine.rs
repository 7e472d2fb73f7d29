//! Repeat engine integration tests
//!
//! Drives the engine on the virtual clock and checks the observable run
//! behaviour: counts, refusals, stopping, clearing, export and restarts.

use repeatr::clipboard::{CopyOutcome, MemoryClipboard, copy_output};
use repeatr::engine::{DEFAULT_TICK_PERIOD, ManualTimer, RepeatEngine, TickOutcome, Timer, TimerHandle};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Manual timer that also records every cancel into a shared log.
struct RecordingTimer {
    inner: ManualTimer,
    cancelled: Rc<RefCell<Vec<TimerHandle>>>,
}

impl Timer for RecordingTimer {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        self.inner.schedule_repeating(period)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.borrow_mut().push(handle);
        self.inner.cancel(handle);
    }
}

fn recording_engine(text: &str, count: &str) -> (RepeatEngine<RecordingTimer>, Rc<RefCell<Vec<TimerHandle>>>) {
    let cancelled = Rc::new(RefCell::new(Vec::new()));
    let timer = RecordingTimer {
        inner: ManualTimer::new(),
        cancelled: Rc::clone(&cancelled),
    };
    let mut engine = RepeatEngine::new(timer);
    engine.set_text(text);
    engine.set_repeat_count(count);
    (engine, cancelled)
}

fn engine_with(text: &str, count: &str) -> RepeatEngine<ManualTimer> {
    let mut engine = RepeatEngine::new(ManualTimer::new());
    engine.set_text(text);
    engine.set_repeat_count(count);
    engine
}

fn ticks(n: u32) -> Duration {
    DEFAULT_TICK_PERIOD * n
}

#[test]
fn test_n_ticks_produce_n_lines() {
    for n in [1u32, 2, 5, 17] {
        let mut engine = engine_with("line", &n.to_string());
        engine.start();

        engine.advance(ticks(n - 1));
        assert!(engine.is_running(), "still running before tick {n}");

        engine.advance(ticks(1));
        assert_eq!(engine.output().len(), n as usize);
        assert!(engine.output().iter().all(|line| line == "line"));
        assert!(!engine.is_running());
    }
}

#[test]
fn test_lines_use_text_from_start() {
    let mut engine = engine_with("before", "4");
    engine.start();
    engine.advance(ticks(2));
    engine.set_text("after");
    engine.advance(ticks(2));
    assert_eq!(engine.output(), ["before"; 4]);
}

#[test]
fn test_empty_text_refuses_start() {
    let mut engine = engine_with("", "3");
    engine.start();
    assert!(!engine.is_running());
    assert!(engine.output().is_empty());
    assert!(engine.advance(ticks(5)).is_empty());
}

#[test]
fn test_invalid_counts_refuse_start() {
    for count in ["0", "-3", "abc", "", "   "] {
        let mut engine = engine_with("text", count);
        engine.start();
        assert!(!engine.is_running(), "count {count:?}");
        assert_eq!(engine.timer().active(), 0);
    }
}

#[test]
fn test_stop_truncates_output() {
    let mut engine = engine_with("k", "8");
    engine.start();
    engine.advance(ticks(3));
    engine.stop();

    engine.advance(ticks(20));
    assert_eq!(engine.output().len(), 3);
    assert!(!engine.is_running());
}

#[test]
fn test_clearing_text_while_running() {
    let mut engine = engine_with("k", "8");
    engine.start();
    engine.advance(ticks(3));

    engine.set_text("");
    assert!(engine.output().is_empty());
    assert!(!engine.is_running());
    assert_eq!(engine.timer().active(), 0);
    assert!(engine.advance(ticks(20)).is_empty());
}

#[test]
fn test_export_joins_with_newlines() {
    let mut engine = engine_with("abc", "3");
    assert_eq!(engine.export_output(), "");

    engine.start();
    engine.advance(ticks(3));
    assert_eq!(engine.export_output(), "abc\nabc\nabc");
    assert_eq!(engine.output().len(), 3);
}

#[test]
fn test_repeated_stop_and_start() {
    let mut engine = engine_with("r", "4");
    engine.start();
    engine.advance(ticks(2));
    engine.stop();
    engine.stop();
    assert_eq!(engine.output().len(), 2);
    assert!(!engine.is_running());

    engine.start();
    engine.start();
    assert!(engine.output().is_empty());
    assert_eq!(engine.timer().active(), 1);
    engine.advance(ticks(4));
    assert_eq!(engine.output().len(), 4);
}

#[test]
fn test_second_run_cancels_first() {
    let mut engine = engine_with("first", "10");
    engine.start();
    engine.advance(Duration::from_millis(1250));
    assert_eq!(engine.output().len(), 2);

    engine.set_text("second");
    engine.set_repeat_count("2");
    engine.start();

    let outcomes = engine.advance(ticks(4));
    assert!(!outcomes.contains(&TickOutcome::Ignored));
    assert_eq!(engine.output(), ["second", "second"]);
}

#[test]
fn test_ticks_are_evenly_spaced() {
    let mut engine = engine_with("t", "3");
    engine.start();

    let mut seen_at = Vec::new();
    for _ in 0..30 {
        let before = engine.output().len();
        engine.advance(Duration::from_millis(100));
        if engine.output().len() > before {
            seen_at.push(engine.timer().now());
        }
    }
    assert_eq!(
        seen_at,
        vec![
            Duration::from_millis(500),
            Duration::from_millis(1000),
            Duration::from_millis(1500)
        ]
    );
}

#[test]
fn test_copy_after_run() {
    let mut engine = engine_with("copy me", "2");
    engine.start();
    engine.advance(ticks(2));

    let mut clipboard = MemoryClipboard::new();
    let outcome = copy_output(&engine, &mut clipboard).unwrap();
    assert_eq!(outcome, CopyOutcome::Copied { lines: 2 });
    assert_eq!(clipboard.contents(), Some("copy me\ncopy me"));
}

#[test]
fn test_drop_while_running_cancels_timer() {
    let (mut engine, cancelled) = recording_engine("d", "5");
    engine.start();
    let live = engine.timer().inner.active();
    assert_eq!(live, 1);
    assert!(cancelled.borrow().is_empty());

    drop(engine);
    assert_eq!(cancelled.borrow().len(), 1);
}

#[test]
fn test_drop_when_stopped_cancels_nothing() {
    let (mut engine, cancelled) = recording_engine("d", "1");
    engine.start();
    let fired = engine.timer_mut().inner.advance(ticks(1));
    engine.on_tick(fired[0]);
    assert!(!engine.is_running());
    assert_eq!(*cancelled.borrow(), vec![fired[0]]);

    drop(engine);
    assert_eq!(cancelled.borrow().len(), 1);
}
