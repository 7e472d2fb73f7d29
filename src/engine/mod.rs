//! Repeat engine - the text/count/output state machine.
//!
//! Two states: stopped (initial) and running. A run starts when the text is
//! non-empty and the raw count parses as a positive number; each timer tick
//! then appends the text captured at start until the count is reached.
//!
//! ```text
//! STOPPED --start()--> RUNNING --tick (append)--> RUNNING
//!    ^                    |
//!    +-- stop() / last tick / set_text(blank) --+
//! ```
//!
//! The engine never reports errors: invalid input makes `start()` a no-op.
//! Inspect [`RepeatEngine::is_running`] or call [`RepeatEngine::validate`]
//! to find out why.

pub mod count;
pub mod timer;

pub use count::{CountRejection, RepeatCount};
pub use timer::{ManualTimer, Timer, TimerHandle, TokioTimer};

use log::{debug, info, trace};
use std::time::Duration;
use thiserror::Error;

/// Interval between ticks of a run.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(500);

/// Raw count entry on a fresh engine.
pub const DEFAULT_REPEAT_COUNT: &str = "1";

/// Whether a run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Stopped,
    Running,
}

/// Why `start()` declined to begin a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartRejection {
    #[error("text is empty")]
    EmptyText,

    #[error(transparent)]
    InvalidCount(#[from] CountRejection),
}

/// What a single timer firing did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Appended a line, more ticks to come
    Appended { ticks: u32, target: u32 },
    /// Appended the final line and stopped the run
    Completed { ticks: u32 },
    /// The count was already reached; stopped without appending
    Exhausted,
    /// Firing from a cancelled or superseded timer
    Ignored,
}

/// State captured when a run starts.
#[derive(Debug)]
struct ActiveRun {
    handle: TimerHandle,
    text: String,
    target: RepeatCount,
    ticks: u32,
}

/// Owns the text, the raw repeat count, the output lines and the live timer.
///
/// `is_running()` is true exactly while a timer handle is held, and at most
/// one handle is held at a time.
#[derive(Debug)]
pub struct RepeatEngine<T: Timer> {
    timer: T,
    period: Duration,
    text: String,
    repeat_count: String,
    output: Vec<String>,
    run: Option<ActiveRun>,
}

impl<T: Timer> RepeatEngine<T> {
    /// Create an engine ticking every [`DEFAULT_TICK_PERIOD`].
    pub fn new(timer: T) -> Self {
        Self::with_period(timer, DEFAULT_TICK_PERIOD)
    }

    /// Create an engine with a custom tick period (at least 1ms).
    pub fn with_period(timer: T, period: Duration) -> Self {
        Self {
            timer,
            period: period.max(Duration::from_millis(1)),
            text: String::new(),
            repeat_count: DEFAULT_REPEAT_COUNT.to_string(),
            output: Vec::new(),
            run: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The raw count entry, as typed.
    pub fn repeat_count(&self) -> &str {
        &self.repeat_count
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn status(&self) -> RunStatus {
        if self.is_running() {
            RunStatus::Running
        } else {
            RunStatus::Stopped
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Ticks fired by the current run, `None` when stopped.
    pub fn ticks_fired(&self) -> Option<u32> {
        self.run.as_ref().map(|run| run.ticks)
    }

    /// Target count of the current run, `None` when stopped.
    pub fn target(&self) -> Option<RepeatCount> {
        self.run.as_ref().map(|run| run.target)
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Replace the text. A blank (whitespace-only) value also clears the
    /// output and stops any run in progress.
    pub fn set_text(&mut self, input: impl Into<String>) {
        self.text = input.into();
        if self.text.trim().is_empty() {
            self.output.clear();
            self.stop();
        }
    }

    /// Replace the raw count entry verbatim. Parsed only by `start()`.
    pub fn set_repeat_count(&mut self, input: impl Into<String>) {
        self.repeat_count = input.into();
    }

    /// Check the start preconditions without changing anything.
    ///
    /// Whitespace-only text passes; only the empty string is refused.
    pub fn validate(&self) -> Result<RepeatCount, StartRejection> {
        if self.text.is_empty() {
            return Err(StartRejection::EmptyText);
        }
        Ok(RepeatCount::parse(&self.repeat_count)?)
    }

    /// Begin a new run, replacing any run in progress. No-op on invalid input.
    pub fn start(&mut self) {
        let target = match self.validate() {
            Ok(target) => target,
            Err(reason) => {
                debug!("Start declined: {}", reason);
                return;
            }
        };

        self.stop();
        self.output.clear();

        let handle = self.timer.schedule_repeating(self.period);
        info!("Started run on {}: {} x {:?}", handle, target, self.text);
        self.run = Some(ActiveRun {
            handle,
            text: self.text.clone(),
            target,
            ticks: 0,
        });
    }

    /// Cancel the live timer, if any. Idempotent.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            self.timer.cancel(run.handle);
            info!("Stopped run on {} after {}/{} ticks", run.handle, run.ticks, run.target);
        }
    }

    /// Stop when running, start otherwise.
    pub fn toggle(&mut self) {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// The output lines joined with `\n`; empty when there is no output.
    pub fn export_output(&self) -> String {
        self.output.join("\n")
    }

    /// Handle one timer firing.
    pub fn on_tick(&mut self, handle: TimerHandle) -> TickOutcome {
        let run = match self.run.as_mut() {
            Some(run) if run.handle == handle => run,
            _ => {
                trace!("Ignoring tick from {}", handle);
                return TickOutcome::Ignored;
            }
        };

        if run.ticks >= run.target.get() {
            self.stop();
            return TickOutcome::Exhausted;
        }

        self.output.push(run.text.clone());
        run.ticks += 1;

        let (ticks, target) = (run.ticks, run.target.get());
        if ticks >= target {
            self.stop();
            TickOutcome::Completed { ticks }
        } else {
            TickOutcome::Appended { ticks, target }
        }
    }
}

impl RepeatEngine<ManualTimer> {
    /// Advance the virtual clock, feeding each firing through `on_tick` as it
    /// happens so cancellations take effect between firings.
    pub fn advance(&mut self, by: Duration) -> Vec<TickOutcome> {
        let until = self.timer.now() + by;
        let mut outcomes = Vec::new();
        while let Some(handle) = self.timer.fire_next(until) {
            outcomes.push(self.on_tick(handle));
        }
        self.timer.settle(until);
        outcomes
    }
}

impl<T: Timer> Drop for RepeatEngine<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
