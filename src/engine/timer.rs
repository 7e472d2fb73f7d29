//! Timer facility used by the repeat engine.
//!
//! The engine only needs two operations: schedule a repeating firing and
//! cancel it. Firings are reported back as [`TimerHandle`]s so the engine can
//! tell a live run's tick apart from one belonging to a cancelled run.
//!
//! - `TokioTimer`: real wall-clock timer backed by tokio tasks
//! - `ManualTimer`: virtual clock advanced explicitly, for tests

use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Identifies one scheduled repeating timer. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw id of the handle.
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Schedule/cancel contract for repeating timers.
pub trait Timer {
    /// Start a timer firing every `period`, first firing one period from now.
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle;

    /// Cancel a timer. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Repeating timers driven by the tokio runtime.
///
/// Each schedule spawns a task around `tokio::time::interval` that sends its
/// handle down a shared channel on every firing; [`TokioTimer::recv`] yields
/// them. Scheduling must happen inside a tokio runtime.
#[derive(Debug)]
pub struct TokioTimer {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    tx: mpsc::UnboundedSender<TimerHandle>,
    rx: mpsc::UnboundedReceiver<TimerHandle>,
}

impl TokioTimer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            next_id: 0,
            tasks: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Wait for the next firing of any timer scheduled here.
    ///
    /// Handles of timers cancelled after they fired may still be delivered;
    /// callers compare against the handle they hold.
    pub async fn recv(&mut self) -> Option<TimerHandle> {
        self.rx.recv().await
    }

    /// Number of timers currently scheduled.
    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Default for TokioTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for TokioTimer {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let tx = self.tx.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(handle).is_err() {
                    break;
                }
            }
        });

        debug!("Scheduled {} every {:?}", handle, period);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Cancelled {}", handle);
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    period: Duration,
    next_due: Duration,
}

/// Virtual clock implementing [`Timer`] without real delays.
///
/// Time only moves when [`advance`](Self::advance) or
/// [`fire_next`](Self::fire_next) is called.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    next_id: u64,
    scheduled: BTreeMap<TimerHandle, Scheduled>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers currently scheduled.
    pub fn active(&self) -> usize {
        self.scheduled.len()
    }

    /// Fire the earliest timer due at or before `until`, moving the clock to
    /// its due time. Ties fire in scheduling order.
    pub fn fire_next(&mut self, until: Duration) -> Option<TimerHandle> {
        let (handle, due) = self
            .scheduled
            .iter()
            .filter(|(_, s)| s.next_due <= until)
            .min_by_key(|(handle, s)| (s.next_due, **handle))
            .map(|(handle, s)| (*handle, s.next_due))?;

        self.now = due;
        if let Some(s) = self.scheduled.get_mut(&handle) {
            s.next_due += s.period;
        }
        trace!("Fired {} at {:?}", handle, due);
        Some(handle)
    }

    /// Move the clock to `until` without firing anything.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance the clock by `by`, returning every firing in order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        let until = self.now + by;
        let mut fired = Vec::new();
        while let Some(handle) = self.fire_next(until) {
            fired.push(handle);
        }
        self.settle(until);
        fired
    }
}

impl Timer for ManualTimer {
    fn schedule_repeating(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.scheduled.insert(
            handle,
            Scheduled {
                period,
                next_due: self.now + period,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.scheduled.remove(&handle);
    }
}
