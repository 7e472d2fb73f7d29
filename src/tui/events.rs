//! Event handling for the TUI.
//!
//! This module provides:
//! - `Event`: The unified event type (keyboard, resize, timer firing, tick)
//! - `EventHandler`: merges the terminal event stream with the engine's
//!   timer firings and a housekeeping tick

use crate::engine::{TimerHandle, TokioTimer};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use eyre::{Result, eyre};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Unified event type for the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// A repeat timer fired
    Timer(TimerHandle),
    /// Periodic housekeeping tick
    Tick,
}

/// Handles keyboard, timer and tick events.
pub struct EventHandler {
    stream: EventStream,
    tick: Interval,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            stream: EventStream::new(),
            tick,
        }
    }

    /// Get the next event.
    ///
    /// Key releases and other terminal events (mouse, focus, paste) are
    /// skipped.
    pub async fn next(&mut self, timer: &mut TokioTimer) -> Result<Event> {
        loop {
            tokio::select! {
                event = self.stream.next() => match event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Ok(Event::Key(key));
                    }
                    Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(eyre!("Error reading terminal event: {}", e)),
                    None => return Err(eyre!("Terminal event stream closed")),
                },
                Some(handle) = timer.recv() => return Ok(Event::Timer(handle)),
                _ = self.tick.tick() => return Ok(Event::Tick),
            }
        }
    }
}
