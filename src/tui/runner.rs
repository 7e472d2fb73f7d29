//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app, and event handler. It runs the
//! main loop: render → wait for key/timer/tick → apply → repeat.

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views::render;
use crate::clipboard::ClipboardSink;
use crate::engine::TokioTimer;
use eyre::Result;
use log::{debug, info};
use std::time::Duration;

/// Main TUI runner that owns the event loop.
pub struct TuiRunner<C: ClipboardSink> {
    /// The terminal instance
    terminal: Tui,
    /// Engine, presentation state and clipboard
    app: App<TokioTimer, C>,
    /// Merged key, timer and tick events
    event_handler: EventHandler,
}

impl<C: ClipboardSink> TuiRunner<C> {
    /// Create a new TUI runner. Must be called inside a tokio runtime.
    pub fn new(terminal: Tui, app: App<TokioTimer, C>, tick_rate: Duration) -> Self {
        Self {
            terminal,
            app,
            event_handler: EventHandler::new(tick_rate),
        }
    }

    /// Run the main TUI loop until quit, then stop any run in progress.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop");
        let result = self.event_loop().await;
        self.app.shutdown();
        info!("TUI main loop ended");
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        loop {
            self.terminal.draw(|f| render(f, &self.app))?;

            let event = self.event_handler.next(self.app.engine_mut().timer_mut()).await?;
            match event {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Timer(handle) => {
                    let outcome = self.app.on_tick(handle);
                    debug!("Tick {}: {:?}", handle, outcome);
                }
                Event::Tick => self.app.on_idle(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize on next draw
                }
            }
        }
        Ok(())
    }
}
