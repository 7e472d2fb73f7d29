//! TUI Application
//!
//! Binds the presentation state to the repeat engine: keys become engine
//! operations, timer firings become ticks, and the copy action goes to the
//! clipboard sink.

use super::input::{InputResult, TextInput};
use super::state::{AppState, Focus};
use crate::clipboard::{ClipboardSink, CopyOutcome, copy_output};
use crate::config::Config;
use crate::engine::{RepeatEngine, TickOutcome, Timer, TimerHandle};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, warn};
use std::time::Duration;

/// Lines moved per PageUp/PageDown.
const SCROLL_PAGE: usize = 5;

/// Main TUI application
pub struct App<T: Timer, C: ClipboardSink> {
    engine: RepeatEngine<T>,
    clipboard: C,
    state: AppState,
    status_timeout: Duration,
}

impl<T: Timer, C: ClipboardSink> App<T, C> {
    /// Create an application around an engine, seeding the fields from config
    pub fn new(mut engine: RepeatEngine<T>, clipboard: C, config: &Config) -> Self {
        engine.set_repeat_count(config.engine.default_repeat_count.clone());

        let state = AppState {
            text_input: TextInput::with_content(engine.text()).with_max_chars(config.input.max_text_len),
            count_input: TextInput::with_content(engine.repeat_count()),
            style: config.display.style,
            color: config.display.color,
            ..AppState::default()
        };

        Self {
            engine,
            clipboard,
            state,
            status_timeout: config.tui.status_timeout(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn engine(&self) -> &RepeatEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RepeatEngine<T> {
        &mut self.engine
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Handle a key press. Returns true if quit was requested.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Char('s') if ctrl => self.toggle(),
            KeyCode::Char('y') if ctrl => self.copy(),
            KeyCode::Tab => self.state.focus = self.state.focus.next(),
            KeyCode::BackTab => self.state.focus = self.state.focus.prev(),
            KeyCode::PageUp => self.state.scroll_up(SCROLL_PAGE, self.engine.output().len()),
            KeyCode::PageDown => self.state.scroll_down(SCROLL_PAGE),
            _ => self.handle_focused_key(&key),
        }

        self.state.should_quit
    }

    fn handle_focused_key(&mut self, key: &KeyEvent) {
        match self.state.focus {
            Focus::Text => match self.state.text_input.handle_key(key) {
                InputResult::Edited => {
                    let text = self.state.text_input.content().to_string();
                    self.engine.set_text(text);
                }
                InputResult::Moved => {}
                InputResult::Ignored => {
                    if key.code == KeyCode::Enter {
                        self.state.focus = Focus::Count;
                    }
                }
            },
            Focus::Count => match self.state.count_input.handle_key(key) {
                InputResult::Edited => {
                    let count = self.state.count_input.content().to_string();
                    self.engine.set_repeat_count(count);
                }
                InputResult::Moved => {}
                InputResult::Ignored => {
                    if key.code == KeyCode::Enter {
                        self.toggle();
                    }
                }
            },
            Focus::Style => match key.code {
                KeyCode::Left | KeyCode::Up => self.state.style = self.state.style.prev(),
                KeyCode::Right | KeyCode::Down | KeyCode::Enter | KeyCode::Char(' ') => {
                    self.state.style = self.state.style.next()
                }
                _ => {}
            },
            Focus::Color => match key.code {
                KeyCode::Left | KeyCode::Up => self.state.color = self.state.color.prev(),
                KeyCode::Right | KeyCode::Down | KeyCode::Enter | KeyCode::Char(' ') => {
                    self.state.color = self.state.color.next()
                }
                _ => {}
            },
            Focus::Toggle => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.toggle();
                }
            }
            Focus::Copy => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.copy();
                }
            }
        }
    }

    /// Start or stop, reporting why a start was refused.
    pub fn toggle(&mut self) {
        if !self.engine.is_running()
            && let Err(reason) = self.engine.validate()
        {
            debug!("Toggle refused: {}", reason);
            self.state.set_error(format!("Cannot start: {}", reason));
            return;
        }
        self.engine.toggle();
        self.state.output_scroll = 0;
    }

    /// Copy the output to the clipboard sink.
    pub fn copy(&mut self) {
        match copy_output(&self.engine, &mut self.clipboard) {
            Ok(CopyOutcome::Copied { .. }) => self.state.set_status("Copied to Clipboard!"),
            Ok(CopyOutcome::NothingToCopy) => {}
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.state.set_error(e.to_string());
            }
        }
    }

    /// Feed a timer firing into the engine.
    pub fn on_tick(&mut self, handle: TimerHandle) -> TickOutcome {
        let outcome = self.engine.on_tick(handle);
        if let TickOutcome::Completed { ticks } = outcome {
            self.state.set_status(format!("Done: {} lines", ticks));
        }
        outcome
    }

    /// Periodic housekeeping between events.
    pub fn on_idle(&mut self) {
        self.state.expire_status(self.status_timeout);
    }

    /// Request to quit
    pub fn quit(&mut self) {
        self.state.should_quit = true;
    }

    /// Stop any run; called when the screen goes away.
    pub fn shutdown(&mut self) {
        self.engine.stop();
    }
}
