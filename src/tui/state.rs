//! Presentation state for the TUI.
//!
//! - `AppState`: focus, input buffers, picker selections, status line
//! - `Focus`: which control receives keys

use super::input::TextInput;
use crate::style::{FontStyle, TextColor};
use std::time::{Duration, Instant};

/// Which control currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Text,
    Count,
    Style,
    Color,
    Toggle,
    Copy,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Text,
        Focus::Count,
        Focus::Style,
        Focus::Color,
        Focus::Toggle,
        Focus::Copy,
    ];

    /// Cycle to the next control.
    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    /// Cycle to the previous control.
    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// A transient message under the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub shown_at: Instant,
}

/// All mutable presentation state. Engine data lives in the engine.
#[derive(Debug, Default)]
pub struct AppState {
    /// Focused control
    pub focus: Focus,
    /// Text field buffer
    pub text_input: TextInput,
    /// Count field buffer
    pub count_input: TextInput,
    /// Selected font style
    pub style: FontStyle,
    /// Selected colour
    pub color: TextColor,
    /// Lines scrolled back from the bottom of the output list
    pub output_scroll: usize,
    /// Status line
    pub status: Option<StatusMessage>,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    /// Drop the status message once it has been shown for `timeout`.
    pub fn expire_status(&mut self, timeout: Duration) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.shown_at.elapsed() >= timeout)
        {
            self.status = None;
        }
    }

    pub fn scroll_up(&mut self, lines: usize, total: usize) {
        self.output_scroll = (self.output_scroll + lines).min(total.saturating_sub(1));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Text.next(), Focus::Count);
        assert_eq!(Focus::Copy.next(), Focus::Text);
        assert_eq!(Focus::Text.prev(), Focus::Copy);
        assert_eq!(Focus::Style.prev(), Focus::Count);
    }

    #[test]
    fn test_app_state_default() {
        let state = AppState::new();
        assert_eq!(state.focus, Focus::Text);
        assert_eq!(state.style, FontStyle::Normal);
        assert_eq!(state.color, TextColor::Black);
        assert!(state.status.is_none());
        assert!(!state.should_quit);
    }

    #[test]
    fn test_status_expiry() {
        let mut state = AppState::new();
        state.set_status("Copied to Clipboard!");
        state.expire_status(Duration::from_secs(60));
        assert!(state.status.is_some());

        state.expire_status(Duration::ZERO);
        assert!(state.status.is_none());
    }

    #[test]
    fn test_error_status() {
        let mut state = AppState::new();
        state.set_error("clipboard unavailable");
        assert!(state.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_scroll_bounds() {
        let mut state = AppState::new();
        state.scroll_up(10, 4);
        assert_eq!(state.output_scroll, 3);
        state.scroll_down(2);
        assert_eq!(state.output_scroll, 1);
        state.scroll_down(5);
        assert_eq!(state.output_scroll, 0);
    }
}
