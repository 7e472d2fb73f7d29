//! Terminal User Interface for Repeatr.
//!
//! A single screen: text and count fields, style and colour pickers, a
//! start/stop button, the growing output list and a copy button. The screen
//! forwards edits and presses to the repeat engine and renders its state.

mod app;
mod events;
mod input;
mod runner;
mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use input::{InputResult, TextInput};
pub use runner::TuiRunner;
pub use state::{AppState, Focus, StatusMessage};
pub use views::render;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Screen colours.
pub mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(128, 0, 128); // Purple
    pub const BUTTON: Color = Color::Rgb(128, 0, 128); // Purple
    pub const STOP: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const FOCUS: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const OUTPUT_BG: Color = Color::Rgb(230, 231, 232); // Light grey
    pub const OK: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const DIM: Color = Color::DarkGray;
}
