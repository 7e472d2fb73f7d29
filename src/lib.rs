//! Repeatr - a text repeater
//!
//! Type some text and a count, press start, and the text is appended to a
//! list once per interval until the count is reached. The core is
//! [`engine::RepeatEngine`], a small state machine over an injected timer;
//! the TUI and the headless runner are two front-ends for it.

pub mod clipboard;
pub mod config;
pub mod engine;
pub mod error;
pub mod headless;
pub mod style;
pub mod tui;

pub use error::{RepeatrError, Result};
