//! Clipboard sinks.
//!
//! The engine only exports a string; placing it somewhere is the sink's job.
//! `Osc52Clipboard` asks the terminal to set the system clipboard with an
//! OSC 52 escape sequence, which works over SSH and inside the TUI's
//! alternate screen.

use crate::engine::{RepeatEngine, Timer};
use crate::error::{RepeatrError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::{debug, info};
use std::io::{self, Stderr, Stdout, Write};

/// Receives text destined for the system clipboard.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Result of a copy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { lines: usize },
    NothingToCopy,
}

/// Copy the engine's output to `sink`. Empty output is not copied.
pub fn copy_output<T, C>(engine: &RepeatEngine<T>, sink: &mut C) -> Result<CopyOutcome>
where
    T: Timer,
    C: ClipboardSink + ?Sized,
{
    let lines = engine.output().len();
    if lines == 0 {
        debug!("Nothing to copy");
        return Ok(CopyOutcome::NothingToCopy);
    }
    sink.set_text(&engine.export_output())?;
    info!("Copied {} lines to clipboard", lines);
    Ok(CopyOutcome::Copied { lines })
}

/// Writes OSC 52 clipboard sequences to a terminal.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    writer: W,
    max_payload: usize,
}

impl Osc52Clipboard<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Osc52Clipboard<Stderr> {
    /// For headless runs, where stdout carries the output lines.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    /// Common terminal limit on the base64 payload of one sequence.
    pub const DEFAULT_MAX_PAYLOAD: usize = 74_994;

    pub fn new(writer: W) -> Self {
        Self {
            writer,
            max_payload: Self::DEFAULT_MAX_PAYLOAD,
        }
    }

    pub fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn sequence(&self, text: &str) -> Result<String> {
        let encoded = STANDARD.encode(text.as_bytes());
        if encoded.len() > self.max_payload {
            return Err(RepeatrError::Clipboard(format!(
                "payload of {} bytes exceeds OSC 52 limit of {}",
                encoded.len(),
                self.max_payload
            )));
        }
        Ok(format!("\x1b]52;c;{encoded}\x07"))
    }
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let sequence = self.sequence(text)?;
        self.writer.write_all(sequence.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory sink; keeps the last value written.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}
