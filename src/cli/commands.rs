//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - (none): launch the TUI
//! - run: repeat text on stdout without the TUI

use clap::{Parser, Subcommand};
use repeatr::style::{FontStyle, TextColor};
use std::path::PathBuf;

/// Repeatr - append text to a list once per interval until a count is reached
#[derive(Parser, Debug)]
#[command(name = "repeatr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Repeat text on stdout, one line per interval
    Run {
        /// Text to repeat
        text: String,

        /// Number of repetitions (defaults to the configured count)
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        count: Option<String>,

        /// Milliseconds between lines (defaults to the configured period)
        #[arg(short, long)]
        period_ms: Option<u64>,

        /// Font style of each line
        #[arg(short, long, value_enum)]
        style: Option<FontStyle>,

        /// Colour of each line
        #[arg(long, value_enum)]
        color: Option<TextColor>,

        /// Print lines without styling
        #[arg(long)]
        plain: bool,

        /// Copy the joined output to the clipboard when done
        #[arg(long)]
        copy: bool,
    },
}
