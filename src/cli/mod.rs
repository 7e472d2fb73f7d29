//! CLI module for repeatr - command-line interface and subcommands.
//!
//! Without a subcommand the TUI is launched; `run` repeats text headlessly.

pub mod commands;

pub use commands::Cli;
