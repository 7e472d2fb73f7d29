use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use repeatr::clipboard::{CopyOutcome, Osc52Clipboard, copy_output};
use repeatr::config::{Config, ConfigSource};
use repeatr::engine::{RepeatEngine, TokioTimer};
use repeatr::headless::{LineFormat, run_to_completion};
use repeatr::tui::{self, App, TuiRunner};

fn setup_logging(config: &Config, verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("repeatr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("repeatr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = if verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    match &cli.command {
        None => run_tui(config).await,
        Some(Commands::Run {
            text,
            count,
            period_ms,
            style,
            color,
            plain,
            copy,
        }) => {
            let format = LineFormat {
                style: style.unwrap_or(config.display.style),
                color: color.unwrap_or(config.display.color),
                plain: *plain,
            };
            let period = period_ms.map(Duration::from_millis).unwrap_or(config.engine.tick_period());
            let count = count.clone().unwrap_or_else(|| config.engine.default_repeat_count.clone());
            handle_run_command(text, &count, period, format, *copy, cli.is_verbose()).await
        }
    }
}

async fn run_tui(config: &Config) -> Result<()> {
    info!("Launching TUI mode");

    let engine = RepeatEngine::with_period(TokioTimer::new(), config.engine.tick_period());
    let app = App::new(engine, Osc52Clipboard::stdout(), config);

    let terminal = tui::init_terminal().context("Failed to initialize terminal")?;
    let mut runner = TuiRunner::new(terminal, app, config.tui.tick_rate());
    let result = runner.run().await;
    tui::restore_terminal().context("Failed to restore terminal")?;
    result
}

async fn handle_run_command(
    text: &str,
    count: &str,
    period: Duration,
    format: LineFormat,
    copy: bool,
    verbose: bool,
) -> Result<()> {
    info!("Headless run: {:?} x {:?} every {:?}", text, count, period);

    let mut engine = RepeatEngine::with_period(TokioTimer::new(), period);
    engine.set_text(text);
    engine.set_repeat_count(count);

    if let Err(reason) = engine.validate() {
        eprintln!("{} {}", "Cannot start:".red(), reason);
        eyre::bail!("Invalid input: {}", reason);
    }

    if verbose {
        eprintln!("{} {} x {:?} every {:?}", "Repeating:".cyan(), count.trim(), text, period);
    }

    engine.start();
    let mut stdout = io::stdout();
    let written = run_to_completion(&mut engine, &mut stdout, format)
        .await
        .context("Failed to write output")?;
    info!("Headless run wrote {} lines", written);

    if copy {
        match copy_output(&engine, &mut Osc52Clipboard::stderr()).context("Failed to copy output")? {
            CopyOutcome::Copied { lines } => eprintln!("{} {} lines", "Copied to Clipboard:".green(), lines),
            CopyOutcome::NothingToCopy => eprintln!("{}", "Nothing to copy".yellow()),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let loaded = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = loaded.config;

    // Setup logging once the configured level is known
    setup_logging(&config, cli.is_verbose()).context("Failed to setup logging")?;

    for skipped in &loaded.skipped {
        warn!("{}", skipped);
    }
    match &loaded.source {
        ConfigSource::File(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::Defaults => info!("No config file found, using defaults"),
    }

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
