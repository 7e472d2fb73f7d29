//! Headless runs: drive the engine on the real timer and stream each
//! appended line to a writer instead of the TUI.

use crate::engine::{RepeatEngine, TickOutcome, TokioTimer};
use crate::style::{FontStyle, TextColor, paint};
use log::debug;
use std::io::Write;

/// How lines are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat {
    pub style: FontStyle,
    pub color: TextColor,
    pub plain: bool,
}

/// Wait for ticks until the current run stops, writing each new output line
/// as it appears. Returns the number of lines written.
pub async fn run_to_completion<W: Write>(
    engine: &mut RepeatEngine<TokioTimer>,
    out: &mut W,
    format: LineFormat,
) -> std::io::Result<usize> {
    let mut written = 0;

    while engine.is_running() {
        let Some(handle) = engine.timer_mut().recv().await else {
            break;
        };
        let outcome = engine.on_tick(handle);
        debug!("Tick {}: {:?}", handle, outcome);
        if outcome == TickOutcome::Ignored {
            continue;
        }

        for line in &engine.output()[written..] {
            if format.plain {
                writeln!(out, "{}", line)?;
            } else {
                writeln!(out, "{}", paint(line, format.style, format.color))?;
            }
        }
        out.flush()?;
        written = engine.output().len();
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{CopyOutcome, Osc52Clipboard, copy_output};
    use std::time::Duration;
    use tokio::time::Instant;

    fn plain() -> LineFormat {
        LineFormat {
            plain: true,
            ..LineFormat::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_writes_each_line() {
        let mut engine = RepeatEngine::new(TokioTimer::new());
        engine.set_text("hello");
        engine.set_repeat_count("3");
        engine.start();

        let started = Instant::now();
        let mut out = Vec::new();
        let written = run_to_completion(&mut engine, &mut out, plain()).await.unwrap();

        assert_eq!(written, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "hello\nhello\nhello\n");
        assert_eq!(started.elapsed(), Duration::from_millis(1500));
        assert!(!engine.is_running());
        assert_eq!(engine.timer().active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_keeps_line_stream_clean() {
        let mut engine = RepeatEngine::with_period(TokioTimer::new(), Duration::from_millis(1));
        engine.set_text("hi");
        engine.set_repeat_count("2");
        engine.start();

        let mut lines = Vec::new();
        run_to_completion(&mut engine, &mut lines, plain()).await.unwrap();

        let mut clipboard = Osc52Clipboard::new(Vec::new());
        let outcome = copy_output(&engine, &mut clipboard).unwrap();
        assert_eq!(outcome, CopyOutcome::Copied { lines: 2 });

        assert_eq!(String::from_utf8(lines).unwrap(), "hi\nhi\n");
        let sequence = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(sequence, "\x1b]52;c;aGkKaGk=\x07");
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_running_returns_immediately() {
        let mut engine = RepeatEngine::new(TokioTimer::new());
        engine.set_repeat_count("3");
        engine.start();

        let mut out = Vec::new();
        let written = run_to_completion(&mut engine, &mut out, plain()).await.unwrap();
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_styled_lines_contain_text() {
        let mut engine = RepeatEngine::with_period(TokioTimer::new(), Duration::from_millis(100));
        engine.set_text("styled");
        engine.set_repeat_count("2");
        engine.start();

        let format = LineFormat {
            style: FontStyle::Bold,
            color: TextColor::Red,
            plain: false,
        };
        let mut out = Vec::new();
        run_to_completion(&mut engine, &mut out, format).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|line| line.contains("styled")));
    }
}
