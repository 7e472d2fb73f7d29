//! TUI Views
//!
//! Renders the single screen: title, text and count fields, style and colour
//! pickers, start/stop button, output list, copy button and status line.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::app::App;
use super::colors;
use super::input::TextInput;
use super::state::{AppState, Focus};
use crate::clipboard::ClipboardSink;
use crate::engine::{RunStatus, Timer};
use crate::style::line_style;

/// Render the whole screen.
pub fn render<T: Timer, C: ClipboardSink>(frame: &mut Frame, app: &App<T, C>) {
    let state = app.state();
    let engine = app.engine();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // text + count
            Constraint::Length(3), // pickers
            Constraint::Length(3), // start/stop
            Constraint::Min(3),    // output
            Constraint::Length(3), // copy
            Constraint::Length(1), // status / hints
        ])
        .split(frame.area());

    let title = Paragraph::new("Text Repeater")
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD));
    frame.render_widget(title, rows[0]);

    render_inputs(frame, rows[1], state);
    render_pickers(frame, rows[2], state);
    render_toggle(frame, rows[3], state, engine.status());
    render_output(frame, rows[4], state, engine.output());
    render_button(frame, rows[5], "Copy to Clipboard", colors::BUTTON, state.focus == Focus::Copy);
    render_status(frame, rows[6], state);
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { colors::FOCUS } else { colors::DIM };
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(border))
}

fn render_inputs(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(area);

    render_field(frame, cols[0], "Enter text", &state.text_input, state.focus == Focus::Text);
    render_field(frame, cols[1], "Repeat", &state.count_input, state.focus == Focus::Count);
}

fn render_field(frame: &mut Frame, area: Rect, title: &str, input: &TextInput, focused: bool) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let column = input.cursor_column();
    let skip = column.saturating_sub(inner_width.saturating_sub(1));
    let visible: String = input.content().chars().skip(skip).collect();

    frame.render_widget(Paragraph::new(visible).block(field_block(title, focused)), area);

    if focused {
        let x = area.x + 1 + (column - skip) as u16;
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_pickers(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    let style_line = picker_line(state.style.label());
    frame.render_widget(
        Paragraph::new(style_line).block(field_block("Style", state.focus == Focus::Style)),
        cols[0],
    );

    let color_line = picker_line(state.color.label());
    frame.render_widget(
        Paragraph::new(color_line).block(field_block("Color", state.focus == Focus::Color)),
        cols[1],
    );
}

fn picker_line(label: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled("◀ ", Style::default().fg(colors::DIM)),
        Span::raw(label),
        Span::styled(" ▶", Style::default().fg(colors::DIM)),
    ])
}

fn render_toggle(frame: &mut Frame, area: Rect, state: &AppState, status: RunStatus) {
    let (label, color) = match status {
        RunStatus::Running => ("Stop", colors::STOP),
        RunStatus::Stopped => ("Start", colors::BUTTON),
    };
    render_button(frame, area, label, color, state.focus == Focus::Toggle);
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, color: Color, focused: bool) {
    let mut style = Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD);
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(field_block("", focused));
    frame.render_widget(button, area);
}

/// Index range of the output lines visible in a list of `height` rows.
fn visible_range(total: usize, height: usize, scroll: usize) -> (usize, usize) {
    let end = total - scroll.min(total);
    (end.saturating_sub(height), end)
}

fn render_output(frame: &mut Frame, area: Rect, state: &AppState, output: &[String]) {
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_range(output.len(), height, state.output_scroll);
    let item_style = line_style(state.style, state.color);

    let items: Vec<ListItem> = output[start..end]
        .iter()
        .map(|line| ListItem::new(Span::styled(line.as_str(), item_style)))
        .collect();

    let list = List::new(items)
        .style(Style::default().bg(colors::OUTPUT_BG))
        .block(field_block(&format!("Output ({})", output.len()), false));
    frame.render_widget(list, area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match &state.status {
        Some(status) => {
            let color = if status.is_error { colors::ERROR } else { colors::OK };
            Line::from(Span::styled(status.text.as_str(), Style::default().fg(color)))
        }
        None => Line::from(vec![
            Span::styled("Tab", Style::default().fg(colors::KEYBIND)),
            Span::raw(" focus  "),
            Span::styled("^S", Style::default().fg(colors::KEYBIND)),
            Span::raw(" start/stop  "),
            Span::styled("^Y", Style::default().fg(colors::KEYBIND)),
            Span::raw(" copy  "),
            Span::styled("PgUp/PgDn", Style::default().fg(colors::KEYBIND)),
            Span::raw(" scroll  "),
            Span::styled("Esc", Style::default().fg(colors::KEYBIND)),
            Span::raw(" quit"),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::Config;
    use crate::engine::{ManualTimer, RepeatEngine};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn app() -> App<ManualTimer, MemoryClipboard> {
        App::new(
            RepeatEngine::new(ManualTimer::new()),
            MemoryClipboard::new(),
            &Config::default(),
        )
    }

    fn screen(app: &App<ManualTimer, MemoryClipboard>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_visible_range() {
        assert_eq!(visible_range(0, 5, 0), (0, 0));
        assert_eq!(visible_range(3, 5, 0), (0, 3));
        assert_eq!(visible_range(10, 4, 0), (6, 10));
        assert_eq!(visible_range(10, 4, 3), (3, 7));
        assert_eq!(visible_range(10, 4, 50), (0, 0));
    }

    #[test]
    fn test_render_initial_screen() {
        let text = screen(&app());
        assert!(text.contains("Text Repeater"));
        assert!(text.contains("Start"));
        assert!(text.contains("Normal"));
        assert!(text.contains("Black"));
        assert!(text.contains("Copy to Clipboard"));
        assert!(text.contains("Output (0)"));
    }

    #[test]
    fn test_render_running_shows_stop_and_output() {
        let mut app = app();
        app.engine_mut().set_text("echo");
        app.engine_mut().set_repeat_count("5");
        app.engine_mut().start();
        app.engine_mut().advance(Duration::from_secs(1));

        let text = screen(&app);
        assert!(text.contains("Stop"));
        assert!(text.contains("Output (2)"));
        assert_eq!(text.matches("echo").count(), 2);
    }

    #[test]
    fn test_render_status_message() {
        let mut app = app();
        app.state_mut().set_error("Cannot start: text is empty");
        let text = screen(&app);
        assert!(text.contains("Cannot start: text is empty"));
    }
}
