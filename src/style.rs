//! Font style and colour choices for the output list.

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name that matches no picker option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {name:?} (expected one of: {expected})")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub name: String,
    pub expected: String,
}

/// Font style applied to every output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    Underline,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [Self::Normal, Self::Bold, Self::Italic, Self::Underline];

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
        }
    }

    /// Next option, wrapping around.
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    /// Previous option, wrapping around.
    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }

    pub fn modifier(self) -> Modifier {
        match self {
            Self::Normal => Modifier::empty(),
            Self::Bold => Modifier::BOLD,
            Self::Italic => Modifier::ITALIC,
            Self::Underline => Modifier::UNDERLINED,
        }
    }
}

impl FromStr for FontStyle {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("font style", &Self::ALL, Self::label, s)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text colour applied to every output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    #[default]
    Black,
    Red,
    Blue,
    Green,
}

impl TextColor {
    pub const ALL: [TextColor; 4] = [Self::Black, Self::Red, Self::Blue, Self::Green];

    pub fn label(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::Green => "Green",
        }
    }

    /// Next option, wrapping around.
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    /// Previous option, wrapping around.
    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }

    pub fn color(self) -> Color {
        match self {
            Self::Black => Color::Black,
            Self::Red => Color::Red,
            Self::Blue => Color::Blue,
            Self::Green => Color::Green,
        }
    }
}

impl FromStr for TextColor {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("color", &Self::ALL, Self::label, s)
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Match `name` against option labels, ignoring case and surrounding space.
fn parse_option<T: Copy>(
    kind: &'static str,
    all: &[T],
    label: fn(T) -> &'static str,
    name: &str,
) -> Result<T, UnknownOption> {
    let wanted = name.trim();
    all.iter()
        .copied()
        .find(|option| label(*option).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| UnknownOption {
            kind,
            name: name.to_string(),
            expected: all.iter().map(|option| label(*option).to_lowercase()).collect::<Vec<_>>().join(", "),
        })
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let idx = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}

/// ratatui style for an output line.
pub fn line_style(style: FontStyle, color: TextColor) -> Style {
    Style::default().fg(color.color()).add_modifier(style.modifier())
}

/// Terminal-coloured text for headless output.
pub fn paint(text: &str, style: FontStyle, color: TextColor) -> ColoredString {
    let colored = match color {
        TextColor::Black => text.black(),
        TextColor::Red => text.red(),
        TextColor::Blue => text.blue(),
        TextColor::Green => text.green(),
    };
    match style {
        FontStyle::Normal => colored,
        FontStyle::Bold => colored.bold(),
        FontStyle::Italic => colored.italic(),
        FontStyle::Underline => colored.underline(),
    }
}
