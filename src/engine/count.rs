//! Repeat count parsing.
//!
//! The count field is edited as free text and only parsed when a run starts.
//! Parsing is lenient about surrounding noise: leading whitespace is skipped,
//! a single sign is accepted, and anything after the leading digits is
//! ignored (`"12abc"` parses as 12).

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

/// Why a raw count entry could not become a [`RepeatCount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CountRejection {
    #[error("repeat count is empty")]
    Empty,

    #[error("repeat count is not a number")]
    NotANumber,

    #[error("repeat count must be greater than zero")]
    NotPositive,

    #[error("repeat count is too large (max {})", u32::MAX)]
    TooLarge,
}

/// A validated, strictly positive number of repetitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepeatCount(NonZeroU32);

impl RepeatCount {
    /// Create a count from a number, `None` for zero.
    pub fn new(count: u32) -> Option<Self> {
        NonZeroU32::new(count).map(Self)
    }

    /// The number of repetitions.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Parse a raw count entry.
    pub fn parse(input: &str) -> Result<Self, CountRejection> {
        let trimmed = input.trim_start();
        if trimmed.is_empty() {
            return Err(CountRejection::Empty);
        }

        let (negative, rest) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digit_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digit_len == 0 {
            return Err(CountRejection::NotANumber);
        }

        let significant = rest[..digit_len].trim_start_matches('0');
        if significant.is_empty() || negative {
            return Err(CountRejection::NotPositive);
        }

        let value: u32 = significant.parse().map_err(|_| CountRejection::TooLarge)?;
        Self::new(value).ok_or(CountRejection::NotPositive)
    }
}

impl FromStr for RepeatCount {
    type Err = CountRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepeatCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
