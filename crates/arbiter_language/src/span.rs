//! Token positions.
//!
//! Offsets count characters, matching [`Reader`](crate::Reader) positions,
//! so a span indexes the `Vec<char>` of a script directly.

use std::fmt;

/// Where a token sits in its script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first character.
    pub start: usize,
    /// Offset past the last character.
    pub end: usize,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub column: u32,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// The empty span before the first character of a script.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 1, 1)
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end - self.start
    }

    /// Line and column just past `text`, the characters this span covers.
    #[must_use]
    pub fn position_after(&self, text: &str) -> (u32, u32) {
        text.chars()
            .fold((self.line, self.column), |(line, column), c| match c {
                '\n' => (line + 1, 1),
                _ => (line, column + 1),
            })
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::origin()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
