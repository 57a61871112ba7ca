//! Random-access character sources.
//!
//! Token rules only ever look at input through [`Reader::peek_char`], which
//! is relative to the current position, so a rule cannot move the shared
//! cursor. The [`Scanner`](crate::Scanner) alone calls [`Reader::seek`].

/// A random-access character source.
pub trait Reader {
    /// Current character offset.
    fn position(&self) -> usize;

    /// Returns the character `offset` characters past the current position.
    fn peek_char(&self, offset: usize) -> Option<char>;

    /// Returns the text between two absolute character offsets.
    ///
    /// Out-of-range bounds are clamped.
    fn read_range(&self, start: usize, end: usize) -> String;

    /// Returns true while input remains at the current position.
    fn is_ready(&self) -> bool;

    /// Moves the cursor to an absolute character offset.
    fn seek(&mut self, position: usize);
}

/// A [`Reader`] over an in-memory string.
#[derive(Clone, Debug)]
pub struct StrReader {
    chars: Vec<char>,
    position: usize,
}

impl StrReader {
    /// Creates a reader positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
        }
    }

    /// Total number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if the source is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Reader for StrReader {
    fn position(&self) -> usize {
        self.position
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    fn read_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    fn is_ready(&self) -> bool {
        self.position < self.chars.len()
    }

    fn seek(&mut self, position: usize) {
        self.position = position.min(self.chars.len());
    }
}
