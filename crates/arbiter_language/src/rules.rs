//! Token rules.
//!
//! A [`TokenRule`] inspects the reader at its current position and reports
//! how many characters it would claim and under which [`TokenType`]. Rules
//! never move the cursor; the scanner seeks past the winning match.
//!
//! Every rule must claim at least one character when it matches. The
//! scanner treats an empty match as no match.

use std::collections::HashSet;

use crate::reader::Reader;
use crate::token::TokenType;

/// The span a rule would claim at the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleMatch {
    /// Category of the token.
    pub kind: TokenType,
    /// Number of characters claimed.
    pub length: usize,
}

impl RuleMatch {
    /// Creates a match.
    #[must_use]
    pub const fn new(kind: TokenType, length: usize) -> Self {
        Self { kind, length }
    }
}

/// A matcher tried by the scanner at each position.
pub trait TokenRule: Send + Sync {
    /// Returns the match at the reader's current position, if any.
    fn scan(&self, reader: &dyn Reader) -> Option<RuleMatch>;
}

// =============================================================================
// Whitespace
// =============================================================================

/// Matches a run of whitespace.
#[derive(Debug, Default)]
pub struct WhitespaceRule;

impl TokenRule for WhitespaceRule {
    fn scan(&self, reader: &dyn Reader) -> Option<RuleMatch> {
        let mut length = 0;
        while reader.peek_char(length).is_some_and(char::is_whitespace) {
            length += 1;
        }
        (length > 0).then(|| RuleMatch::new(TokenType::Whitespace, length))
    }
}

// =============================================================================
// String literals
// =============================================================================

/// Matches a double-quoted string literal.
///
/// Supported escapes: `\" \\ \/ \n \t \r \uXXXX`. An unterminated literal
/// claims the rest of the input and an invalid escape claims the whole
/// literal; both are reported as [`TokenType::Error`].
#[derive(Debug, Default)]
pub struct StringRule;

impl TokenRule for StringRule {
    fn scan(&self, reader: &dyn Reader) -> Option<RuleMatch> {
        if reader.peek_char(0) != Some('"') {
            return None;
        }
        let mut i = 1;
        let mut valid = true;
        loop {
            match reader.peek_char(i) {
                None => return Some(RuleMatch::new(TokenType::Error, i)),
                Some('"') => {
                    let kind = if valid {
                        TokenType::LiteralString
                    } else {
                        TokenType::Error
                    };
                    return Some(RuleMatch::new(kind, i + 1));
                }
                Some('\\') => {
                    match reader.peek_char(i + 1) {
                        None => return Some(RuleMatch::new(TokenType::Error, i + 1)),
                        Some('"' | '\\' | '/' | 'n' | 't' | 'r') => i += 2,
                        Some('u') => {
                            let hex = (2..6).all(|k| {
                                reader.peek_char(i + k).is_some_and(|c| c.is_ascii_hexdigit())
                            });
                            valid &= hex;
                            i += 2;
                        }
                        Some(_) => {
                            valid = false;
                            i += 2;
                        }
                    }
                }
                Some(_) => i += 1,
            }
        }
    }
}

/// Decodes the source text of a string literal (quotes included).
///
/// Returns `None` for text that [`StringRule`] would not accept as a
/// [`TokenType::LiteralString`].
#[must_use]
pub fn decode_string(raw: &str) -> Option<String> {
    let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            _ => return None,
        }
    }
    Some(out)
}

// =============================================================================
// Numbers
// =============================================================================

/// Matches integer and real literals.
///
/// Grammar: `-? digit+ ('.' digit+)? ([eE] [+-]? digit+)?`. A literal with a
/// fraction or an exponent is real. A `.` not followed by a digit is left for
/// the terminal rule, so `def(x, 1).` scans the `1` and the `.` separately.
/// Integers that overflow `i64` are reported as [`TokenType::Error`].
#[derive(Debug, Default)]
pub struct NumberRule;

impl TokenRule for NumberRule {
    fn scan(&self, reader: &dyn Reader) -> Option<RuleMatch> {
        let digit_at = |i: usize| reader.peek_char(i).is_some_and(|c| c.is_ascii_digit());
        let mut i = usize::from(reader.peek_char(0) == Some('-'));
        if !digit_at(i) {
            return None;
        }
        while digit_at(i) {
            i += 1;
        }

        let mut real = false;
        if reader.peek_char(i) == Some('.') && digit_at(i + 1) {
            real = true;
            i += 1;
            while digit_at(i) {
                i += 1;
            }
        }

        if matches!(reader.peek_char(i), Some('e' | 'E')) {
            let sign = usize::from(matches!(reader.peek_char(i + 1), Some('+' | '-')));
            if digit_at(i + 1 + sign) {
                real = true;
                i += 1 + sign;
                while digit_at(i) {
                    i += 1;
                }
            }
        }

        let start = reader.position();
        let text = reader.read_range(start, start + i);
        let kind = if real {
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => TokenType::NumberReal,
                _ => TokenType::Error,
            }
        } else if text.parse::<i64>().is_ok() {
            TokenType::NumberInteger
        } else {
            TokenType::Error
        };
        Some(RuleMatch::new(kind, i))
    }
}

// =============================================================================
// Fixed strings
// =============================================================================

/// Matches one fixed string, such as a punctuation mark.
#[derive(Debug)]
pub struct FixedRule {
    text: Vec<char>,
    kind: TokenType,
}

impl FixedRule {
    /// Creates a rule matching `text` as `kind`.
    #[must_use]
    pub fn new(text: &str, kind: TokenType) -> Self {
        Self {
            text: text.chars().collect(),
            kind,
        }
    }

    /// Creates a punctuation rule.
    #[must_use]
    pub fn symbol(text: &str) -> Self {
        Self::new(text, TokenType::Symbol)
    }

    /// Creates a terminal rule.
    #[must_use]
    pub fn terminal(text: &str) -> Self {
        Self::new(text, TokenType::Terminal)
    }
}

impl TokenRule for FixedRule {
    fn scan(&self, reader: &dyn Reader) -> Option<RuleMatch> {
        let matches = self
            .text
            .iter()
            .enumerate()
            .all(|(i, &c)| reader.peek_char(i) == Some(c));
        (matches && !self.text.is_empty()).then(|| RuleMatch::new(self.kind, self.text.len()))
    }
}

// =============================================================================
// Names
// =============================================================================

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Length of the identifier-shaped span starting `offset` characters ahead.
fn name_length(reader: &dyn Reader, offset: usize) -> usize {
    if !reader.peek_char(offset).is_some_and(is_name_start) {
        return 0;
    }
    let mut length = 1;
    while reader.peek_char(offset + length).is_some_and(is_name_char) {
        length += 1;
    }
    length
}

/// Matches identifier-shaped spans equal to one of a set of reserved words.
///
/// The whole identifier-shaped span must match, so `define` is not the
/// keyword `def`.
#[derive(Debug, Default)]
pub struct KeywordRule {
    words: HashSet<String>,
}

impl KeywordRule {
    /// Creates a rule for the given reserved words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `word` is reserved.
    #[must_use]
    pub fn is_reserved(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl TokenRule for KeywordRule {
    fn scan(&self, reader: &dyn Reader) -> Option<RuleMatch> {
        let length = name_length(reader, 0);
        if length == 0 {
            return None;
        }
        let start = reader.position();
        let word = reader.read_range(start, start + length);
        self.is_reserved(&word)
            .then(|| RuleMatch::new(TokenType::Keyword, length))
    }
}

/// Matches identifier-shaped names, optionally behind a sigil.
///
/// Register after [`KeywordRule`] so reserved words are claimed first.
#[derive(Debug)]
pub struct NameRule {
    sigil: Option<char>,
    kind: TokenType,
}

impl NameRule {
    /// Plain names such as `limit` or `one-of`.
    #[must_use]
    pub const fn identifier() -> Self {
        Self {
            sigil: None,
            kind: TokenType::Identifier,
        }
    }

    /// Sigil-prefixed numeric variables such as `#limit`.
    #[must_use]
    pub const fn variable(sigil: char) -> Self {
        Self {
            sigil: Some(sigil),
            kind: TokenType::Variable,
        }
    }
}

impl TokenRule for NameRule {
    fn scan(&self, reader: &dyn Reader) -> Option<RuleMatch> {
        let offset = match self.sigil {
            Some(sigil) if reader.peek_char(0) == Some(sigil) => 1,
            Some(_) => return None,
            None => 0,
        };
        let length = name_length(reader, offset);
        (length > 0).then(|| RuleMatch::new(self.kind, offset + length))
    }
}

// =============================================================================
// Catch-all
// =============================================================================

/// Matches exactly one character. Register last.
#[derive(Debug, Default)]
pub struct UnknownRule;

impl TokenRule for UnknownRule {
    fn scan(&self, reader: &dyn Reader) -> Option<RuleMatch> {
        reader
            .peek_char(0)
            .map(|_| RuleMatch::new(TokenType::Unknown, 1))
    }
}
