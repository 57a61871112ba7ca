//! Token types for the Arbiter rule-script DSL.
//!
//! Tokens are the output of the scanner and input to the parser.

use std::fmt;

use crate::span::Span;

/// Lexical category of a token.
///
/// Whether a category is skipped by the scanner is configuration (see
/// [`Scanner::add_ignorable`](crate::Scanner::add_ignorable)), not a
/// property of the category itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Run of whitespace characters.
    Whitespace,
    /// Double-quoted string literal.
    LiteralString,
    /// Integer literal.
    NumberInteger,
    /// Real literal (has a fraction or an exponent).
    NumberReal,
    /// Punctuation: `( ) [ ] { } , :`.
    Symbol,
    /// Statement terminator `.`.
    Terminal,
    /// Reserved word.
    Keyword,
    /// Sigil-prefixed numeric variable such as `#limit`.
    Variable,
    /// Identifier-shaped name that is not a reserved word.
    Identifier,
    /// A character no other rule accepts.
    Unknown,
    /// A malformed literal (unterminated string, bad escape, integer overflow).
    Error,
}

impl TokenType {
    /// Returns the display name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Whitespace => "WHITESPACE",
            Self::LiteralString => "LITERAL:STRING",
            Self::NumberInteger => "NUMBER:INTEGER",
            Self::NumberReal => "NUMBER:REAL",
            Self::Symbol => "SYMBOL",
            Self::Terminal => "TERMINAL",
            Self::Keyword => "KEYWORD",
            Self::Variable => "VARIABLE",
            Self::Identifier => "IDENTIFIER",
            Self::Unknown => "UNKNOWN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token from lexical analysis. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenType,
    /// Exact source text covered by the token.
    pub lexeme: String,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenType, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Returns true if this token has the given type and text.
    #[must_use]
    pub fn is(&self, kind: TokenType, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }

    /// Returns true if this token is the punctuation mark `mark`.
    #[must_use]
    pub fn is_symbol(&self, mark: &str) -> bool {
        self.is(TokenType::Symbol, mark)
    }

    /// Returns true if this token is the reserved word `word`.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.is(TokenType::Keyword, word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.lexeme, self.span)
    }
}
