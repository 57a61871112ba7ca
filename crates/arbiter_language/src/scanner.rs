//! Rule-driven scanner.
//!
//! The scanner owns an ordered list of [`TokenRule`]s and a set of ignorable
//! [`TokenType`]s. At each position the first rule (in registration order)
//! that matches wins. Tokens of an ignorable type are dropped and scanning
//! resumes from the new position, so runs of whitespace need no special case.
//!
//! Lexical errors are never raised here: unscannable input surfaces as
//! `UNKNOWN` or `ERROR` tokens and the parser rejects them.

use std::collections::HashSet;
use std::fmt;

use tracing::trace;

use crate::reader::{Reader, StrReader};
use crate::rules::TokenRule;
use crate::span::Span;
use crate::token::{Token, TokenType};

/// Token stream over a [`Reader`].
pub struct Scanner<R: Reader = StrReader> {
    reader: R,
    rules: Vec<Box<dyn TokenRule>>,
    ignorable: HashSet<TokenType>,
    current: Option<Token>,
    line: u32,
    column: u32,
}

impl<R: Reader> Scanner<R> {
    /// Creates a scanner with no rules over `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            rules: Vec::new(),
            ignorable: HashSet::new(),
            current: None,
            line: 1,
            column: 1,
        }
    }

    /// Appends a rule. Earlier rules take priority.
    pub fn add_rule<T: TokenRule + 'static>(&mut self, rule: T) {
        self.rules.push(Box::new(rule));
    }

    /// Marks a token type to be skipped silently.
    pub fn add_ignorable(&mut self, kind: TokenType) {
        self.ignorable.insert(kind);
    }

    /// Returns true if tokens of `kind` are skipped.
    #[must_use]
    pub fn is_ignorable(&self, kind: TokenType) -> bool {
        self.ignorable.contains(&kind)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The most recently scanned token, or `None` once input is exhausted.
    #[must_use]
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Moves to the next non-ignorable token.
    ///
    /// Returns false, leaving no current token, when the input is exhausted
    /// or no rule matches.
    pub fn advance(&mut self) -> bool {
        loop {
            let Some(token) = self.scan_one() else {
                self.current = None;
                return false;
            };
            if self.ignorable.contains(&token.kind) {
                continue;
            }
            trace!(kind = token.kind.name(), lexeme = %token.lexeme, line = token.span.line, "token");
            self.current = Some(token);
            return true;
        }
    }

    /// Resets to the start of input and clears the current token.
    pub fn rewind(&mut self) {
        self.reader.seek(0);
        self.current = None;
        self.line = 1;
        self.column = 1;
    }

    /// Rewinds and collects every non-ignorable token.
    pub fn tokenize_all(&mut self) -> Vec<Token> {
        self.rewind();
        let mut tokens = Vec::new();
        while self.advance() {
            if let Some(token) = self.current.take() {
                tokens.push(token);
            }
        }
        tokens
    }

    /// Scans one token at the cursor, ignorable or not, and moves past it.
    fn scan_one(&mut self) -> Option<Token> {
        if !self.reader.is_ready() {
            return None;
        }
        let found = self
            .rules
            .iter()
            .filter_map(|rule| rule.scan(&self.reader))
            .find(|m| m.length > 0)?;

        let start = self.reader.position();
        let end = start + found.length;
        let lexeme = self.reader.read_range(start, end);
        let span = Span::new(start, end, self.line, self.column);

        (self.line, self.column) = span.position_after(&lexeme);
        self.reader.seek(end);

        Some(Token::new(found.kind, lexeme, span))
    }
}

impl<R: Reader> Iterator for Scanner<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.advance() {
            self.current.clone()
        } else {
            None
        }
    }
}

impl<R: Reader> fmt::Debug for Scanner<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("position", &self.reader.position())
            .field("rules", &self.rules.len())
            .field("ignorable", &self.ignorable)
            .field("current", &self.current)
            .finish()
    }
}
