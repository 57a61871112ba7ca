//! Syntax highlighting for the REPL.
//!
//! Colors come from the same scanner the parser uses, so the highlighting
//! always agrees with how a line will be tokenized.

use std::borrow::Cow;

use arbiter_language::{Dialect, Token, TokenType};

/// Highlighter for Arbiter scripts.
pub struct ArbiterHighlighter {
    dialect: Dialect,
}

impl ArbiterHighlighter {
    /// Creates a highlighter for `dialect`.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Sets the dialect used to scan input.
    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    /// Highlight a line of input.
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        // REPL commands are not script text.
        if line.trim_start().starts_with(':') {
            return Cow::Borrowed(line);
        }

        let tokens = self.dialect.scanner(line).tokenize_all();
        if tokens.is_empty() {
            return Cow::Borrowed(line);
        }

        let chars: Vec<char> = line.chars().collect();
        let mut result = String::with_capacity(line.len() * 2);
        let mut cursor = 0;
        for token in &tokens {
            // Skipped whitespace between tokens.
            result.extend(&chars[cursor..token.span.start]);
            match color(token) {
                Some(code) => {
                    result.push_str(code);
                    result.push_str(&token.lexeme);
                    result.push_str("\x1b[0m");
                }
                None => result.push_str(&token.lexeme),
            }
            cursor = token.span.end;
        }
        result.extend(&chars[cursor..]);
        Cow::Owned(result)
    }
}

fn color(token: &Token) -> Option<&'static str> {
    let code = match token.kind {
        TokenType::Keyword => match token.lexeme.as_str() {
            "true" | "false" | "null" => "\x1b[34m", // blue
            "par" | "seq" | "sel" => "\x1b[1;32m",   // bold green
            _ => "\x1b[32m",                         // green
        },
        TokenType::LiteralString => "\x1b[33m", // yellow
        TokenType::NumberInteger | TokenType::NumberReal => "\x1b[35m", // magenta
        TokenType::Variable => "\x1b[36m", // cyan
        TokenType::Symbol | TokenType::Terminal => "\x1b[1m",
        TokenType::Error | TokenType::Unknown => "\x1b[4;31m", // red underline
        TokenType::Identifier | TokenType::Whitespace => return None,
    };
    Some(code)
}

impl Default for ArbiterHighlighter {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}
