//! Preconfigured rule sets.
//!
//! Both dialects share the grammar. `Extended` additionally scans the
//! sigil-prefixed numeric variable form `#name`.

use std::fmt;
use std::str::FromStr;

use arbiter_foundation::{Error, Result};

use crate::reader::{Reader, StrReader};
use crate::rules::{
    FixedRule, KeywordRule, NameRule, NumberRule, StringRule, UnknownRule, WhitespaceRule,
};
use crate::scanner::Scanner;
use crate::token::TokenType;

/// Reserved words of the script surface.
pub const KEYWORDS: &[&str] = &[
    "def", "run", "eval", "par", "seq", "sel", "true", "false", "null",
];

/// Punctuation marks scanned as [`TokenType::Symbol`].
pub const SYMBOLS: &[&str] = &["(", ")", "[", "]", "{", "}", ",", ":"];

/// Sigil introducing a numeric variable in the extended dialect.
pub const NUMERIC_SIGIL: char = '#';

/// Script dialect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Identifier variables only.
    #[default]
    Standard,
    /// Adds `#name` numeric variables.
    Extended,
}

impl Dialect {
    /// Dialect name as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
        }
    }

    /// Returns true if `#name` variables are recognized.
    #[must_use]
    pub const fn has_numeric_variables(self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Registers this dialect's rules and ignorables on `scanner`.
    ///
    /// Registration order is match priority: whitespace, strings, numbers,
    /// punctuation, terminal, keywords, names, and the catch-all last.
    pub fn configure<R: Reader>(self, scanner: &mut Scanner<R>) {
        scanner.add_rule(WhitespaceRule);
        scanner.add_rule(StringRule);
        scanner.add_rule(NumberRule);
        for mark in SYMBOLS {
            scanner.add_rule(FixedRule::symbol(mark));
        }
        scanner.add_rule(FixedRule::terminal("."));
        scanner.add_rule(KeywordRule::new(KEYWORDS.iter().copied()));
        scanner.add_rule(NameRule::identifier());
        if self.has_numeric_variables() {
            scanner.add_rule(NameRule::variable(NUMERIC_SIGIL));
        }
        scanner.add_rule(UnknownRule);
        scanner.add_ignorable(TokenType::Whitespace);
    }

    /// Creates a configured scanner over `source`.
    #[must_use]
    pub fn scanner(self, source: &str) -> Scanner<StrReader> {
        let mut scanner = Scanner::new(StrReader::new(source));
        self.configure(&mut scanner);
        scanner
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(Self::Standard),
            "extended" => Ok(Self::Extended),
            other => Err(Error::invalid_config(format!("unknown dialect: {other}"))),
        }
    }
}
