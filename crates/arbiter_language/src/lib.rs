//! Scanner, parser, and AST for the Arbiter rule-script DSL.
//!
//! This crate provides:
//! - [`Reader`] - Random-access character source
//! - [`TokenRule`] - Pluggable matchers, tried in registration order
//! - [`Scanner`] - Token stream over a reader, skipping ignorable token types
//! - [`Dialect`] - Preconfigured rule sets for the script surface
//! - [`Parser`] - Predictive recursive-descent parser producing [`Statement`]s
//! - [`Term`] / [`Statement`] - Immutable syntax trees
//!
//! # Example
//!
//! ```
//! use arbiter_language::{parse, Statement};
//!
//! let program = parse(r#"seq() { eval("exists", ["id"], null). }"#).unwrap();
//! assert!(matches!(program.statements[0], Statement::Seq { .. }));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod dialect;
pub mod parser;
pub mod reader;
pub mod rules;
pub mod scanner;
pub mod span;
pub mod token;


pub use ast::{Bindings, Literal, Program, Statement, Term};
pub use dialect::Dialect;
pub use parser::{MAX_NESTING, Parser, parse, parse_term, parse_with};
pub use reader::{Reader, StrReader};
pub use rules::{RuleMatch, TokenRule};
pub use scanner::Scanner;
pub use span::Span;
pub use token::{Token, TokenType};
