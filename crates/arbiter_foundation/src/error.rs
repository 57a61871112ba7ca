//! Error types for the Arbiter engine.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Errors are reserved for conditions the engine cannot proceed from
//! (malformed scripts, unresolved names, misconfigured modules). A document
//! that fails a rule is not an error: it is reported through a status value
//! and feedback entries by the engine layer.

use std::fmt;

use thiserror::Error;

/// The main error type for Arbiter operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error, replacing any existing context.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records an enclosing frame (statement or module) the error passed through.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Names the script or input the error came from, keeping any frames
    /// already recorded.
    #[must_use]
    pub fn in_source(mut self, source: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_source(source));
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates an undefined symbol error.
    #[must_use]
    pub fn undefined_symbol(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedSymbol(name.into()))
    }

    /// Creates a module not found error.
    #[must_use]
    pub fn module_not_found(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::ModuleNotFound(name.into()))
    }

    /// Creates an invalid policy error.
    #[must_use]
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPolicy(message.into()))
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(message.into()))
    }

    /// Returns true if this is a syntax or missing-token error.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Syntax { .. } | ErrorKind::MissingToken { .. }
        )
    }

    /// Returns true if this is a failed module or symbol lookup.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ModuleNotFound(_) | ErrorKind::UndefinedSymbol(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The parser found a token it cannot accept at this point.
    #[error("syntax error at {line}:{column}: expected {expected}, found {found} '{lexeme}'")]
    Syntax {
        /// Display name of the offending token's type (e.g. `NUMBER:INTEGER`).
        found: String,
        /// The offending token's text.
        lexeme: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// Description of what the grammar required.
        expected: String,
    },

    /// The token stream ended while the grammar still required input.
    #[error("missing token: expected {expected} before end of input")]
    MissingToken {
        /// Description of what the grammar required.
        expected: String,
    },

    /// Variable was not bound in the symbol table.
    #[error("undefined symbol: {0}")]
    UndefinedSymbol(String),

    /// No frame in the scope stack binds a module with this name.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// A `run` target did not evaluate to a callable.
    #[error("not callable: {0}")]
    NotCallable(String),

    /// A callable invoked through `run` reported a failure.
    #[error("callable {name} failed: {message}")]
    CallableFailed {
        /// Name of the callable.
        name: String,
        /// Failure description.
        message: String,
    },

    /// Type mismatch during evaluation.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: String,
        /// The actual type encountered.
        actual: String,
    },

    /// Nesting of composite statements or script terms exceeded a limit.
    #[error("maximum nesting depth ({0}) exceeded")]
    DepthExceeded(usize),

    /// A module or composite statement was given a malformed policy.
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// Registry or engine configuration is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a script, document or configuration failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Script file or input name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Column number in source.
    pub column: Option<u32>,
    /// Enclosing statements and modules, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
