//! Structured feedback produced by rule modules.

use std::fmt;

use serde::Serialize;

/// One rule finding about the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Feedback {
    /// Rule code, conventionally the module kind (`range`, `pattern`, ...).
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Absolute paths of the affected nodes.
    pub paths: Vec<String>,
}

impl Feedback {
    /// Creates a feedback entry with no paths.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            paths: Vec::new(),
        }
    }

    /// Adds an affected path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.paths.is_empty() {
            write!(f, " ({})", self.paths.join(", "))?;
        }
        Ok(())
    }
}

/// Append-only collector handed to modules during a run.
#[derive(Clone, Debug, Default)]
pub struct FeedbackLog {
    entries: Vec<Feedback>,
}

impl FeedbackLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, feedback: Feedback) {
        self.entries.push(feedback);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Feedback> {
        self.entries.iter()
    }

    /// Consumes the log.
    #[must_use]
    pub fn into_entries(self) -> Vec<Feedback> {
        self.entries
    }
}
