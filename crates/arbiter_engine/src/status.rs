//! Tri-state statement outcome.

use std::fmt;

/// Outcome of executing a statement.
///
/// A document failing a rule is `Failed`, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// The rule or block passed.
    Success,
    /// The rule or block failed.
    Failed,
    /// Neither threshold of a `par` block was reached.
    Active,
}

impl Status {
    /// Upper-case name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Active => "ACTIVE",
        }
    }

    /// Returns true for [`Status::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns true for [`Status::Failed`].
    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Maps a boolean check onto `Success`/`Failed`.
    #[must_use]
    pub const fn from_check(passed: bool) -> Self {
        if passed { Self::Success } else { Self::Failed }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
