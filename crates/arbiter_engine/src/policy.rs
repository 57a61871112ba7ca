//! Threshold policy for `par` blocks.

use arbiter_foundation::{Error, Result, Value};

use crate::status::Status;

/// Success and failure thresholds for a `par` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParPolicy {
    /// Successful children needed for `SUCCESS`.
    pub successes_required: usize,
    /// Failed children needed for `FAILED`.
    pub failures_required: usize,
}

impl Default for ParPolicy {
    fn default() -> Self {
        Self {
            successes_required: 1,
            failures_required: 1,
        }
    }
}

impl ParPolicy {
    /// Policy key for the success threshold.
    pub const SUCCESSES_KEY: &'static str = "successesRequired";
    /// Policy key for the failure threshold.
    pub const FAILURES_KEY: &'static str = "failuresRequired";

    /// Creates a policy with explicit thresholds.
    #[must_use]
    pub const fn new(successes_required: usize, failures_required: usize) -> Self {
        Self {
            successes_required,
            failures_required,
        }
    }

    /// Reads a policy from an evaluated term.
    ///
    /// `None` and `null` give the defaults. A map may set either key.
    ///
    /// # Errors
    /// Returns `InvalidPolicy` for any other shape, unknown keys, and
    /// thresholds that are not integers of at least 1.
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        let map = match value {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Map(map)) => map,
            Some(other) => {
                return Err(Error::invalid_policy(format!(
                    "par policy must be a map, got {}",
                    other.type_name()
                )));
            }
        };

        let mut policy = Self::default();
        for (key, value) in map.iter() {
            let threshold = match value.as_int().map(usize::try_from) {
                Some(Ok(n)) if n >= 1 => n,
                _ => {
                    return Err(Error::invalid_policy(format!(
                        "{key} must be an integer of at least 1, got {value}"
                    )));
                }
            };
            match key {
                Self::SUCCESSES_KEY => policy.successes_required = threshold,
                Self::FAILURES_KEY => policy.failures_required = threshold,
                other => {
                    return Err(Error::invalid_policy(format!(
                        "unknown par policy key: {other}"
                    )));
                }
            }
        }
        Ok(policy)
    }

    /// Decides the block's status once every child has run.
    ///
    /// Successes are checked before failures.
    #[must_use]
    pub const fn decide(&self, successes: usize, failures: usize) -> Status {
        if successes >= self.successes_required {
            Status::Success
        } else if failures >= self.failures_required {
            Status::Failed
        } else {
            Status::Active
        }
    }
}
