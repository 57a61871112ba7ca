//! String patterns.

use arbiter_engine::{FeedbackLog, Module, Status};
use arbiter_foundation::{Path, Result, Value};
use regex::Regex;

use super::{MISSING, check_targets};
use crate::policy::PolicyReader;

/// `pattern`: every target is a string matching `regex`.
///
/// The expression is unanchored; write `^...$` for a full match.
struct Pattern {
    regex: Regex,
}

impl Module for Pattern {
    fn process(
        &self,
        entity: &Value,
        path: &Path,
        targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        check_targets("pattern", entity, path, targets, feedback, |node| match node {
            None => Some(MISSING.to_string()),
            Some(Value::String(s)) if self.regex.is_match(s) => None,
            Some(Value::String(s)) => Some(format!(
                "'{s}' does not match /{}/",
                self.regex.as_str()
            )),
            Some(other) => Some(format!("expected string, found {}", other.type_name())),
        })
    }
}

pub(super) fn pattern(policy: Option<&Value>) -> Result<Box<dyn Module>> {
    let reader = PolicyReader::new("pattern", policy)?.only(&["regex"])?;
    let source = reader.string("regex")?;
    let regex = Regex::new(source).map_err(|e| reader.error(format!("invalid regex: {e}")))?;
    Ok(Box::new(Pattern { regex }))
}
