//! Presence checks.

use arbiter_engine::{FeedbackLog, Module, Status};
use arbiter_foundation::{Path, Result, Value};

use super::{MISSING, check_targets};
use crate::policy::PolicyReader;

/// `exists`: every target is present and not null.
struct Exists;

impl Module for Exists {
    fn process(
        &self,
        entity: &Value,
        path: &Path,
        targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        check_targets("exists", entity, path, targets, feedback, |node| match node {
            None => Some(MISSING.to_string()),
            Some(Value::Null) => Some("value is null".to_string()),
            Some(_) => None,
        })
    }
}

pub(super) fn exists(policy: Option<&Value>) -> Result<Box<dyn Module>> {
    PolicyReader::new("exists", policy)?.only(&[])?;
    Ok(Box::new(Exists))
}
