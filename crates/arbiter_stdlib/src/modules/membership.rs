//! Equality and membership.

use arbiter_engine::{FeedbackLog, Module, Status};
use arbiter_foundation::{Path, Result, Value};

use super::{MISSING, check_targets};
use crate::policy::PolicyReader;

/// `one-of`: every target equals one of `values`.
struct OneOf {
    values: Vec<Value>,
    listing: String,
}

impl Module for OneOf {
    fn process(
        &self,
        entity: &Value,
        path: &Path,
        targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        check_targets("one-of", entity, path, targets, feedback, |node| {
            let Some(value) = node else {
                return Some(MISSING.to_string());
            };
            if self.values.contains(value) {
                return None;
            }
            Some(format!("{value} is not one of {}", self.listing))
        })
    }
}

/// `equals`: every target equals `value`. An absent target never matches,
/// not even `null`.
struct Equals {
    value: Value,
}

impl Module for Equals {
    fn process(
        &self,
        entity: &Value,
        path: &Path,
        targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        check_targets("equals", entity, path, targets, feedback, |node| match node {
            None => Some(MISSING.to_string()),
            Some(value) if *value == self.value => None,
            Some(value) => Some(format!("expected {}, found {value}", self.value)),
        })
    }
}

pub(super) fn one_of(policy: Option<&Value>) -> Result<Box<dyn Module>> {
    let reader = PolicyReader::new("one-of", policy)?.only(&["values"])?;
    let list = reader.require("values")?;
    let Value::Array(values) = list else {
        return Err(reader.error("'values' must be an array".to_string()));
    };
    Ok(Box::new(OneOf {
        values: values.iter().cloned().collect(),
        listing: list.to_string(),
    }))
}

pub(super) fn equals(policy: Option<&Value>) -> Result<Box<dyn Module>> {
    let reader = PolicyReader::new("equals", policy)?.only(&["value"])?;
    let value = reader.require("value")?.clone();
    Ok(Box::new(Equals { value }))
}
