//! Numeric and length bounds.

use arbiter_engine::{FeedbackLog, Module, Status};
use arbiter_foundation::{Path, Result, Value};

use super::{MISSING, check_targets};
use crate::policy::PolicyReader;

/// `range`: every target is a number within `[min, max]`.
struct Range {
    min: Option<f64>,
    max: Option<f64>,
}

impl Module for Range {
    fn process(
        &self,
        entity: &Value,
        path: &Path,
        targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        check_targets("range", entity, path, targets, feedback, |node| {
            let Some(value) = node else {
                return Some(MISSING.to_string());
            };
            let Some(n) = value.as_number() else {
                return Some(format!("expected number, found {}", value.type_name()));
            };
            match (self.min, self.max) {
                (Some(min), _) if n < min => Some(format!("{value} is below minimum {min}")),
                (_, Some(max)) if n > max => Some(format!("{value} is above maximum {max}")),
                _ => None,
            }
        })
    }
}

/// `length`: every target's length (string chars, array items, map entries)
/// is within `[min, max]`.
struct Length {
    min: Option<usize>,
    max: Option<usize>,
}

impl Module for Length {
    fn process(
        &self,
        entity: &Value,
        path: &Path,
        targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        check_targets("length", entity, path, targets, feedback, |node| {
            let Some(value) = node else {
                return Some(MISSING.to_string());
            };
            let Some(len) = value.len() else {
                return Some(format!("{} has no length", value.type_name()));
            };
            match (self.min, self.max) {
                (Some(min), _) if len < min => Some(format!("length {len} is below minimum {min}")),
                (_, Some(max)) if len > max => Some(format!("length {len} is above maximum {max}")),
                _ => None,
            }
        })
    }
}

fn check_order<T: PartialOrd + std::fmt::Display>(
    reader: &PolicyReader<'_>,
    min: Option<T>,
    max: Option<T>,
) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            Err(reader.error(format!("min {min} is greater than max {max}")))
        }
        _ => Ok(()),
    }
}

pub(super) fn range(policy: Option<&Value>) -> Result<Box<dyn Module>> {
    let reader = PolicyReader::new("range", policy)?.only(&["min", "max"])?;
    let (min, max) = (reader.number("min")?, reader.number("max")?);
    check_order(&reader, min, max)?;
    Ok(Box::new(Range { min, max }))
}

pub(super) fn length(policy: Option<&Value>) -> Result<Box<dyn Module>> {
    let reader = PolicyReader::new("length", policy)?.only(&["min", "max"])?;
    let (min, max) = (reader.count("min")?, reader.count("max")?);
    check_order(&reader, min, max)?;
    Ok(Box::new(Length { min, max }))
}
