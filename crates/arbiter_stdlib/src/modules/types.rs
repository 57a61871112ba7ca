//! Type checks.

use arbiter_engine::{FeedbackLog, Module, Status};
use arbiter_foundation::{Path, Result, Value};

use super::check_targets;
use crate::policy::PolicyReader;

const TYPE_NAMES: &[&str] = &[
    "string", "integer", "real", "number", "boolean", "array", "map", "null",
];

/// `type`: every target has the configured type.
///
/// `number` accepts integers and reals. `null` also accepts absent targets.
struct TypeOf {
    expected: &'static str,
}

impl TypeOf {
    fn accepts(&self, node: Option<&Value>) -> bool {
        match (self.expected, node) {
            ("null", None) => true,
            (_, None) => false,
            ("number", Some(value)) => value.is_number(),
            (expected, Some(value)) => value.type_name() == expected,
        }
    }
}

impl Module for TypeOf {
    fn process(
        &self,
        entity: &Value,
        path: &Path,
        targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        check_targets("type", entity, path, targets, feedback, |node| {
            if self.accepts(node) {
                return None;
            }
            let actual = node.map_or("missing", Value::type_name);
            Some(format!("expected {}, found {actual}", self.expected))
        })
    }
}

pub(super) fn type_of(policy: Option<&Value>) -> Result<Box<dyn Module>> {
    let reader = PolicyReader::new("type", policy)?.only(&["type"])?;
    let name = reader.string("type")?;
    let Some(expected) = TYPE_NAMES.iter().copied().find(|t| *t == name) else {
        return Err(reader.error(format!(
            "unknown type '{name}', expected one of {}",
            TYPE_NAMES.join(", ")
        )));
    };
    Ok(Box::new(TypeOf { expected }))
}
