//! Built-in rule modules.
//!
//! Each module checks every target path relative to the frame entity and
//! reports one feedback entry per offending target, coded with the module
//! kind. A module returns `SUCCESS` when every target passes and `FAILED`
//! otherwise.
//!
//! - `presence`: `exists`
//! - `types`: `type`
//! - `bounds`: `range`, `length`
//! - `text`: `pattern`
//! - `membership`: `one-of`, `equals`

mod bounds;
mod membership;
mod presence;
mod text;
mod types;

use arbiter_engine::{Feedback, FeedbackLog, Module, ModuleCatalog, ModuleFactory, Status};
use arbiter_foundation::{Error, Path, Result, Value};

/// Signature of a built-in module constructor.
pub type Constructor = fn(Option<&Value>) -> Result<Box<dyn Module>>;

/// A built-in module kind.
#[derive(Clone, Copy, Debug)]
pub struct Builtin {
    /// Catalog kind and default script name.
    pub kind: &'static str,
    /// One-line description.
    pub summary: &'static str,
    /// Policy-checking constructor.
    pub construct: Constructor,
}

impl ModuleFactory for Builtin {
    fn construct(&self, policy: Option<&Value>) -> Result<Box<dyn Module>> {
        (self.construct)(policy)
    }

    fn summary(&self) -> &str {
        self.summary
    }
}

/// Every built-in module.
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        kind: "exists",
        summary: "every target is present and not null",
        construct: presence::exists,
    },
    Builtin {
        kind: "type",
        summary: "every target has the type named by {\"type\": ...}",
        construct: types::type_of,
    },
    Builtin {
        kind: "range",
        summary: "every target is a number within {\"min\", \"max\"}",
        construct: bounds::range,
    },
    Builtin {
        kind: "length",
        summary: "every target's length is within {\"min\", \"max\"}",
        construct: bounds::length,
    },
    Builtin {
        kind: "pattern",
        summary: "every target is a string matching {\"regex\": ...}",
        construct: text::pattern,
    },
    Builtin {
        kind: "one-of",
        summary: "every target equals one of {\"values\": [...]}",
        construct: membership::one_of,
    },
    Builtin {
        kind: "equals",
        summary: "every target equals {\"value\": ...}",
        construct: membership::equals,
    },
];

/// Registers every built-in module under its kind.
pub fn register_defaults(catalog: &mut ModuleCatalog) {
    for builtin in BUILTINS {
        catalog.register(builtin.kind, *builtin);
    }
}

/// A catalog holding the built-in modules.
#[must_use]
pub fn catalog() -> ModuleCatalog {
    let mut catalog = ModuleCatalog::new();
    register_defaults(&mut catalog);
    catalog
}

/// Runs `check` on every target and reports failures.
///
/// `check` receives the addressed node (`None` if absent) and returns a
/// failure message, or `None` when the target passes.
pub(crate) fn check_targets<F>(
    code: &str,
    entity: &Value,
    path: &Path,
    targets: &[Value],
    feedback: &mut FeedbackLog,
    check: F,
) -> Result<Status>
where
    F: Fn(Option<&Value>) -> Option<String>,
{
    let mut passed = true;
    for target in targets {
        let relative = target_path(code, target)?;
        if let Some(message) = check(entity.get_path(&relative)) {
            passed = false;
            let absolute = path.join(Some(&relative));
            feedback.push(Feedback::new(code, message).with_path(absolute.as_str()));
        }
    }
    Ok(Status::from_check(passed))
}

fn target_path(code: &str, target: &Value) -> Result<String> {
    match target {
        Value::String(s) => Ok(s.to_string()),
        Value::Int(n) => Ok(n.to_string()),
        other => Err(Error::type_mismatch(
            format!("{code} target path"),
            other.type_name(),
        )),
    }
}

/// Message for a target that is not in the document.
pub(crate) const MISSING: &str = "value is missing";
