//! Integration tests for Layer 2: Engine
//!
//! Tests for the scope stack, the module registry, and the interpreter.

mod interpreter;
mod registry;

use arbiter_engine::{
    EngineConfig, Feedback, FeedbackLog, Interpreter, Module, ModuleCatalog, Registry, RunReport,
    Status, SymbolTable,
};
use arbiter_foundation::{Error, Path, Result, Value};
use arbiter_language::parse;

/// Returns the status named by its policy and logs one `ran` entry whose
/// message is the policy's label, so tests can see which statements ran.
///
/// Policy: `"FAILED"` or `{"status": "FAILED", "label": "b"}`; the status
/// defaults to `SUCCESS`.
struct Scripted {
    status: Status,
    label: String,
}

impl Module for Scripted {
    fn process(
        &self,
        _entity: &Value,
        path: &Path,
        _targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status> {
        feedback.push(Feedback::new("ran", self.label.clone()).with_path(path.as_str()));
        Ok(self.status)
    }
}

fn status_named(name: Option<&str>) -> Result<Status> {
    match name {
        None | Some("SUCCESS") => Ok(Status::Success),
        Some("FAILED") => Ok(Status::Failed),
        Some("ACTIVE") => Ok(Status::Active),
        Some(other) => Err(Error::invalid_policy(format!("no status {other}"))),
    }
}

pub fn scripted(policy: Option<&Value>) -> Result<Box<dyn Module>> {
    let (status, label) = match policy {
        Some(Value::Map(map)) => (
            map.get("status").and_then(Value::as_str),
            map.get("label").and_then(Value::as_str).unwrap_or_default(),
        ),
        Some(Value::String(s)) => (Some(&**s), ""),
        _ => (None, ""),
    };
    Ok(Box::new(Scripted {
        status: status_named(status)?,
        label: label.to_string(),
    }))
}

/// A registry binding `step` to [`scripted`] at the root.
pub fn registry() -> Registry {
    let mut catalog = ModuleCatalog::new();
    catalog.register("step", scripted);
    Registry::identity(&catalog)
}

/// Runs `source` with the default configuration.
pub fn run(source: &str, document: Value) -> Result<RunReport> {
    let program = parse(source)?;
    Interpreter::new(&registry(), EngineConfig::default()).run(
        &program,
        document,
        &mut SymbolTable::new(),
    )
}

/// Messages of the `ran` entries, in execution order.
pub fn ran(report: &RunReport) -> Vec<&str> {
    report
        .feedback
        .iter()
        .filter(|f| f.code == "ran")
        .map(|f| f.message.as_str())
        .collect()
}
