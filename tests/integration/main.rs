//! Integration tests for the full stack
//!
//! Scripts run end to end: parsed in the configured dialect, executed with
//! the built-in modules and callables, and reported through a session.

mod concurrency;
mod validation;

use arbiter_engine::{EngineConfig, Interpreter, Registry, RunReport, SymbolTable};
use arbiter_foundation::{Result, Value};
use arbiter_language::parse_with;

/// Parses JSON test data.
pub fn doc(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

/// Runs `source` against `document` with the built-in modules and callables.
pub fn validate(source: &str, document: &Value) -> Result<RunReport> {
    validate_with(source, document, EngineConfig::default())
}

pub fn validate_with(source: &str, document: &Value, config: EngineConfig) -> Result<RunReport> {
    let registry = Registry::identity(&arbiter_stdlib::catalog());
    let mut symbols = SymbolTable::new();
    arbiter_stdlib::install_callables(&mut symbols);
    let program = parse_with(source, config.dialect)?;
    Interpreter::new(&registry, config).run(&program, document.clone(), &mut symbols)
}

/// `(code, path)` of every finding.
pub fn findings(report: &RunReport) -> Vec<(&str, &str)> {
    report
        .feedback
        .iter()
        .map(|f| (f.code.as_str(), f.paths.first().map_or("", String::as_str)))
        .collect()
}
