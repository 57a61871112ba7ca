//! Per-run symbol table used by `def` and `run`.
//!
//! The table is an ordinary value owned by whoever drives a run, never a
//! process-wide global, so concurrent runs stay isolated. It is independent
//! of the lexical symbols kept in each [`Frame`](crate::Frame).

use std::collections::HashMap;

use arbiter_foundation::{Error, NativeFn, Result, Value};
use arbiter_language::Bindings;

use crate::config::VariableResolution;

/// Flat name to value store. Last write wins.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    bindings: HashMap<String, Value>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any previous value.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Binds a native callable under its own name.
    pub fn define_fn(&mut self, func: NativeFn) {
        let name = func.name.to_string();
        self.define(name, Value::Fn(func));
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns true if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Removes a binding, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings sorted by name.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// A view for term evaluation with the given unbound-name policy.
    #[must_use]
    pub const fn resolver(&self, resolution: VariableResolution) -> Resolver<'_> {
        Resolver {
            symbols: self,
            resolution,
        }
    }
}

/// Read-only [`Bindings`] over a [`SymbolTable`].
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    symbols: &'a SymbolTable,
    resolution: VariableResolution,
}

impl Bindings for Resolver<'_> {
    fn lookup(&self, name: &str) -> Result<Value> {
        match (self.symbols.get(name), self.resolution) {
            (Some(value), _) => Ok(value.clone()),
            (None, VariableResolution::Lenient) => Ok(Value::Null),
            (None, VariableResolution::Strict) => Err(Error::undefined_symbol(name)),
        }
    }
}
