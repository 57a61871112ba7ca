//! Rule modules and the catalog they are registered in.
//!
//! A [`ModuleFactory`] is what a frame binds under a script-visible name. An
//! `eval` statement resolves the name, constructs a [`Module`] from the
//! evaluated policy, and calls [`Module::process`] once. Factories are shared
//! across frames and must not hold mutable state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use arbiter_foundation::{Path, Result, Value};

use crate::feedback::FeedbackLog;
use crate::status::Status;

/// A configured rule evaluator.
pub trait Module: Send + Sync {
    /// Checks `targets` (paths relative to `entity`).
    ///
    /// `path` is the absolute path of `entity` in the document, used to
    /// report findings.
    ///
    /// # Errors
    /// Reserved for conditions the module cannot evaluate at all. A target
    /// that fails the rule is `Ok(Status::Failed)` plus feedback.
    fn process(
        &self,
        entity: &Value,
        path: &Path,
        targets: &[Value],
        feedback: &mut FeedbackLog,
    ) -> Result<Status>;
}

/// Builds a [`Module`] from an optional policy value.
pub trait ModuleFactory: Send + Sync {
    /// Constructs a module.
    ///
    /// # Errors
    /// Returns `InvalidPolicy` when the policy has the wrong shape.
    fn construct(&self, policy: Option<&Value>) -> Result<Box<dyn Module>>;

    /// One-line description for listings.
    fn summary(&self) -> &str {
        ""
    }
}

impl<F> ModuleFactory for F
where
    F: Fn(Option<&Value>) -> Result<Box<dyn Module>> + Send + Sync,
{
    fn construct(&self, policy: Option<&Value>) -> Result<Box<dyn Module>> {
        self(policy)
    }
}

/// Shared handle to a factory, as stored in frames.
pub type ModuleBinding = Arc<dyn ModuleFactory>;

/// Factories available to registry configuration, keyed by kind.
#[derive(Clone, Default)]
pub struct ModuleCatalog {
    kinds: BTreeMap<String, ModuleBinding>,
}

impl ModuleCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `kind`, replacing any previous one.
    pub fn register(&mut self, kind: impl Into<String>, factory: impl ModuleFactory + 'static) {
        self.kinds.insert(kind.into(), Arc::new(factory));
    }

    /// Returns the factory registered under `kind`.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&ModuleBinding> {
        self.kinds.get(kind)
    }

    /// Returns true if `kind` is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Registered kinds with their factories, sorted by kind.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleBinding)> {
        self.kinds.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl fmt::Debug for ModuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds.keys()).finish()
    }
}
