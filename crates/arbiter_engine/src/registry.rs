//! Module registry: which script names are bound in which scopes.
//!
//! A [`RegistryConfig`] is plain data, normally loaded from JSON:
//!
//! ```json
//! {
//!   "modules": { "exists": "exists", "sku-format": "pattern" },
//!   "scopes":  { ".items": { "qty": "range" } }
//! }
//! ```
//!
//! `modules` binds script names to catalog kinds in the root frame. Each
//! `scopes` entry binds names in any frame whose path equals the key. Keys
//! are normalized like frame paths, so `"items"`, `".items"` and `"items."`
//! are the same scope. [`Registry::build`] resolves kinds against a [`ModuleCatalog`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use arbiter_foundation::{Error, ErrorKind, Path, Result};
use serde::{Deserialize, Serialize};

use crate::module::{ModuleBinding, ModuleCatalog};

/// Name to kind bindings, as written in configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Root-frame bindings: script name to catalog kind.
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
    /// Per-path bindings: frame path to (script name to catalog kind).
    #[serde(default)]
    pub scopes: BTreeMap<String, BTreeMap<String, String>>,
}

impl RegistryConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::invalid_config(e.to_string()))
    }

    /// Binds every catalog kind under its own name at the root.
    #[must_use]
    pub fn identity(catalog: &ModuleCatalog) -> Self {
        Self {
            modules: catalog
                .iter()
                .map(|(kind, _)| (kind.to_string(), kind.to_string()))
                .collect(),
            scopes: BTreeMap::new(),
        }
    }

    /// Builder method adding a root binding.
    #[must_use]
    pub fn with_module(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.modules.insert(name.into(), kind.into());
        self
    }

    /// Builder method adding a scoped binding.
    #[must_use]
    pub fn with_scoped(
        mut self,
        path: &str,
        name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        self.scopes
            .entry(scope_key(path))
            .or_default()
            .insert(name.into(), kind.into());
        self
    }
}

/// Normalizes a scope key to the frame path form (`.a.b`).
fn scope_key(path: &str) -> String {
    Path::root().join(Some(path)).as_str().to_string()
}

/// Resolved bindings, ready to install into frames.
#[derive(Clone, Default)]
pub struct Registry {
    root: Vec<(String, ModuleBinding)>,
    scopes: HashMap<String, Vec<(String, ModuleBinding)>>,
}

impl Registry {
    /// Creates a registry with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every kind named in `config` against `catalog`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first unknown kind.
    pub fn build(config: &RegistryConfig, catalog: &ModuleCatalog) -> Result<Self> {
        let resolve = |bindings: &BTreeMap<String, String>| -> Result<Vec<(String, ModuleBinding)>> {
            bindings
                .iter()
                .map(|(name, kind)| {
                    catalog
                        .get(kind)
                        .map(|factory| (name.clone(), factory.clone()))
                        .ok_or_else(|| {
                            Error::new(ErrorKind::InvalidConfig(format!(
                                "module '{name}' refers to unknown kind '{kind}'"
                            )))
                        })
                })
                .collect()
        };

        let root = resolve(&config.modules)?;
        let mut scopes = HashMap::new();
        for (path, bindings) in &config.scopes {
            scopes.insert(scope_key(path), resolve(bindings)?);
        }
        Ok(Self { root, scopes })
    }

    /// Binds every catalog kind under its own name at the root.
    #[must_use]
    pub fn identity(catalog: &ModuleCatalog) -> Self {
        Self {
            root: catalog
                .iter()
                .map(|(kind, factory)| (kind.to_string(), factory.clone()))
                .collect(),
            scopes: HashMap::new(),
        }
    }

    /// Adds a root binding.
    pub fn bind(&mut self, name: impl Into<String>, binding: ModuleBinding) {
        self.root.push((name.into(), binding));
    }

    /// Adds a binding for frames at `path`.
    pub fn bind_scoped(&mut self, path: &str, name: impl Into<String>, binding: ModuleBinding) {
        self.scopes
            .entry(scope_key(path))
            .or_default()
            .push((name.into(), binding));
    }

    /// Root-frame bindings.
    #[must_use]
    pub fn root(&self) -> &[(String, ModuleBinding)] {
        &self.root
    }

    /// Bindings for frames at `path`, if any.
    #[must_use]
    pub fn scope(&self, path: &str) -> Option<&[(String, ModuleBinding)]> {
        self.scopes.get(path).map(Vec::as_slice)
    }

    /// Names bound at the root, in binding order.
    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.root.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scopes: BTreeMap<_, Vec<_>> = self
            .scopes
            .iter()
            .map(|(path, bindings)| (path, bindings.iter().map(|(n, _)| n).collect()))
            .collect();
        f.debug_struct("Registry")
            .field("root", &self.root_names().collect::<Vec<_>>())
            .field("scopes", &scopes)
            .finish()
    }
}
