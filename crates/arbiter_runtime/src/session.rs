//! Session state shared by the REPL and the CLI.
//!
//! A session owns the document under validation, the module catalog with
//! the registry configuration built from it, the engine configuration, and
//! a [`SymbolTable`] that persists across evaluations, so a `def` in one
//! REPL input is visible to the next.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use arbiter_engine::{
    EngineConfig, Interpreter, ModuleCatalog, ModuleFactory, Registry, RegistryConfig, RunReport,
    SymbolTable,
};
use arbiter_foundation::{Error, ErrorKind, Result, Value};
use arbiter_language::parse_with;
use tracing::{debug, info};

/// Session state for the REPL and CLI.
pub struct Session {
    /// The document scripts run against.
    document: Value,

    /// Module kinds available to the registry configuration.
    catalog: ModuleCatalog,

    /// Name bindings, as loaded.
    registry_config: RegistryConfig,

    /// Registry built from `registry_config` and `catalog`.
    registry: Registry,

    /// Engine settings for every evaluation.
    config: EngineConfig,

    /// Bindings from `def` plus the built-in callables.
    symbols: SymbolTable,
}

impl Session {
    /// Creates a session with an empty (`null`) document, the built-in
    /// modules bound under their own names, and the built-in callables.
    #[must_use]
    pub fn new() -> Self {
        let catalog = arbiter_stdlib::catalog();
        let registry_config = RegistryConfig::identity(&catalog);
        let registry = Registry::identity(&catalog);
        let mut symbols = SymbolTable::new();
        arbiter_stdlib::install_callables(&mut symbols);
        Self {
            document: Value::Null,
            catalog,
            registry_config,
            registry,
            config: EngineConfig::default(),
            symbols,
        }
    }

    /// Sets the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the document.
    #[must_use]
    pub fn with_document(mut self, document: Value) -> Self {
        self.document = document;
        self
    }

    /// The document scripts run against.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    /// Replaces the document.
    pub fn set_document(&mut self, document: Value) {
        self.document = document;
    }

    /// Parses a JSON document and makes it current.
    ///
    /// # Errors
    /// Returns `Io` if `json` is not valid JSON.
    pub fn set_document_json(&mut self, json: &str) -> Result<()> {
        self.document = serde_json::from_str(json)
            .map_err(|e| Error::new(ErrorKind::Io(format!("invalid JSON document: {e}"))))?;
        Ok(())
    }

    /// Loads the document from a JSON file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read or is not valid JSON.
    pub fn load_document(&mut self, path: &Path) -> Result<()> {
        let json = read(path)?;
        self.set_document_json(&json)
            .map_err(|e| e.in_source(path.display().to_string()))?;
        info!(path = %path.display(), "loaded document");
        Ok(())
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the engine configuration.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// The module catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    /// The registry configuration in effect.
    #[must_use]
    pub const fn registry_config(&self) -> &RegistryConfig {
        &self.registry_config
    }

    /// The registry built from the configuration.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Adds a module kind to the catalog and rebuilds the registry.
    ///
    /// The kind is not bound to any name until a configuration refers to it.
    ///
    /// # Errors
    /// Propagates registry build errors.
    pub fn register_module(
        &mut self,
        kind: impl Into<String>,
        factory: impl ModuleFactory + 'static,
    ) -> Result<()> {
        self.catalog.register(kind, factory);
        self.registry = Registry::build(&self.registry_config, &self.catalog)?;
        Ok(())
    }

    /// Replaces the registry configuration.
    ///
    /// On error the previous configuration stays in effect.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a binding names an unknown kind.
    pub fn set_registry_config(&mut self, config: RegistryConfig) -> Result<()> {
        self.registry = Registry::build(&config, &self.catalog)?;
        self.registry_config = config;
        Ok(())
    }

    /// Loads the registry configuration from a JSON file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read and `InvalidConfig` if its
    /// content is malformed.
    pub fn load_registry(&mut self, path: &Path) -> Result<()> {
        let json = read(path)?;
        let config = RegistryConfig::from_json(&json)
            .map_err(|e| e.in_source(path.display().to_string()))?;
        self.set_registry_config(config)?;
        info!(path = %path.display(), "loaded registry configuration");
        Ok(())
    }

    /// The session's symbols.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Mutable access to the session's symbols.
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Parses and runs `source` against the document.
    ///
    /// # Errors
    /// Returns parse errors and engine errors. Rule failures are reported
    /// in the returned [`RunReport`].
    pub fn eval(&mut self, source: &str) -> Result<RunReport> {
        let program = parse_with(source, self.config.dialect)?;
        debug!(statements = program.statements.len(), "parsed input");
        Interpreter::new(&self.registry, self.config.clone()).run(
            &program,
            self.document.clone(),
            &mut self.symbols,
        )
    }

    /// Reads and runs a script file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read; other errors as for
    /// [`Session::eval`], tagged with the file name.
    pub fn eval_file(&mut self, path: &Path) -> Result<RunReport> {
        let source = read(path)?;
        info!(path = %path.display(), "running script");
        self.eval(&source)
            .map_err(|e| e.in_source(path.display().to_string()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to read {}: {e}",
            path.display()
        )))
    })
}

/// Renders a report as a status line followed by one line per finding.
#[must_use]
pub fn render_report(report: &RunReport) -> String {
    let mut out = report.status.to_string();
    for entry in &report.feedback {
        let _ = write!(out, "\n  {entry}");
    }
    out
}

/// Renders an error with its source position and frame stack, if any.
#[must_use]
pub fn render_error(error: &Error) -> String {
    let mut out = format!("Error: {error}");
    if let Some(context) = &error.context {
        let context = context.to_string();
        if !context.is_empty() {
            if !context.starts_with('\n') {
                out.push(' ');
            }
            out.push_str(context.trim_end());
        }
    }
    out
}
