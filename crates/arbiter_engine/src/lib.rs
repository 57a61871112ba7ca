//! Scope stack, module registry, and interpreter for Arbiter rule scripts.
//!
//! This crate provides:
//! - [`Status`] / [`Feedback`] - Rule outcomes and findings
//! - [`SymbolTable`] - Per-run store used by `def` and `run`
//! - [`Context`] - Stack of [`Frame`]s narrowing the document by path
//! - [`Module`] / [`ModuleFactory`] / [`ModuleCatalog`] - Pluggable rule evaluators
//! - [`Registry`] - Name bindings per scope, built from [`RegistryConfig`]
//! - [`Interpreter`] - Executes statements and programs
//!
//! # Example
//!
//! ```
//! use arbiter_engine::{EngineConfig, Interpreter, Registry, Status, SymbolTable};
//! use arbiter_foundation::Value;
//! use arbiter_language::parse;
//!
//! let registry = Registry::new();
//! let program = parse("def(limit, 10). seq() {}").unwrap();
//! let mut symbols = SymbolTable::new();
//! let report = Interpreter::new(&registry, EngineConfig::default())
//!     .run(&program, Value::Null, &mut symbols)
//!     .unwrap();
//! assert_eq!(report.status, Status::Success);
//! assert_eq!(symbols.get("limit"), Some(&Value::Int(10)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod context;
pub mod feedback;
pub mod interpreter;
pub mod module;
pub mod policy;
pub mod registry;
pub mod status;
pub mod symbols;

pub use config::{EngineConfig, VariableResolution};
pub use context::{Context, Frame};
pub use feedback::{Feedback, FeedbackLog};
pub use interpreter::{Interpreter, RunReport};
pub use module::{Module, ModuleBinding, ModuleCatalog, ModuleFactory};
pub use policy::ParPolicy;
pub use registry::{Registry, RegistryConfig};
pub use status::Status;
pub use symbols::{Resolver, SymbolTable};
