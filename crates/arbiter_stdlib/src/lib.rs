//! Built-in rule modules and callables for Arbiter rule scripts.
//!
//! This crate provides:
//! - [`modules`] - The built-in module kinds (`exists`, `type`, `range`,
//!   `length`, `pattern`, `one-of`, `equals`) and a catalog holding them
//! - [`callables`] - Host functions for `run` (`log`, `require`)
//!
//! # Example
//!
//! ```
//! use arbiter_engine::{EngineConfig, Interpreter, Registry, Status, SymbolTable};
//! use arbiter_foundation::{LtMap, Value};
//! use arbiter_language::parse;
//!
//! let registry = Registry::identity(&arbiter_stdlib::catalog());
//! let mut symbols = SymbolTable::new();
//! arbiter_stdlib::install_callables(&mut symbols);
//!
//! let document: LtMap<Value> = [("age", Value::Int(42))].into_iter().collect();
//! let program = parse(r#"eval("range", ["age"], {"min": 18})."#).unwrap();
//! let report = Interpreter::new(&registry, EngineConfig::default())
//!     .run(&program, Value::Map(document), &mut symbols)
//!     .unwrap();
//! assert_eq!(report.status, Status::Success);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod callables;
pub mod modules;
mod policy;

pub use callables::install_callables;
pub use modules::{BUILTINS, Builtin, catalog, register_defaults};
