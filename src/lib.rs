//! Arbiter - Rule scripts for validating nested documents
//!
//! This crate re-exports all layers of the Arbiter system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: arbiter_runtime    (Session, REPL, CLI)
//! Layer 3: arbiter_stdlib     (Built-in rule modules and callables)
//! Layer 2: arbiter_engine     (Scope stack, module registry, interpreter)
//! Layer 1: arbiter_language   (Scanner, token rules, parser, AST)
//! Layer 0: arbiter_foundation (Core types: Value, Path, Error)
//! ```

pub use arbiter_engine as engine;
pub use arbiter_foundation as foundation;
pub use arbiter_language as language;
pub use arbiter_runtime as runtime;
pub use arbiter_stdlib as stdlib;
