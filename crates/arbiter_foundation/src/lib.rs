//! Document values, ordered persistent collections, paths, and errors for Arbiter.
//!
//! This crate provides:
//! - [`Value`] - The document value type scripts evaluate to and validate
//! - [`Path`] - Dotted addressing into nested documents
//! - [`Error`] - Engine error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod path;
pub mod value;

#[cfg(feature = "serde")]
mod serde_impl;

pub use collections::{LtMap, LtVec};
pub use error::{Error, ErrorContext, ErrorKind};
pub use path::Path;
pub use value::{NativeFn, Value};

/// Result type alias using the Arbiter error type.
pub type Result<T> = std::result::Result<T, Error>;
