//! Session, REPL, and CLI support for Arbiter rule scripts.
//!
//! This crate provides:
//! - [`Session`] - Document, module registry, and symbols shared across inputs
//! - [`Repl`] - Interactive read-eval-print loop over a [`LineEditor`]
//! - [`ArbiterHighlighter`] - Scanner-driven syntax highlighting
//! - [`init_logging`] - `tracing` subscriber setup for binaries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod highlight;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::ArbiterHighlighter;
pub use repl::{Outcome, Repl};
pub use session::{Session, render_error, render_report};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ARBITER_LOG";

/// Installs a `tracing` subscriber writing to stderr.
///
/// The filter comes from `ARBITER_LOG` when set, otherwise `default_level`.
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
