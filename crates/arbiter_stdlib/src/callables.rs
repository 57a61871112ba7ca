//! Host callables for `run` statements.
//!
//! - `log(level, message)`: emits a tracing event under the
//!   `arbiter::script` target. Levels are `trace`, `debug`, `info`, `warn`
//!   and `error`.
//! - `require(value, message)`: fails the run when `value` is null.
//!
//! Both return `null`.

use arbiter_engine::SymbolTable;
use arbiter_foundation::{Error, ErrorKind, NativeFn, Result, Value};
use tracing::{debug, error, info, trace, warn};

/// Name of the logging callable.
pub const LOG: &str = "log";
/// Name of the null-guard callable.
pub const REQUIRE: &str = "require";

fn failed(name: &str, message: impl Into<String>) -> Error {
    Error::new(ErrorKind::CallableFailed {
        name: name.to_string(),
        message: message.into(),
    })
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

fn log(args: &[Value]) -> Result<Value> {
    let (level, message) = match args {
        [level, message, ..] => (level, text(message)),
        _ => return Err(failed(LOG, "expected a level and a message")),
    };
    match level.as_str() {
        Some("trace") => trace!(target: "arbiter::script", "{message}"),
        Some("debug") => debug!(target: "arbiter::script", "{message}"),
        Some("info") => info!(target: "arbiter::script", "{message}"),
        Some("warn") => warn!(target: "arbiter::script", "{message}"),
        Some("error") => error!(target: "arbiter::script", "{message}"),
        _ => return Err(failed(LOG, format!("unknown level {level}"))),
    }
    Ok(Value::Null)
}

fn require(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Null, message, ..] => Err(failed(REQUIRE, text(message))),
        [_, ..] => Ok(Value::Null),
        [] => Err(failed(REQUIRE, "expected a value")),
    }
}

/// Defines `log` and `require` in `symbols`.
pub fn install_callables(symbols: &mut SymbolTable) {
    symbols.define_fn(NativeFn::new(LOG, log));
    symbols.define_fn(NativeFn::new(REQUIRE, require));
}
