//! Policy readers shared by the built-in modules.

use arbiter_foundation::{Error, LtMap, Result, Value};

/// Read-only view of a module policy map.
///
/// `None` and `null` read as an empty map.
pub(crate) struct PolicyReader<'a> {
    kind: &'static str,
    map: Option<&'a LtMap<Value>>,
}

impl<'a> PolicyReader<'a> {
    pub(crate) fn new(kind: &'static str, policy: Option<&'a Value>) -> Result<Self> {
        let map = match policy {
            None | Some(Value::Null) => None,
            Some(Value::Map(map)) => Some(map),
            Some(other) => {
                return Err(Error::invalid_policy(format!(
                    "{kind}: policy must be a map, got {}",
                    other.type_name()
                )));
            }
        };
        Ok(Self { kind, map })
    }

    /// Rejects keys outside `allowed`.
    pub(crate) fn only(self, allowed: &[&str]) -> Result<Self> {
        if let Some(map) = self.map {
            if let Some(key) = map.keys().find(|k| !allowed.contains(k)) {
                return Err(self.error(format!("unknown key '{key}'")));
            }
        }
        Ok(self)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key))
    }

    pub(crate) fn require(&self, key: &str) -> Result<&'a Value> {
        self.map
            .filter(|m| m.contains_key(key))
            .and_then(|m| m.get(key))
            .ok_or_else(|| self.error(format!("missing key '{key}'")))
    }

    pub(crate) fn string(&self, key: &str) -> Result<&'a str> {
        let value = self.require(key)?;
        value
            .as_str()
            .ok_or_else(|| self.error(format!("'{key}' must be a string, got {}", value.type_name())))
    }

    pub(crate) fn number(&self, key: &str) -> Result<Option<f64>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_number()
                .map(Some)
                .ok_or_else(|| self.error(format!("'{key}' must be a number, got {value}"))),
        }
    }

    pub(crate) fn count(&self, key: &str) -> Result<Option<usize>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_int()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| {
                    self.error(format!("'{key}' must be a non-negative integer, got {value}"))
                }),
        }
    }

    pub(crate) fn error(&self, message: String) -> Error {
        Error::invalid_policy(format!("{}: {message}", self.kind))
    }
}
