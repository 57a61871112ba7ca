//! Dotted addressing into nested documents.
//!
//! A path is a sequence of segments separated by `.`. The document root has
//! the empty path, and a child is addressed by appending `"." + segment`, so
//! absolute paths read `.order.items.0.sku`. Numeric segments index arrays.
//! Empty segments are ignored, which makes `order.total`, `.order.total` and
//! `order..total` address the same node.

use std::fmt;

/// An absolute or relative dotted path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(String);

impl Path {
    /// The document root (empty path).
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Wraps an existing dotted path string.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns true if this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments().next().is_none()
    }

    /// Returns the underlying dotted string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over non-empty segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        segments(&self.0)
    }

    /// Returns true if `segment` leaves the path unchanged when joined.
    ///
    /// `None`, the empty string, `"."` and any other all-dot string denote
    /// the current node.
    #[must_use]
    pub fn is_transparent(segment: Option<&str>) -> bool {
        segment.is_none_or(|s| segments(s).next().is_none())
    }

    /// Returns the path of `segment` relative to this one.
    ///
    /// The segment may itself be dotted. Empty pieces are dropped, so
    /// `".order"`, `"order."` and `"order"` all join to the same path.
    /// Transparent segments return a copy of this path.
    #[must_use]
    pub fn join(&self, segment: Option<&str>) -> Self {
        let mut joined = self.0.clone();
        for piece in segment.map(segments).into_iter().flatten() {
            joined.push('.');
            joined.push_str(piece);
        }
        Self(joined)
    }
}

/// Iterates over the non-empty segments of a dotted path string.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
