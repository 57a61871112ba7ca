//! Persistent collections with structural sharing.
//!
//! These are thin wrappers around the `im` crate's persistent data structures.
//! Scope frames hold clones of the document sub-node they narrow to, so
//! cloning must stay O(1) no matter how large the document is.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Persistent vector backing [`Value::Array`](crate::Value::Array).
///
/// Cloning shares the underlying tree; [`LtVec::push_back`] leaves the
/// receiver untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LtVec<T>(im::Vector<T>)
where
    T: Clone;

impl<T: Clone> LtVec<T> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self(im::Vector::new())
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element at `index`, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// A copy of this vector with `value` appended.
    #[must_use]
    pub fn push_back(&self, value: T) -> Self {
        let mut items = self.0.clone();
        items.push_back(value);
        Self(items)
    }

    /// Elements in order.
    pub fn iter(&self) -> im::vector::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for LtVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + Hash> Hash for LtVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.iter().for_each(|item| item.hash(state));
    }
}

impl<T: Clone> FromIterator<T> for LtVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Clone> IntoIterator for LtVec<T> {
    type Item = T;
    type IntoIter = im::vector::ConsumingIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a LtVec<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Persistent string-keyed map that remembers insertion order.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// the key at its original position, so iteration always follows the order
/// in which keys first appeared.
#[derive(Clone)]
pub struct LtMap<V>
where
    V: Clone,
{
    entries: im::Vector<(Arc<str>, V)>,
    index: im::HashMap<Arc<str>, usize>,
}

impl<V: Clone> Default for LtMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> LtMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: im::Vector::new(),
            index: im::HashMap::new(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let position = *self.index.get(key)?;
        self.entries.get(position).map(|(_, v)| v)
    }

    /// Returns true if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns a new map with the key set to `value`.
    #[must_use]
    pub fn insert(&self, key: impl Into<Arc<str>>, value: V) -> Self {
        let mut new = self.clone();
        new.insert_mut(key, value);
        new
    }

    /// Sets the key to `value` in place.
    pub fn insert_mut(&mut self, key: impl Into<Arc<str>>, value: V) {
        let key = key.into();
        if let Some(&position) = self.index.get(&key) {
            self.entries.set(position, (key, value));
        } else {
            self.index.insert(Arc::clone(&key), self.entries.len());
            self.entries.push_back((key, value));
        }
    }

    /// Returns a new map without the key.
    #[must_use]
    pub fn remove(&self, key: &str) -> Self {
        if !self.contains_key(key) {
            return self.clone();
        }
        self.iter()
            .filter(|(k, _)| *k != key)
            .map(|(k, v)| (Arc::<str>::from(k), v.clone()))
            .collect()
    }

    /// Returns an iterator over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }

    /// Returns an iterator over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| &**k)
    }

    /// Returns an iterator over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V: Clone + fmt::Debug> fmt::Debug for LtMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Order-sensitive: two maps with the same entries in a different order differ.
impl<V: Clone + PartialEq> PartialEq for LtMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Clone + Eq> Eq for LtMap<V> {}

impl<V: Clone + Hash> Hash for LtMap<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (k, v) in self.iter() {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: Into<Arc<str>>, V: Clone> FromIterator<(K, V)> for LtMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert_mut(k, v);
        }
        map
    }
}
