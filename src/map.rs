//! The flat path map.

use crate::tree::Tree;
use indexmap::IndexMap;
use serde::Serialize;

/// An ordered mapping from dot-joined paths to leaf values.
///
/// Values are scalars, or an empty `Seq` / empty `Record` standing for an empty container.
/// Flattening only emits maximal paths, so no key is a strict path-prefix of another.
///
/// `==` compares as a map (order-insensitive); use [`FlatMap::eq_ordered`] to include order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatMap(IndexMap<String, Tree>);

impl FlatMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up a flat key.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.0.get(key)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts or replaces an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Tree) -> Option<Tree> {
        self.0.insert(key.into(), value)
    }

    /// Iterates entries in map order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Tree> {
        self.0.iter()
    }

    /// Iterates keys in map order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Tree> {
        self.0.keys()
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Tree) -> bool) {
        self.0.retain(|k, v| keep(k, v));
    }

    /// Reorders entries by the lexicographic order of their keys.
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }

    /// Entry-by-entry comparison that also requires the same order.
    pub fn eq_ordered(&self, other: &FlatMap) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }

    /// Unwraps the underlying map.
    pub fn into_inner(self) -> IndexMap<String, Tree> {
        self.0
    }
}

impl<K: Into<String>, V: Into<Tree>> FromIterator<(K, V)> for FlatMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, Tree);
    type IntoIter = indexmap::map::IntoIter<String, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlatMap {
    type Item = (&'a String, &'a Tree);
    type IntoIter = indexmap::map::Iter<'a, String, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
