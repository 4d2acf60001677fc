//! Fingerprint sets: relative path to content digest
//!
//! Backed by a `BTreeMap`, so iteration is always in ascending byte order of
//! the relative path. That order is the manifest's line order.

use crate::types::Hash;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Mapping from root-relative path to content digest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintSet {
    entries: BTreeMap<String, Hash>,
}

impl FingerprintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a digest for `path`, returning the previous digest if any
    pub fn insert(&mut self, path: impl Into<String>, hash: Hash) -> Option<Hash> {
        self.entries.insert(path.into(), hash)
    }

    pub fn get(&self, path: &str) -> Option<&Hash> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending path order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Hash> {
        self.entries.iter()
    }

    /// Paths in ascending order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Hash)> for FingerprintSet {
    fn from_iter<I: IntoIterator<Item = (String, Hash)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FingerprintSet {
    type Item = (&'a String, &'a Hash);
    type IntoIter = btree_map::Iter<'a, String, Hash>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
