//! Deduplicated key collections and browse selections.

use std::collections::BTreeSet;

use bucketfs_core::{FolderPrefix, ObjectKey};
use serde::Serialize;

use crate::error::VfsError;

/// A set of object keys with no duplicates.
///
/// Iteration order is sorted, which keeps delete chunk boundaries
/// reproducible; callers must not attach meaning to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeySet {
    keys: BTreeSet<String>,
}

impl KeySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key; returns `false` if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    /// Whether the set holds `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate the keys.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Consume the set into a vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.keys.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for KeySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.keys.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for KeySet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

/// A browse selection split into explicit keys and folder prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected files.
    pub keys: Vec<ObjectKey>,
    /// Selected folders.
    pub prefixes: Vec<FolderPrefix>,
}

impl Selection {
    /// Split raw selected items: entries ending in `/` are folders, the rest
    /// are object keys.
    ///
    /// # Errors
    /// Returns [`VfsError::InvalidInput`] for the first malformed item.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketfs_vfs::keyset::Selection;
    ///
    /// let sel = Selection::partition(["photos/", "docs/cv.pdf"]).unwrap();
    /// assert_eq!(sel.prefixes.len(), 1);
    /// assert_eq!(sel.keys.len(), 1);
    /// ```
    pub fn partition<I, S>(items: I) -> Result<Self, VfsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::default();
        for item in items {
            let item = item.into();
            if item.ends_with('/') {
                selection.prefixes.push(FolderPrefix::new(item)?);
            } else {
                selection.keys.push(ObjectKey::new(item)?);
            }
        }
        Ok(selection)
    }

    /// Build a selection from already separated keys and prefixes.
    ///
    /// # Errors
    /// Returns [`VfsError::InvalidInput`] for the first malformed entry.
    pub fn from_parts<K, P>(keys: K, prefixes: P) -> Result<Self, VfsError>
    where
        K: IntoIterator,
        K::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Ok(Self {
            keys: keys
                .into_iter()
                .map(ObjectKey::new)
                .collect::<Result<_, _>>()?,
            prefixes: prefixes
                .into_iter()
                .map(FolderPrefix::new)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.prefixes.is_empty()
    }

    /// The explicit keys as a [`KeySet`].
    #[must_use]
    pub fn key_set(&self) -> KeySet {
        self.keys.iter().map(ObjectKey::as_str).collect()
    }
}
