//! Recursive prefix resolver.
//!
//! Expands folder prefixes into every object key stored beneath them. All
//! prefixes feed one shared [`KeySet`], so an object reachable from two
//! overlapping prefixes is counted once.

use bucketfs_core::FolderPrefix;
use tracing::debug;

use crate::error::VfsError;
use crate::keyset::KeySet;
use crate::lister::PaginatedLister;
use crate::observer::VfsEvent;

/// Expands folder prefixes into object keys.
#[derive(Debug, Clone)]
pub struct PrefixResolver {
    lister: PaginatedLister,
}

impl PrefixResolver {
    /// Create a resolver driving `lister`.
    #[must_use]
    pub fn new(lister: PaginatedLister) -> Self {
        Self { lister }
    }

    /// Resolve every prefix, in order, into one deduplicated key set.
    ///
    /// Prefixes are listed one after another; an empty folder contributes no
    /// keys and is not an error.
    ///
    /// # Errors
    /// The first [`VfsError::ListingFailed`] aborts the resolution and the
    /// partially built set is discarded.
    pub async fn resolve(&self, prefixes: &[FolderPrefix]) -> Result<KeySet, VfsError> {
        let mut keys = KeySet::new();
        self.resolve_into(prefixes, &mut keys).await?;
        Ok(keys)
    }

    /// Resolve `prefixes` and add the keys to an existing set.
    ///
    /// # Errors
    /// Same as [`resolve`](Self::resolve).
    pub async fn resolve_into(
        &self,
        prefixes: &[FolderPrefix],
        keys: &mut KeySet,
    ) -> Result<(), VfsError> {
        for prefix in prefixes {
            let found = self.lister.collect_keys(prefix.as_str(), keys).await?;
            self.lister.observer().record(&VfsEvent::PrefixResolved {
                prefix: prefix.as_str().to_owned(),
                keys: found,
            });
        }
        debug!(
            binding = %self.lister.store().name(),
            prefixes = prefixes.len(),
            count = keys.len(),
            "resolved folder prefixes"
        );
        Ok(())
    }
}
