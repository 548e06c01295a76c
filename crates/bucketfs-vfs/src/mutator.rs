//! Bulk mutator: chunked deletion over an arbitrarily large key set.
//!
//! The store caps how many keys one delete call may carry, so the key set
//! is split into fixed-size chunks submitted one after another. Chunks are
//! independent: a failure stops the run and reports how far it got, but
//! nothing already deleted is restored.

use bucketfs_core::{FolderPrefix, MAX_DELETE_CHUNK_SIZE};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::VfsError;
use crate::keyset::{KeySet, Selection};
use crate::lister::PaginatedLister;
use crate::observer::VfsEvent;
use crate::resolver::PrefixResolver;

/// Outcome of a completed bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    /// Distinct keys submitted.
    pub requested: usize,
    /// Keys the store reported as removed. Lower than `requested` when some
    /// keys were already gone.
    pub deleted: usize,
    /// Delete calls issued.
    pub chunks: usize,
}

/// Chunked deleter bound to one store.
#[derive(Debug, Clone)]
pub struct BulkDeleter {
    lister: PaginatedLister,
    chunk_size: usize,
}

impl BulkDeleter {
    /// Create a deleter using the store's maximum chunk size.
    #[must_use]
    pub fn new(lister: PaginatedLister) -> Self {
        Self {
            lister,
            chunk_size: MAX_DELETE_CHUNK_SIZE,
        }
    }

    /// Override the chunk size, clamped to `1..=1000`.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, MAX_DELETE_CHUNK_SIZE);
        self
    }

    /// The effective chunk size.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Expand `prefixes`, merge the result into `keys`, and delete it all.
    ///
    /// # Errors
    /// [`VfsError::ListingFailed`] if a prefix cannot be expanded (nothing is
    /// deleted in that case); [`VfsError::DeletePartial`] if a chunk fails.
    pub async fn delete(
        &self,
        mut keys: KeySet,
        prefixes: &[FolderPrefix],
    ) -> Result<DeleteSummary, VfsError> {
        if !prefixes.is_empty() {
            PrefixResolver::new(self.lister.clone())
                .resolve_into(prefixes, &mut keys)
                .await?;
        }
        self.delete_keys(keys).await
    }

    /// Delete a browse selection.
    ///
    /// # Errors
    /// Same as [`delete`](Self::delete).
    pub async fn delete_selection(&self, selection: &Selection) -> Result<DeleteSummary, VfsError> {
        self.delete(selection.key_set(), &selection.prefixes).await
    }

    /// Delete `keys` in chunks. An empty set issues no store call.
    ///
    /// # Errors
    /// [`VfsError::DeletePartial`] carrying the failed chunk index and the
    /// count deleted before it.
    pub async fn delete_keys(&self, keys: KeySet) -> Result<DeleteSummary, VfsError> {
        let store = self.lister.store();
        let observer = self.lister.observer();
        let keys = keys.into_vec();
        let requested = keys.len();
        let mut summary = DeleteSummary {
            requested,
            deleted: 0,
            chunks: 0,
        };

        for (index, chunk) in keys.chunks(self.chunk_size).enumerate() {
            match store.delete(chunk).await {
                Ok(deleted) => {
                    summary.deleted += deleted;
                    summary.chunks += 1;
                    observer.record(&VfsEvent::ChunkDeleted {
                        index,
                        size: chunk.len(),
                        deleted,
                    });
                }
                Err(source) => {
                    observer.record(&VfsEvent::ChunkFailed {
                        index,
                        size: chunk.len(),
                    });
                    warn!(
                        binding = %store.name(),
                        chunk = index,
                        deleted = summary.deleted,
                        requested,
                        error = %source,
                        "bulk delete stopped"
                    );
                    return Err(VfsError::DeletePartial {
                        deleted_count: summary.deleted,
                        failed_at_chunk: index,
                        requested,
                        source,
                    });
                }
            }
        }

        debug!(
            binding = %store.name(),
            requested,
            deleted = summary.deleted,
            chunks = summary.chunks,
            "bulk delete completed"
        );
        Ok(summary)
    }
}
