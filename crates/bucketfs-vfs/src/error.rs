//! Error taxonomy for virtual-filesystem operations.
//!
//! Every store failure is surfaced with the context a caller needs to decide
//! between retrying and aborting: the prefix being listed, the chunk that
//! failed, and how much work completed before it.

use bucketfs_core::BucketFsError;
use bucketfs_store::StoreError;

/// Virtual-filesystem error type.
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    /// The binding name is absent or does not expose the store primitives.
    #[error("binding {binding:?} is not configured or is not an object store")]
    BindingNotFound {
        /// The unresolved binding name.
        binding: String,
    },

    /// A listing call failed; nothing accumulated so far is returned.
    #[error("listing failed under prefix {prefix:?} after {pages_fetched} page(s): {source}")]
    ListingFailed {
        /// Prefix whose listing was in progress.
        prefix: String,
        /// Pages successfully fetched before the failure.
        pages_fetched: usize,
        /// Underlying store error.
        source: StoreError,
    },

    /// A delete chunk failed after earlier chunks succeeded.
    #[error(
        "delete stopped at chunk {failed_at_chunk}: {deleted_count} of {requested} key(s) deleted: {source}"
    )]
    DeletePartial {
        /// Keys removed by the chunks that completed.
        deleted_count: usize,
        /// Zero-based index of the failed chunk.
        failed_at_chunk: usize,
        /// Size of the deduplicated key set that was requested.
        requested: usize,
        /// Underlying store error.
        source: StoreError,
    },

    /// Malformed input rejected before any store call.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong.
        message: String,
    },

    /// The store refused or failed to write an object.
    #[error("write failed for key {key:?}: {source}")]
    WriteFailed {
        /// Key being written.
        key: String,
        /// Underlying store error.
        source: StoreError,
    },
}

impl VfsError {
    /// Shorthand for [`VfsError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BindingNotFound { .. } => "BindingNotFound",
            Self::ListingFailed { .. } => "ListingFailed",
            Self::DeletePartial { .. } => "DeletePartial",
            Self::InvalidInput { .. } => "InvalidInput",
            Self::WriteFailed { .. } => "WriteFailed",
        }
    }

    /// Whether re-invoking the same operation from scratch may succeed.
    ///
    /// A partial delete is not retryable as-is: the caller must re-derive the
    /// remaining keys first.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ListingFailed { .. } => true,
            Self::WriteFailed { source, .. } => {
                matches!(source, StoreError::StoreUnavailable { .. })
            }
            Self::BindingNotFound { .. } | Self::DeletePartial { .. } | Self::InvalidInput { .. } => {
                false
            }
        }
    }
}

impl From<BucketFsError> for VfsError {
    fn from(err: BucketFsError) -> Self {
        Self::invalid_input(err.to_string())
    }
}
