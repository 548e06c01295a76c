//! Errors raised by the store primitives.
//!
//! These describe transport and store-side failures only. The
//! virtual-filesystem layer wraps them with the context of the operation
//! that was in flight (prefix, chunk index, accumulated count).

/// Store primitive error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or failed to answer.
    #[error("store unavailable: {message}")]
    StoreUnavailable {
        /// Transport or backend detail.
        message: String,
    },

    /// The store refused to write an object.
    #[error("write rejected for key {key:?}: {message}")]
    WriteRejected {
        /// The key that could not be written.
        key: String,
        /// Reason given by the store.
        message: String,
    },

    /// A delete call carried more keys than the store accepts.
    #[error("delete batch of {size} keys exceeds the limit of {limit}")]
    BatchTooLarge {
        /// Number of keys submitted.
        size: usize,
        /// Maximum accepted per call.
        limit: usize,
    },

    /// A listing cursor could not be decoded.
    #[error("invalid listing cursor")]
    InvalidCursor,
}

impl StoreError {
    /// Shorthand for [`StoreError::StoreUnavailable`].
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }
}
