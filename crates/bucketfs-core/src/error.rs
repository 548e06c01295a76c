//! Error types for the BucketFS core.

/// Core error type for BucketFS infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum BucketFsError {
    /// An object key failed validation.
    #[error("invalid object key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A folder prefix failed validation.
    #[error("invalid folder prefix {prefix:?}: {reason}")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
