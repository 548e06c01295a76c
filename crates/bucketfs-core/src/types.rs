//! Validated key and prefix types.
//!
//! Object stores have no directory concept: a "folder" is nothing more than
//! the shared prefix of the keys beneath it. [`ObjectKey`] and
//! [`FolderPrefix`] encode the two shapes a path can take so that malformed
//! input is rejected before any store call is made.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BucketFsError;

/// Maximum object key length in bytes.
pub const MAX_KEY_BYTES: usize = 1024;

/// A non-empty, `/`-delimited object key without a leading `/`.
///
/// The last segment is the file name; everything before it is the folder
/// path.
///
/// # Examples
///
/// ```
/// use bucketfs_core::ObjectKey;
///
/// let key = ObjectKey::new("photos/trip/beach.jpg").unwrap();
/// assert_eq!(key.as_str(), "photos/trip/beach.jpg");
/// assert!(ObjectKey::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Validate and wrap an object key.
    ///
    /// # Errors
    /// Returns [`BucketFsError::InvalidKey`] if the key is empty, starts with
    /// `/`, ends with `/` (that would be a folder prefix), or exceeds
    /// [`MAX_KEY_BYTES`].
    pub fn new(key: impl Into<String>) -> Result<Self, BucketFsError> {
        let key = key.into();
        let reason = if key.is_empty() {
            Some("key must not be empty")
        } else if key.starts_with('/') {
            Some("key must not start with '/'")
        } else if key.ends_with('/') {
            Some("key must not end with '/'")
        } else if key.len() > MAX_KEY_BYTES {
            Some("key exceeds 1024 bytes")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(BucketFsError::InvalidKey { key, reason }),
            None => Ok(Self(key)),
        }
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ObjectKey {
    type Error = BucketFsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectKey> for String {
    fn from(key: ObjectKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A folder prefix: a non-empty string ending in `/`.
///
/// A prefix has no independent existence in the store; it represents zero or
/// more objects whose keys begin with it.
///
/// # Examples
///
/// ```
/// use bucketfs_core::FolderPrefix;
///
/// let prefix = FolderPrefix::new("photos/trip/").unwrap();
/// assert_eq!(prefix.segments(), vec!["photos", "trip"]);
/// assert!(FolderPrefix::new("photos").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FolderPrefix(String);

impl FolderPrefix {
    /// Validate and wrap a folder prefix.
    ///
    /// # Errors
    /// Returns [`BucketFsError::InvalidPrefix`] if the prefix is empty, does
    /// not end with `/`, starts with `/`, contains an empty segment, or
    /// exceeds [`MAX_KEY_BYTES`].
    pub fn new(prefix: impl Into<String>) -> Result<Self, BucketFsError> {
        let prefix = prefix.into();
        let reason = if prefix.is_empty() {
            Some("prefix must not be empty")
        } else if !prefix.ends_with('/') {
            Some("prefix must end with '/'")
        } else if prefix.starts_with('/') {
            Some("prefix must not start with '/'")
        } else if prefix.contains("//") {
            Some("prefix must not contain empty segments")
        } else if prefix.len() > MAX_KEY_BYTES {
            Some("prefix exceeds 1024 bytes")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(BucketFsError::InvalidPrefix { prefix, reason }),
            None => Ok(Self(prefix)),
        }
    }

    /// The prefix as a string slice, including the trailing `/`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments with the trailing `/` stripped.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        self.0[..self.0.len() - 1].split('/').collect()
    }
}

impl TryFrom<String> for FolderPrefix {
    type Error = BucketFsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FolderPrefix> for String {
    fn from(prefix: FolderPrefix) -> Self {
        prefix.0
    }
}

impl AsRef<str> for FolderPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_accept_valid_object_keys() {
        assert!(ObjectKey::new("a").is_ok());
        assert!(ObjectKey::new("photos/2024/image.jpg").is_ok());
        assert!(ObjectKey::new("a".repeat(MAX_KEY_BYTES)).is_ok());
    }

    #[test]
    fn test_should_reject_malformed_object_keys() {
        assert!(ObjectKey::new("").is_err());
        assert!(ObjectKey::new("/leading").is_err());
        assert!(ObjectKey::new("folder/").is_err());
        assert!(ObjectKey::new("a".repeat(MAX_KEY_BYTES + 1)).is_err());
    }

    #[test]
    fn test_should_accept_valid_prefixes() {
        let p = FolderPrefix::new("photos/trip/").unwrap();
        assert_eq!(p.segments(), vec!["photos", "trip"]);
        assert_eq!(p.as_str(), "photos/trip/");
    }

    #[test]
    fn test_should_reject_malformed_prefixes() {
        assert!(FolderPrefix::new("").is_err());
        assert!(FolderPrefix::new("photos").is_err());
        assert!(FolderPrefix::new("/photos/").is_err());
        assert!(FolderPrefix::new("photos//trip/").is_err());
        assert!(FolderPrefix::new("/").is_err());
    }

    #[test]
    fn test_should_deserialize_with_validation() {
        let key: ObjectKey = serde_json::from_str("\"a/b.txt\"").unwrap();
        assert_eq!(key.as_str(), "a/b.txt");
        assert!(serde_json::from_str::<ObjectKey>("\"\"").is_err());
        assert!(serde_json::from_str::<FolderPrefix>("\"nope\"").is_err());
    }
}
