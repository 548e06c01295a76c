//! Data exchanged with the store's listing primitive.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Parameters of a single `list` call.
///
/// # Examples
///
/// ```
/// use bucketfs_store::ListRequest;
///
/// let req = ListRequest::new("photos/").with_delimiter("/").with_limit(100);
/// assert_eq!(req.prefix, "photos/");
/// assert_eq!(req.delimiter.as_deref(), Some("/"));
/// assert!(req.cursor.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    /// Only keys starting with this prefix are returned. Empty lists the bucket root.
    pub prefix: String,
    /// Opaque continuation cursor from a previous page of the same query.
    pub cursor: Option<String>,
    /// When set, keys are grouped at the next occurrence of the delimiter.
    pub delimiter: Option<String>,
    /// Maximum number of entries (objects plus delimited prefixes) in the page.
    pub limit: Option<usize>,
}

impl ListRequest {
    /// Create a request for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Sets the continuation cursor.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Sets the delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Sets the page limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Snapshot of one object as returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEntry {
    /// Full object key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// When the object was written.
    pub uploaded_at: DateTime<Utc>,
    /// Entity tag (quoted MD5 hex for single-part uploads).
    pub etag: String,
    /// Content type recorded at upload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// One page of a listing.
///
/// `truncated == false` is the only termination signal; a page may be empty
/// and still truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Objects in this page, in store order.
    pub objects: Vec<ObjectEntry>,
    /// Immediate child prefixes when the listing used a delimiter.
    pub delimited_prefixes: Vec<String>,
    /// Cursor for the next page, present when `truncated`.
    pub cursor: Option<String>,
    /// Whether more entries remain.
    pub truncated: bool,
}
