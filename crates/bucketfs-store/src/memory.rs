//! In-memory bucket backend.
//!
//! [`MemoryBucket`] keeps objects in a sorted map and implements every store
//! primitive with the semantics of a hosted object store: prefix filtering,
//! delimiter roll-up, opaque cursors, a 1000-entry page cap, and idempotent
//! batch deletes capped at 1000 keys per call.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use bucketfs_core::MAX_DELETE_CHUNK_SIZE;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use parking_lot::RwLock;
use tracing::debug;

use crate::capability::{Deleter, Lister, Writer};
use crate::cursor::{CursorPosition, decode_cursor, encode_cursor};
use crate::error::StoreError;
use crate::model::{ListRequest, ObjectEntry, Page};

/// Largest page a single `list` call returns.
pub const MAX_LIST_LIMIT: usize = 1000;

#[derive(Debug, Clone)]
struct StoredObject {
    body: Bytes,
    etag: String,
    uploaded_at: DateTime<Utc>,
    content_type: String,
}

impl StoredObject {
    fn entry(&self, key: &str) -> ObjectEntry {
        ObjectEntry {
            key: key.to_owned(),
            size: self.body.len() as u64,
            uploaded_at: self.uploaded_at,
            etag: self.etag.clone(),
            content_type: Some(self.content_type.clone()),
        }
    }
}

/// Thread-safe in-memory object store.
#[derive(Debug, Default)]
pub struct MemoryBucket {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryBucket {
    /// Create an empty bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Whether the bucket holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Whether an object exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().contains_key(key)
    }

    /// Fetch an object's body and listing snapshot.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<(Bytes, ObjectEntry)> {
        self.objects
            .read()
            .get(key)
            .map(|obj| (obj.body.clone(), obj.entry(key)))
    }

    /// All keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.objects.read().keys().cloned().collect()
    }
}

#[async_trait]
impl Lister for MemoryBucket {
    async fn list(&self, request: &ListRequest) -> Result<Page, StoreError> {
        let position = request.cursor.as_deref().map(decode_cursor).transpose()?;
        let limit = request
            .limit
            .unwrap_or(MAX_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        let objects = self.objects.read();
        let page = list_from_btree(
            &objects,
            &request.prefix,
            request.delimiter.as_deref().filter(|d| !d.is_empty()),
            position.as_ref(),
            limit,
        );
        drop(objects);

        debug!(
            prefix = %request.prefix,
            objects = page.objects.len(),
            prefixes = page.delimited_prefixes.len(),
            truncated = page.truncated,
            "memory bucket list completed"
        );
        Ok(page)
    }
}

#[async_trait]
impl Writer for MemoryBucket {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::WriteRejected {
                key: key.to_owned(),
                message: "object key must not be empty".to_owned(),
            });
        }
        let etag = format!("\"{}\"", hex::encode(Md5::digest(&body)));
        let size = body.len();
        self.objects.write().insert(
            key.to_owned(),
            StoredObject {
                body,
                etag,
                uploaded_at: Utc::now(),
                content_type: content_type.to_owned(),
            },
        );
        debug!(key = %key, size, "memory bucket put completed");
        Ok(())
    }
}

#[async_trait]
impl Deleter for MemoryBucket {
    async fn delete(&self, keys: &[String]) -> Result<usize, StoreError> {
        if keys.len() > MAX_DELETE_CHUNK_SIZE {
            return Err(StoreError::BatchTooLarge {
                size: keys.len(),
                limit: MAX_DELETE_CHUNK_SIZE,
            });
        }
        let mut objects = self.objects.write();
        let removed = keys
            .iter()
            .filter(|key| objects.remove(key.as_str()).is_some())
            .count();
        drop(objects);
        debug!(requested = keys.len(), removed, "memory bucket delete completed");
        Ok(removed)
    }
}

/// Produce one listing page from a sorted map.
///
/// Objects and rolled-up prefixes both count toward `limit`. The page is
/// truncated only when at least one more entry exists past the limit.
fn list_from_btree(
    objects: &BTreeMap<String, StoredObject>,
    prefix: &str,
    delimiter: Option<&str>,
    position: Option<&CursorPosition>,
    limit: usize,
) -> Page {
    let lower = match position {
        Some(CursorPosition::Key(key) | CursorPosition::Prefix(key)) => {
            Bound::Excluded(key.as_str())
        }
        None => Bound::Included(prefix),
    };
    let skip_under = match position {
        Some(CursorPosition::Prefix(p)) => Some(p.as_str()),
        _ => None,
    };

    let mut page = Page::default();
    let mut last: Option<CursorPosition> = None;
    let mut count = 0usize;

    for (key, obj) in objects.range::<str, _>((lower, Bound::Unbounded)) {
        if !key.starts_with(prefix) {
            if key.as_str() > prefix {
                break;
            }
            continue;
        }
        if skip_under.is_some_and(|p| key.starts_with(p)) {
            continue;
        }

        if let Some(delim) = delimiter {
            let after_prefix = &key[prefix.len()..];
            if let Some(pos) = after_prefix.find(delim) {
                let rolled = format!("{prefix}{}{delim}", &after_prefix[..pos]);
                if matches!(&last, Some(CursorPosition::Prefix(p)) if *p == rolled) {
                    continue;
                }
                if count >= limit {
                    page.truncated = true;
                    break;
                }
                page.delimited_prefixes.push(rolled.clone());
                last = Some(CursorPosition::Prefix(rolled));
                count += 1;
                continue;
            }
        }

        if count >= limit {
            page.truncated = true;
            break;
        }
        page.objects.push(obj.entry(key));
        last = Some(CursorPosition::Key(key.clone()));
        count += 1;
    }

    if page.truncated {
        page.cursor = last.as_ref().map(encode_cursor);
    }
    page
}
