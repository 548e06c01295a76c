//! Single-object upload.
//!
//! Writing a key is the only way a folder comes into existence: uploading
//! `photos/trip/a.jpg` makes `photos/` and `photos/trip/` appear.

use std::sync::Arc;

use bucketfs_core::ObjectKey;
use bucketfs_store::StoreHandle;
use bytes::Bytes;
use mime::Mime;
use serde::Serialize;
use tracing::info;

use crate::error::VfsError;
use crate::observer::{Observer, VfsEvent};

/// What was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    /// The stored key.
    pub key: String,
    /// Body size in bytes.
    pub size: usize,
    /// Content type recorded with the object.
    pub content_type: String,
}

/// Writes objects to one store.
#[derive(Debug, Clone)]
pub struct Uploader {
    store: StoreHandle,
    observer: Arc<dyn Observer>,
    default_content_type: String,
}

impl Uploader {
    /// Create an uploader falling back to `default_content_type`.
    #[must_use]
    pub fn new(
        store: StoreHandle,
        observer: Arc<dyn Observer>,
        default_content_type: impl Into<String>,
    ) -> Self {
        Self {
            store,
            observer,
            default_content_type: default_content_type.into(),
        }
    }

    /// Validate and write one object.
    ///
    /// A missing or blank content type is replaced by the default.
    ///
    /// # Errors
    /// [`VfsError::InvalidInput`] for a malformed key or content type;
    /// [`VfsError::WriteFailed`] if the store rejects the write.
    pub async fn upload(
        &self,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<UploadReceipt, VfsError> {
        let key = ObjectKey::new(key)?;
        let content_type = self.content_type(content_type)?;
        let size = body.len();

        self.store
            .put(key.as_str(), body, &content_type)
            .await
            .map_err(|source| VfsError::WriteFailed {
                key: key.as_str().to_owned(),
                source,
            })?;

        self.observer.record(&VfsEvent::ObjectWritten {
            key: key.as_str().to_owned(),
            size,
        });
        info!(binding = %self.store.name(), key = %key, size, "object uploaded");

        Ok(UploadReceipt {
            key: key.into_inner(),
            size,
            content_type,
        })
    }

    fn content_type(&self, declared: Option<&str>) -> Result<String, VfsError> {
        let raw = declared
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.default_content_type);
        raw.parse::<Mime>()
            .map(|m| m.to_string())
            .map_err(|_| VfsError::invalid_input(format!("invalid content type {raw:?}")))
    }
}
