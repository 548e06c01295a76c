//! Capability traits for the store primitives.
//!
//! A backend exposes any subset of [`Lister`], [`Writer`] and [`Deleter`].
//! The gateway only hands out a [`StoreHandle`](crate::StoreHandle) for a
//! binding that provides all three.
//!
//! The traits use `#[async_trait]` because the gateway stores them as
//! `Arc<dyn _>` trait objects.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;
use crate::model::{ListRequest, Page};

/// Read capability: paginated listing.
#[async_trait]
pub trait Lister: Send + Sync {
    /// Return one page of entries matching `request`.
    async fn list(&self, request: &ListRequest) -> Result<Page, StoreError>;
}

/// Write capability: store an object.
#[async_trait]
pub trait Writer: Send + Sync {
    /// Write `body` under `key`, replacing any previous object.
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError>;
}

/// Delete capability: remove a batch of keys.
#[async_trait]
pub trait Deleter: Send + Sync {
    /// Remove `keys`. Missing keys are not an error.
    ///
    /// Returns how many of the keys actually existed and were removed.
    async fn delete(&self, keys: &[String]) -> Result<usize, StoreError>;
}
