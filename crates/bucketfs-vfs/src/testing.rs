//! Scripted store doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bucketfs_store::{
    Binding, Deleter, ListRequest, Lister, MemoryBucket, ObjectEntry, Page, StoreError,
    StoreGateway, StoreHandle, Writer,
};
use bytes::Bytes;
use chrono::Utc;
use parking_lot::Mutex;

use crate::observer::{Observer, VfsEvent};

/// Store that replays scripted listing pages and records every call.
#[derive(Debug, Default)]
pub(crate) struct ScriptedStore {
    pages: Mutex<VecDeque<Result<Page, StoreError>>>,
    pub(crate) list_calls: Mutex<Vec<ListRequest>>,
    pub(crate) delete_batches: Mutex<Vec<usize>>,
    fail_delete_at: Option<usize>,
    delete_calls: AtomicUsize,
}

impl ScriptedStore {
    pub(crate) fn with_pages(pages: Vec<Result<Page, StoreError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub(crate) fn failing_delete_at(index: usize) -> Self {
        Self {
            fail_delete_at: Some(index),
            ..Self::default()
        }
    }

    pub(crate) fn list_call_count(&self) -> usize {
        self.list_calls.lock().len()
    }
}

#[async_trait]
impl Lister for ScriptedStore {
    async fn list(&self, request: &ListRequest) -> Result<Page, StoreError> {
        self.list_calls.lock().push(request.clone());
        self.pages
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(StoreError::unavailable("script exhausted")))
    }
}

#[async_trait]
impl Writer for ScriptedStore {
    async fn put(&self, key: &str, _body: Bytes, _content_type: &str) -> Result<(), StoreError> {
        Err(StoreError::WriteRejected {
            key: key.to_owned(),
            message: "read-only script".to_owned(),
        })
    }
}

#[async_trait]
impl Deleter for ScriptedStore {
    async fn delete(&self, keys: &[String]) -> Result<usize, StoreError> {
        let call = self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete_at == Some(call) {
            return Err(StoreError::unavailable("connection reset"));
        }
        self.delete_batches.lock().push(keys.len());
        Ok(keys.len())
    }
}

/// Observer that keeps every event for assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    pub(crate) events: Mutex<Vec<VfsEvent>>,
}

impl Observer for RecordingObserver {
    fn record(&self, event: &VfsEvent) {
        self.events.lock().push(event.clone());
    }
}

pub(crate) fn entry(key: &str) -> ObjectEntry {
    ObjectEntry {
        key: key.to_owned(),
        size: 1,
        uploaded_at: Utc::now(),
        etag: format!("\"{key}\""),
        content_type: None,
    }
}

pub(crate) fn page(keys: &[&str], truncated: bool, cursor: Option<&str>) -> Page {
    Page {
        objects: keys.iter().map(|k| entry(k)).collect(),
        delimited_prefixes: Vec::new(),
        cursor: cursor.map(str::to_owned),
        truncated,
    }
}

pub(crate) fn handle_for<S>(store: Arc<S>) -> StoreHandle
where
    S: Lister + Writer + Deleter + 'static,
{
    let gateway = StoreGateway::new();
    gateway.register("TEST", Binding::bucket(store));
    gateway
        .resolve("TEST")
        .into_handle()
        .expect("full-capability binding resolves")
}

pub(crate) async fn memory_with(keys: &[&str]) -> Arc<MemoryBucket> {
    let bucket = Arc::new(MemoryBucket::new());
    for key in keys {
        bucket
            .put(key, Bytes::from_static(b"x"), "text/plain")
            .await
            .expect("memory put");
    }
    bucket
}
