//! Store gateway: binding registry and capability-checked resolution.
//!
//! The runtime environment exposes a set of named bindings. Some are object
//! stores, others are plain configuration values, and a store binding may
//! expose only part of the primitive set. [`StoreGateway::resolve`] hands out
//! a [`StoreHandle`] only when the binding provides list, put and delete;
//! anything else resolves to [`Resolution::NotFound`].

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use crate::capability::{Deleter, Lister, Writer};
use crate::error::StoreError;
use crate::model::{ListRequest, Page};

/// A named entry in the runtime environment.
#[derive(Clone)]
pub enum Binding {
    /// An object-store binding with whichever primitives its backend exposes.
    Store {
        /// Read primitive.
        lister: Option<Arc<dyn Lister>>,
        /// Write primitive.
        writer: Option<Arc<dyn Writer>>,
        /// Delete primitive.
        deleter: Option<Arc<dyn Deleter>>,
    },
    /// A plain configuration value.
    Value(String),
}

impl Binding {
    /// A binding backed by a store exposing every primitive.
    pub fn bucket<S>(store: Arc<S>) -> Self
    where
        S: Lister + Writer + Deleter + 'static,
    {
        Self::Store {
            lister: Some(store.clone() as Arc<dyn Lister>),
            writer: Some(store.clone() as Arc<dyn Writer>),
            deleter: Some(store as Arc<dyn Deleter>),
        }
    }

    /// A binding that can only be listed.
    pub fn read_only<L: Lister + 'static>(lister: Arc<L>) -> Self {
        Self::Store {
            lister: Some(lister as Arc<dyn Lister>),
            writer: None,
            deleter: None,
        }
    }

    /// A plain value binding.
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    fn handle(&self, name: &str) -> Option<StoreHandle> {
        match self {
            Self::Store {
                lister: Some(lister),
                writer: Some(writer),
                deleter: Some(deleter),
            } => Some(StoreHandle {
                name: Arc::from(name),
                lister: Arc::clone(lister),
                writer: Arc::clone(writer),
                deleter: Arc::clone(deleter),
            }),
            _ => None,
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store {
                lister,
                writer,
                deleter,
            } => f
                .debug_struct("Store")
                .field("list", &lister.is_some())
                .field("put", &writer.is_some())
                .field("delete", &deleter.is_some())
                .finish(),
            Self::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// Capability bound to one bucket.
///
/// Cloning is cheap; every primitive is reference-counted.
#[derive(Clone)]
pub struct StoreHandle {
    name: Arc<str>,
    lister: Arc<dyn Lister>,
    writer: Arc<dyn Writer>,
    deleter: Arc<dyn Deleter>,
}

impl StoreHandle {
    /// The binding name this handle was resolved from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// List one page.
    pub async fn list(&self, request: &ListRequest) -> Result<Page, StoreError> {
        self.lister.list(request).await
    }

    /// Write one object.
    pub async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<(), StoreError> {
        self.writer.put(key, body, content_type).await
    }

    /// Delete one batch of keys; returns how many existed.
    pub async fn delete(&self, keys: &[String]) -> Result<usize, StoreError> {
        self.deleter.delete(keys).await
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of resolving a binding name.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The binding exists and exposes every store primitive.
    Resolved(StoreHandle),
    /// The binding is absent or lacks a required primitive.
    NotFound,
}

impl Resolution {
    /// The handle, if resolution succeeded.
    #[must_use]
    pub fn into_handle(self) -> Option<StoreHandle> {
        match self {
            Self::Resolved(handle) => Some(handle),
            Self::NotFound => None,
        }
    }
}

/// Sorted inventory of the environment's bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingReport {
    /// Bindings that resolve to a store handle.
    pub buckets: Vec<String>,
    /// Every other binding name.
    pub other_bindings: Vec<String>,
}

/// Registry of named bindings.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use bucketfs_store::{Binding, MemoryBucket, StoreGateway};
///
/// let gateway = StoreGateway::new();
/// gateway.register("PHOTOS", Binding::bucket(Arc::new(MemoryBucket::new())));
/// gateway.register("API_TOKEN", Binding::value("secret"));
///
/// assert!(gateway.resolve("PHOTOS").into_handle().is_some());
/// assert!(gateway.resolve("API_TOKEN").into_handle().is_none());
/// ```
#[derive(Debug, Default)]
pub struct StoreGateway {
    bindings: DashMap<String, Binding>,
}

impl StoreGateway {
    /// Create an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a binding.
    pub fn register(&self, name: impl Into<String>, binding: Binding) {
        let name = name.into();
        debug!(binding = %name, kind = ?binding, "registered binding");
        self.bindings.insert(name, binding);
    }

    /// Resolve a binding name to a store handle.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Resolution {
        match self.bindings.get(name).and_then(|b| b.handle(name)) {
            Some(handle) => Resolution::Resolved(handle),
            None => {
                debug!(binding = %name, "binding did not resolve to a store");
                Resolution::NotFound
            }
        }
    }

    /// Partition binding names into stores and everything else, both sorted.
    #[must_use]
    pub fn list_bindings(&self) -> BindingReport {
        let mut report = BindingReport::default();
        for entry in &self.bindings {
            if entry.value().handle(entry.key()).is_some() {
                report.buckets.push(entry.key().clone());
            } else {
                report.other_bindings.push(entry.key().clone());
            }
        }
        report.buckets.sort();
        report.other_bindings.sort();
        report
    }
}
