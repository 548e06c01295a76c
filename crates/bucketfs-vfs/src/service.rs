//! The [`BucketFs`] façade: every virtual-filesystem operation, addressed by
//! binding name.
//!
//! Each call resolves its binding, builds the components it needs around
//! the resulting handle, and drops them when it returns. No accumulator is
//! shared between calls.

use std::sync::Arc;

use bucketfs_core::{BucketFsConfig, FolderPrefix};
use bucketfs_store::{BindingReport, Resolution, StoreGateway, StoreHandle};
use bytes::Bytes;

use crate::browse::{FolderListing, ObjectBrowser};
use crate::error::VfsError;
use crate::export::{PublicDomain, render_urls};
use crate::folders::discover_folders;
use crate::keyset::{KeySet, Selection};
use crate::lister::PaginatedLister;
use crate::mutator::{BulkDeleter, DeleteSummary};
use crate::observer::{Observer, TracingObserver, VfsEvent};
use crate::resolver::PrefixResolver;
use crate::tree::ProjectTree;
use crate::upload::{UploadReceipt, Uploader};

/// Virtual filesystem over every bucket registered in a [`StoreGateway`].
#[derive(Debug, Clone)]
pub struct BucketFs {
    gateway: Arc<StoreGateway>,
    config: Arc<BucketFsConfig>,
    observer: Arc<dyn Observer>,
}

impl BucketFs {
    /// Create a façade that reports to `tracing`.
    #[must_use]
    pub fn new(gateway: Arc<StoreGateway>, config: Arc<BucketFsConfig>) -> Self {
        Self {
            gateway,
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// The underlying gateway.
    #[must_use]
    pub fn gateway(&self) -> &Arc<StoreGateway> {
        &self.gateway
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &BucketFsConfig {
        &self.config
    }

    /// Resolve `binding` to a store handle.
    ///
    /// # Errors
    /// [`VfsError::BindingNotFound`] if the binding is absent or lacks a
    /// store primitive.
    pub fn handle(&self, binding: &str) -> Result<StoreHandle, VfsError> {
        match self.gateway.resolve(binding) {
            Resolution::Resolved(handle) => Ok(handle),
            Resolution::NotFound => Err(VfsError::BindingNotFound {
                binding: binding.to_owned(),
            }),
        }
    }

    fn lister(&self, binding: &str) -> Result<PaginatedLister, VfsError> {
        Ok(
            PaginatedLister::new(self.handle(binding)?, Arc::clone(&self.observer))
                .with_page_size(self.config.page_size),
        )
    }

    /// Split the environment's bindings into buckets and everything else.
    #[must_use]
    pub fn list_bindings(&self) -> BindingReport {
        self.gateway.list_bindings()
    }

    /// Every folder prefix in the bucket, sorted.
    ///
    /// # Errors
    /// [`VfsError::BindingNotFound`] or [`VfsError::ListingFailed`].
    pub async fn list_folders(&self, binding: &str) -> Result<Vec<FolderPrefix>, VfsError> {
        discover_folders(&self.lister(binding)?).await
    }

    /// The bucket's folder hierarchy, rebuilt from a fresh listing.
    ///
    /// # Errors
    /// [`VfsError::BindingNotFound`] or [`VfsError::ListingFailed`].
    pub async fn project_tree(&self, binding: &str) -> Result<ProjectTree, VfsError> {
        let folders = self.list_folders(binding).await?;
        let tree = ProjectTree::build(&folders);
        self.observer.record(&VfsEvent::TreeBuilt {
            nodes: tree.node_count(),
        });
        Ok(tree)
    }

    /// One page of a folder's immediate children.
    ///
    /// # Errors
    /// [`VfsError::BindingNotFound`], [`VfsError::InvalidInput`] or
    /// [`VfsError::ListingFailed`].
    pub async fn browse(
        &self,
        binding: &str,
        prefix: &str,
        cursor: Option<&str>,
    ) -> Result<FolderListing, VfsError> {
        ObjectBrowser::new(self.lister(binding)?)
            .browse(prefix, cursor)
            .await
    }

    /// Write one object.
    ///
    /// # Errors
    /// [`VfsError::BindingNotFound`], [`VfsError::InvalidInput`] or
    /// [`VfsError::WriteFailed`].
    pub async fn upload(
        &self,
        binding: &str,
        key: &str,
        body: Bytes,
        content_type: Option<&str>,
    ) -> Result<UploadReceipt, VfsError> {
        Uploader::new(
            self.handle(binding)?,
            Arc::clone(&self.observer),
            self.config.default_content_type.clone(),
        )
        .upload(key, body, content_type)
        .await
    }

    /// Every key beneath `prefixes`, deduplicated.
    ///
    /// # Errors
    /// [`VfsError::BindingNotFound`] or [`VfsError::ListingFailed`].
    pub async fn list_keys(&self, binding: &str, prefixes: &[FolderPrefix]) -> Result<KeySet, VfsError> {
        PrefixResolver::new(self.lister(binding)?)
            .resolve(prefixes)
            .await
    }

    /// Delete a selection: explicit keys plus everything beneath the
    /// selected folders.
    ///
    /// # Errors
    /// [`VfsError::BindingNotFound`], [`VfsError::ListingFailed`] or
    /// [`VfsError::DeletePartial`].
    pub async fn delete(&self, binding: &str, selection: &Selection) -> Result<DeleteSummary, VfsError> {
        BulkDeleter::new(self.lister(binding)?)
            .with_chunk_size(self.config.effective_chunk_size())
            .delete_selection(selection)
            .await
    }

    /// Public URLs for a selection, sorted by key.
    ///
    /// The domain is checked before any store call.
    ///
    /// # Errors
    /// [`VfsError::InvalidInput`] for a blank domain,
    /// [`VfsError::BindingNotFound`] or [`VfsError::ListingFailed`].
    pub async fn export_urls(
        &self,
        binding: &str,
        domain: &str,
        selection: &Selection,
    ) -> Result<Vec<String>, VfsError> {
        let domain = PublicDomain::new(domain)?;
        let mut keys = selection.key_set();
        PrefixResolver::new(self.lister(binding)?)
            .resolve_into(&selection.prefixes, &mut keys)
            .await?;
        render_urls(domain.as_str(), keys)
    }
}
