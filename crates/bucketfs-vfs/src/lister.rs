//! Paginated lister.
//!
//! Wraps the store's cursor-based `list` primitive in two modes:
//!
//! - **single page** ([`PaginatedLister::list_page`]): one delimiter-scoped
//!   call returning the immediate children of a folder, for browsing.
//! - **exhaustive** ([`PaginatedLister::list_all`]): repeated undelimited
//!   calls until the store reports `truncated == false`, accumulating every
//!   object beneath the prefix.
//!
//! Pagination is strictly sequential. The cursor is passed back verbatim, an
//! empty page that is still truncated keeps the loop going, and any failing
//! call aborts the whole accumulation.

use std::collections::HashSet;
use std::sync::Arc;

use bucketfs_core::FolderPrefix;
use bucketfs_store::{ListRequest, ObjectEntry, Page, StoreError, StoreHandle};
use tracing::debug;

use crate::error::VfsError;
use crate::keyset::KeySet;
use crate::observer::{Observer, VfsEvent};

/// Delimiter used for folder-scoped listings.
pub const DELIMITER: &str = "/";

/// Default number of entries per browse page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Check that `prefix` is either the bucket root (`""`) or a folder prefix.
pub(crate) fn validate_scope(prefix: &str) -> Result<(), VfsError> {
    if prefix.is_empty() {
        return Ok(());
    }
    FolderPrefix::new(prefix)?;
    Ok(())
}

/// Cursor-driven lister bound to one store.
#[derive(Debug, Clone)]
pub struct PaginatedLister {
    store: StoreHandle,
    observer: Arc<dyn Observer>,
    page_size: usize,
}

impl PaginatedLister {
    /// Create a lister with the default browse page size.
    #[must_use]
    pub fn new(store: StoreHandle, observer: Arc<dyn Observer>) -> Self {
        Self {
            store,
            observer,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the browse page size (minimum 1).
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The store this lister drives.
    #[must_use]
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// The observer events are reported to.
    #[must_use]
    pub fn observer(&self) -> &Arc<dyn Observer> {
        &self.observer
    }

    /// Fetch one delimiter-scoped page of `prefix`'s immediate children.
    ///
    /// # Errors
    /// [`VfsError::InvalidInput`] for a malformed prefix;
    /// [`VfsError::ListingFailed`] if the store call fails or reports a
    /// truncated page it gave no cursor for.
    pub async fn list_page(&self, prefix: &str, cursor: Option<String>) -> Result<Page, VfsError> {
        validate_scope(prefix)?;
        let request = ListRequest::new(prefix)
            .with_cursor(cursor)
            .with_delimiter(DELIMITER)
            .with_limit(self.page_size);
        let page = self
            .store
            .list(&request)
            .await
            .map_err(|source| VfsError::ListingFailed {
                prefix: prefix.to_owned(),
                pages_fetched: 0,
                source,
            })?;
        self.report_page(prefix, &page);
        if page.truncated && page.cursor.is_none() {
            return Err(VfsError::ListingFailed {
                prefix: prefix.to_owned(),
                pages_fetched: 1,
                source: StoreError::unavailable("truncated page carried no cursor"),
            });
        }
        Ok(page)
    }

    /// List every object beneath `prefix`, deduplicated by key, in the order
    /// the store first returned them.
    ///
    /// # Errors
    /// [`VfsError::InvalidInput`] for a malformed prefix;
    /// [`VfsError::ListingFailed`] if any page fails.
    pub async fn list_all(&self, prefix: &str) -> Result<Vec<ObjectEntry>, VfsError> {
        let mut seen = HashSet::new();
        let mut objects = Vec::new();
        self.scan(prefix, |entry| {
            if seen.insert(entry.key.clone()) {
                objects.push(entry);
            }
        })
        .await?;
        Ok(objects)
    }

    /// Add every key beneath `prefix` to `keys`.
    ///
    /// Returns how many keys the listing produced, including ones already in
    /// the set.
    ///
    /// # Errors
    /// Same as [`list_all`](Self::list_all).
    pub async fn collect_keys(&self, prefix: &str, keys: &mut KeySet) -> Result<usize, VfsError> {
        let mut produced = 0usize;
        self.scan(prefix, |entry| {
            produced += 1;
            keys.insert(entry.key);
        })
        .await?;
        Ok(produced)
    }

    /// Drive the exhaustive loop, handing each object to `visit`.
    ///
    /// Returns the number of pages fetched.
    async fn scan<F>(&self, prefix: &str, mut visit: F) -> Result<usize, VfsError>
    where
        F: FnMut(ObjectEntry),
    {
        validate_scope(prefix)?;
        let mut cursor: Option<String> = None;
        let mut pages_fetched = 0usize;

        loop {
            let request = ListRequest::new(prefix).with_cursor(cursor.take());
            let page = self
                .store
                .list(&request)
                .await
                .map_err(|source| VfsError::ListingFailed {
                    prefix: prefix.to_owned(),
                    pages_fetched,
                    source,
                })?;
            pages_fetched += 1;
            self.report_page(prefix, &page);

            let Page {
                objects,
                cursor: next,
                truncated,
                ..
            } = page;
            objects.into_iter().for_each(&mut visit);

            if !truncated {
                break;
            }
            if next.is_none() {
                return Err(VfsError::ListingFailed {
                    prefix: prefix.to_owned(),
                    pages_fetched,
                    source: StoreError::unavailable("truncated page carried no cursor"),
                });
            }
            cursor = next;
        }

        debug!(
            binding = %self.store.name(),
            prefix = %prefix,
            pages = pages_fetched,
            "exhaustive listing completed"
        );
        Ok(pages_fetched)
    }

    fn report_page(&self, prefix: &str, page: &Page) {
        self.observer.record(&VfsEvent::PageListed {
            prefix: prefix.to_owned(),
            objects: page.objects.len(),
            prefixes: page.delimited_prefixes.len(),
            truncated: page.truncated,
        });
    }
}
