//! Virtual filesystem over flat object storage.
//!
//! Object stores have keys, not directories. This crate layers folders on top
//! of the store's `list` / `put` / `delete` primitives:
//!
//! - [`lister`]: single-page and exhaustive cursor pagination
//! - [`resolver`]: folder prefixes expanded into deduplicated key sets
//! - [`folders`] and [`tree`]: folder discovery and the navigation tree
//! - [`mutator`]: chunked bulk deletion
//! - [`browse`]: delimiter-scoped folder browsing with prefix-bound cursors
//! - [`upload`] and [`export`]: single-object writes and public URLs
//! - [`service`]: the [`BucketFs`] façade addressing all of the above by
//!   binding name
//!
//! Components report progress through an injected [`Observer`].

pub mod browse;
pub mod error;
pub mod export;
pub mod folders;
pub mod keyset;
pub mod lister;
pub mod mutator;
pub mod observer;
pub mod resolver;
pub mod service;
pub mod tree;
pub mod upload;

#[cfg(test)]
mod testing;

pub use browse::{BrowseCursor, FolderListing, ObjectBrowser};
pub use error::VfsError;
pub use keyset::{KeySet, Selection};
pub use lister::PaginatedLister;
pub use mutator::{BulkDeleter, DeleteSummary};
pub use observer::{LogBuffer, LogEntry, LogLevel, NoopObserver, Observer, TracingObserver, VfsEvent};
pub use resolver::PrefixResolver;
pub use service::BucketFs;
pub use tree::{ProjectTree, ProjectTreeNode};
pub use upload::{UploadReceipt, Uploader};
