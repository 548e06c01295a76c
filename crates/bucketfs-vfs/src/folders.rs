//! Folder discovery.
//!
//! Folders are not stored; they are inferred from keys. Discovery walks the
//! whole bucket once and derives every ancestor prefix of every key.

use std::collections::BTreeSet;

use bucketfs_core::FolderPrefix;
use tracing::{debug, warn};

use crate::error::VfsError;
use crate::lister::PaginatedLister;

/// Derive every folder prefix implied by `keys`, sorted ascending.
///
/// Every `/`-terminated leading part of a key is a folder, so a placeholder
/// key such as `photos/empty/` yields `photos/` and `photos/empty/`. Parts
/// that are not valid folder prefixes end the walk for that key
/// (`a//b.txt` yields only `a/`, `/abs/x` yields nothing).
///
/// # Examples
///
/// ```
/// use bucketfs_vfs::folders::folders_of;
///
/// let folders = folders_of(["a/b/c.txt", "a/d.txt", "top.txt", "e/"]);
/// let names: Vec<&str> = folders.iter().map(|f| f.as_str()).collect();
/// assert_eq!(names, vec!["a/", "a/b/", "e/"]);
/// ```
pub fn folders_of<I, S>(keys: I) -> Vec<FolderPrefix>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut folders = BTreeSet::new();
    for key in keys {
        let key = key.as_ref();
        for (end, _) in key.match_indices('/') {
            match FolderPrefix::new(&key[..=end]) {
                Ok(prefix) => {
                    folders.insert(prefix);
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "skipping malformed folder path");
                    break;
                }
            }
        }
    }
    folders.into_iter().collect()
}

/// List the whole bucket and return every folder prefix, sorted ascending.
///
/// # Errors
/// [`VfsError::ListingFailed`] if any page fails.
pub async fn discover_folders(lister: &PaginatedLister) -> Result<Vec<FolderPrefix>, VfsError> {
    let objects = lister.list_all("").await?;
    let folders = folders_of(objects.iter().map(|o| o.key.as_str()));
    debug!(
        binding = %lister.store().name(),
        objects = objects.len(),
        folders = folders.len(),
        "discovered folders"
    );
    Ok(folders)
}
