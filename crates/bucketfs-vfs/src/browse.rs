//! Object listing façade for folder browsing.
//!
//! One delimiter-scoped page per call. The store's cursor is wrapped in a
//! [`BrowseCursor`] that remembers the prefix it was issued for, and a
//! cursor presented for any other prefix is refused before the store is
//! called.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use bucketfs_store::ObjectEntry;
use serde::{Deserialize, Serialize};

use crate::error::VfsError;
use crate::lister::PaginatedLister;

/// A store cursor bound to the prefix it continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseCursor {
    /// Prefix the cursor was issued under.
    pub prefix: String,
    /// The store's opaque cursor, verbatim.
    pub token: String,
}

impl BrowseCursor {
    /// Encode as a URL-safe string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketfs_vfs::browse::BrowseCursor;
    ///
    /// let cursor = BrowseCursor { prefix: "a/".into(), token: "t0k+n=".into() };
    /// let encoded = cursor.encode();
    /// assert_eq!(BrowseCursor::decode(&encoded).unwrap(), cursor);
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a string produced by [`encode`](Self::encode).
    ///
    /// # Errors
    /// [`VfsError::InvalidInput`] if the string is not a browse cursor.
    pub fn decode(encoded: &str) -> Result<Self, VfsError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| VfsError::invalid_input("malformed browse cursor"))?;
        serde_json::from_slice(&bytes).map_err(|_| VfsError::invalid_input("malformed browse cursor"))
    }
}

/// One page of a folder's immediate children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderListing {
    /// The listed prefix (`""` for the bucket root).
    pub prefix: String,
    /// Files directly inside the folder, in store order.
    pub objects: Vec<ObjectEntry>,
    /// Immediate sub-folders, in store order.
    pub delimited_prefixes: Vec<String>,
    /// Encoded [`BrowseCursor`] for the next page, if any.
    pub cursor: Option<String>,
}

/// Single-level folder browser.
#[derive(Debug, Clone)]
pub struct ObjectBrowser {
    lister: PaginatedLister,
}

impl ObjectBrowser {
    /// Create a browser over `lister`.
    #[must_use]
    pub fn new(lister: PaginatedLister) -> Self {
        Self { lister }
    }

    /// List one page of `prefix`'s immediate children.
    ///
    /// # Errors
    /// [`VfsError::InvalidInput`] for a malformed prefix or cursor, or a
    /// cursor issued for another prefix; [`VfsError::ListingFailed`] if the
    /// store call fails or the page is truncated without a cursor.
    pub async fn browse(&self, prefix: &str, cursor: Option<&str>) -> Result<FolderListing, VfsError> {
        let token = match cursor.filter(|c| !c.is_empty()) {
            Some(encoded) => {
                let cursor = BrowseCursor::decode(encoded)?;
                if cursor.prefix != prefix {
                    return Err(VfsError::invalid_input(format!(
                        "cursor was issued for prefix {:?}, not {prefix:?}",
                        cursor.prefix
                    )));
                }
                Some(cursor.token)
            }
            None => None,
        };

        let page = self.lister.list_page(prefix, token).await?;
        let cursor = if page.truncated {
            page.cursor.map(|token| {
                BrowseCursor {
                    prefix: prefix.to_owned(),
                    token,
                }
                .encode()
            })
        } else {
            None
        };

        Ok(FolderListing {
            prefix: prefix.to_owned(),
            objects: page.objects,
            delimited_prefixes: page.delimited_prefixes,
            cursor,
        })
    }
}
