//! Configuration for BucketFS services.
//!
//! All configuration is driven by environment variables with defaults that
//! match the object-store limits the virtual-filesystem layer is built for.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Hard upper bound on keys per delete call accepted by the store.
pub const MAX_DELETE_CHUNK_SIZE: usize = 1000;

/// BucketFS configuration.
///
/// # Examples
///
/// ```
/// use bucketfs_core::BucketFsConfig;
///
/// let config = BucketFsConfig::default();
/// assert_eq!(config.page_size, 100);
/// assert_eq!(config.delete_chunk_size, 1000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BucketFsConfig {
    /// Bind address for the HTTP server.
    #[builder(default = String::from("0.0.0.0:8787"))]
    pub gateway_listen: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Number of entries requested per page when browsing a folder.
    #[builder(default = 100)]
    pub page_size: usize,

    /// Number of keys submitted per delete call.
    #[builder(default = MAX_DELETE_CHUNK_SIZE)]
    pub delete_chunk_size: usize,

    /// Binding names backed by in-memory buckets at startup.
    #[builder(default)]
    pub buckets: Vec<String>,

    /// Content type recorded for uploads that do not declare one.
    #[builder(default = String::from("application/octet-stream"))]
    pub default_content_type: String,
}

impl Default for BucketFsConfig {
    fn default() -> Self {
        Self {
            gateway_listen: String::from("0.0.0.0:8787"),
            log_level: String::from("info"),
            page_size: 100,
            delete_chunk_size: MAX_DELETE_CHUNK_SIZE,
            buckets: Vec::new(),
            default_content_type: String::from("application/octet-stream"),
        }
    }
}

impl BucketFsConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:8787` |
    /// | `LOG_LEVEL` | `info` |
    /// | `BUCKETFS_PAGE_SIZE` | `100` |
    /// | `BUCKETFS_DELETE_CHUNK_SIZE` | `1000` |
    /// | `BUCKETFS_BUCKETS` | *(empty)* |
    /// | `BUCKETFS_DEFAULT_CONTENT_TYPE` | `application/octet-stream` |
    ///
    /// Unparseable numbers are ignored. The delete chunk size is clamped to
    /// `1..=1000`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("BUCKETFS_PAGE_SIZE") {
            if let Ok(n) = v.parse::<usize>() {
                config.page_size = n.max(1);
            }
        }
        if let Ok(v) = std::env::var("BUCKETFS_DELETE_CHUNK_SIZE") {
            if let Ok(n) = v.parse::<usize>() {
                config.delete_chunk_size = n;
            }
        }
        if let Ok(v) = std::env::var("BUCKETFS_BUCKETS") {
            config.buckets = parse_list(&v);
        }
        if let Ok(v) = std::env::var("BUCKETFS_DEFAULT_CONTENT_TYPE") {
            config.default_content_type = v;
        }

        config.delete_chunk_size = clamp_chunk_size(config.delete_chunk_size);
        config
    }

    /// The delete chunk size clamped to what the store accepts.
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        clamp_chunk_size(self.delete_chunk_size)
    }
}

fn clamp_chunk_size(n: usize) -> usize {
    n.clamp(1, MAX_DELETE_CHUNK_SIZE)
}

/// Split a comma-separated list, trimming whitespace and dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
