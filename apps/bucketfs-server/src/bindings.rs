//! Startup binding registry.
//!
//! Every name in `BUCKETFS_BUCKETS` becomes an in-memory bucket. Every
//! `BUCKETFS_VAR_<NAME>` environment variable becomes a plain value binding
//! called `<NAME>`, which `/buckets` reports under `debugEnvKeys`.

use std::sync::Arc;

use bucketfs_core::BucketFsConfig;
use bucketfs_store::{Binding, MemoryBucket, StoreGateway};
use tracing::info;

/// Prefix marking environment variables exposed as value bindings.
pub const VALUE_BINDING_PREFIX: &str = "BUCKETFS_VAR_";

/// Build the gateway from configuration and environment variables.
pub fn build_gateway<I>(config: &BucketFsConfig, vars: I) -> StoreGateway
where
    I: IntoIterator<Item = (String, String)>,
{
    let gateway = StoreGateway::new();

    for name in &config.buckets {
        gateway.register(name.as_str(), Binding::bucket(Arc::new(MemoryBucket::new())));
        info!(binding = %name, "registered in-memory bucket");
    }

    for (key, value) in vars {
        if let Some(name) = key.strip_prefix(VALUE_BINDING_PREFIX).filter(|n| !n.is_empty()) {
            if config.buckets.iter().any(|b| b == name) {
                continue;
            }
            gateway.register(name, Binding::value(value));
        }
    }

    gateway
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_register_buckets_and_values() {
        let config = BucketFsConfig::builder()
            .buckets(vec!["MEDIA".to_owned(), "ARCHIVE".to_owned()])
            .build();
        let vars = vec![
            ("BUCKETFS_VAR_PUBLIC_DOMAIN".to_owned(), "cdn.example.com".to_owned()),
            ("BUCKETFS_VAR_".to_owned(), "ignored".to_owned()),
            ("HOME".to_owned(), "/root".to_owned()),
        ];

        let report = build_gateway(&config, vars).list_bindings();

        assert_eq!(report.buckets, vec!["ARCHIVE", "MEDIA"]);
        assert_eq!(report.other_bindings, vec!["PUBLIC_DOMAIN"]);
    }

    #[test]
    fn test_should_not_shadow_bucket_with_value() {
        let config = BucketFsConfig::builder().buckets(vec!["MEDIA".to_owned()]).build();
        let vars = vec![("BUCKETFS_VAR_MEDIA".to_owned(), "x".to_owned())];

        let gateway = build_gateway(&config, vars);

        assert!(gateway.resolve("MEDIA").into_handle().is_some());
    }
}
