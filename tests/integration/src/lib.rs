//! Integration tests for the BucketFS server.
//!
//! These tests require a running server at `localhost:8787` with at least one
//! in-memory bucket registered (default binding name `MEDIA`):
//!
//! ```text
//! BUCKETFS_BUCKETS=MEDIA BUCKETFS_VAR_PUBLIC_DOMAIN=cdn.example.com bucketfs-server
//! ```
//!
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//! Run them with:
//! ```text
//! cargo test -p bucketfs-integration -- --ignored
//! ```

use std::sync::Once;

use anyhow::{Context, Result};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Value, json};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Base URL of the server under test.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("BUCKETFS_ENDPOINT_URL")
        .unwrap_or_else(|_| "http://localhost:8787".to_owned())
        .trim_end_matches('/')
        .to_owned()
}

/// Binding name of the bucket the tests write into.
#[must_use]
pub fn test_binding() -> String {
    std::env::var("BUCKETFS_TEST_BINDING").unwrap_or_else(|_| "MEDIA".to_owned())
}

/// A client for the server under test.
#[must_use]
pub fn client() -> reqwest::Client {
    init_tracing();
    reqwest::Client::new()
}

/// A fresh top-level folder so concurrent tests never collide.
#[must_use]
pub fn test_folder(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("it-{prefix}-{id}/")
}

/// Upload `body` to `key` in the test bucket.
pub async fn upload(client: &reqwest::Client, key: &str, body: &'static [u8]) -> Result<Value> {
    let resp = client
        .post(format!("{}/upload-file", endpoint_url()))
        .header("x-bucket-binding", test_binding())
        .header("x-object-key", utf8_percent_encode(key, NON_ALPHANUMERIC).to_string())
        .header("content-type", "text/plain")
        .body(body)
        .send()
        .await
        .with_context(|| format!("upload {key}"))?;
    anyhow::ensure!(resp.status().is_success(), "upload {key} returned {}", resp.status());
    Ok(resp.json().await?)
}

/// `POST` a JSON body to a bucket endpoint.
pub async fn post_json(client: &reqwest::Client, path: &str, body: &Value) -> Result<reqwest::Response> {
    client
        .post(format!("{}{path}", endpoint_url()))
        .header("x-bucket-binding", test_binding())
        .json(body)
        .send()
        .await
        .with_context(|| format!("POST {path}"))
}

/// `GET` a bucket endpoint.
pub async fn get(client: &reqwest::Client, path: &str) -> Result<reqwest::Response> {
    client
        .get(format!("{}{path}", endpoint_url()))
        .header("x-bucket-binding", test_binding())
        .send()
        .await
        .with_context(|| format!("GET {path}"))
}

/// Delete everything under `folder`, ignoring failures.
pub async fn cleanup_folder(client: &reqwest::Client, folder: &str) {
    let _ = post_json(client, "/delete-objects", &json!({ "prefixes": [folder] })).await;
}

mod test_bindings;
mod test_browse;
mod test_cors;
mod test_delete;
mod test_error;
mod test_export;
mod test_folders;
