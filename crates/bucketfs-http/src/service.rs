//! BucketFS HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bucketfs_vfs::BucketFs;
use bytes::Bytes;
use http::HeaderValue;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use tracing::{info, warn};

use crate::dispatch::dispatch;
use crate::error::ApiError;
use crate::response::{ResponseBody, error_to_response};
use crate::router::resolve_route;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Default cap on request bodies (uploads included).
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Configuration for the BucketFS HTTP service.
#[derive(Debug, Clone)]
pub struct BucketFsHttpConfig {
    /// Version reported by `/buckets` and `/health`.
    pub version: String,
    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for BucketFsHttpConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_owned(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Hyper `Service` exposing a [`BucketFs`] façade.
#[derive(Clone)]
pub struct BucketFsHttpService {
    fs: Arc<BucketFs>,
    config: Arc<BucketFsHttpConfig>,
}

impl BucketFsHttpService {
    /// Create a new `BucketFsHttpService`.
    #[must_use]
    pub fn new(fs: Arc<BucketFs>, config: BucketFsHttpConfig) -> Self {
        Self {
            fs,
            config: Arc::new(config),
        }
    }
}

impl fmt::Debug for BucketFsHttpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketFsHttpService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl hyper::service::Service<http::Request<Incoming>> for BucketFsHttpService {
    type Response = http::Response<ResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let fs = Arc::clone(&self.fs);
        let config = Arc::clone(&self.config);
        let request_id = request_id(req.headers());

        Box::pin(async move {
            let response = process_request(req, &fs, &config, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// The client's `x-request-id` if it sent a usable one, otherwise a fresh UUID.
fn request_id(headers: &http::HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_owned)
}

/// Route, read the body, and dispatch one request.
///
/// Generic over the body so tests can drive it with buffered bodies.
pub async fn process_request<B>(
    req: http::Request<B>,
    fs: &BucketFs,
    config: &BucketFsHttpConfig,
    request_id: &str,
) -> http::Response<ResponseBody>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();

    let route = match resolve_route(&parts.method, parts.uri.path()) {
        Ok(route) => route,
        Err(err) => return error_to_response(&err),
    };

    let body = match collect_body(body, config.max_body_bytes).await {
        Ok(body) => body,
        Err(err) => return error_to_response(&err),
    };

    match dispatch(fs, config, route, &parts, body).await {
        Ok(response) => {
            info!(
                request_id,
                route = route.as_str(),
                status = response.status().as_u16(),
                "request completed"
            );
            response
        }
        Err(err) => {
            warn!(
                request_id,
                route = route.as_str(),
                status = err.status.as_u16(),
                code = err.code,
                error = %err.message,
                "request failed"
            );
            error_to_response(&err)
        }
    }
}

/// Collect the body into one buffer, refusing anything above `limit`.
async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, ApiError>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Limited::new(body, limit)
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                ApiError::payload_too_large(limit)
            } else {
                ApiError::internal(format!("failed to read request body: {e}"))
            }
        })
}

/// Add the request id, server and CORS headers to every response.
fn add_common_headers(
    mut response: http::Response<ResponseBody>,
    request_id: &str,
) -> http::Response<ResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, hv);
    }
    headers.insert("server", HeaderValue::from_static("BucketFS"));

    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert("access-control-allow-headers", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-expose-headers",
        HeaderValue::from_static(REQUEST_ID_HEADER),
    );

    response
}
