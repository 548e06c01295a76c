//! JSON response serialization and error formatting.

use bytes::Bytes;
use http::{HeaderValue, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

use crate::error::ApiError;

/// Body type of every BucketFS response.
pub type ResponseBody = Full<Bytes>;

/// Content type for JSON responses.
pub const CONTENT_TYPE: &str = "application/json";

fn with_json(status: StatusCode, json: Vec<u8>) -> http::Response<ResponseBody> {
    let mut response = http::Response::new(Full::new(Bytes::from(json)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(http::header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    response
}

/// Serialize `value` into a 200 response.
#[must_use]
pub fn json_response<T: Serialize>(value: &T) -> http::Response<ResponseBody> {
    match serde_json::to_vec(value) {
        Ok(json) => with_json(StatusCode::OK, json),
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            error_to_response(&ApiError::internal("failed to serialize response"))
        }
    }
}

/// Render an [`ApiError`] as a JSON response with its status.
#[must_use]
pub fn error_to_response(error: &ApiError) -> http::Response<ResponseBody> {
    let json = serde_json::to_vec(&error.to_json()).unwrap_or_default();
    with_json(error.status, json)
}

/// An empty 204 response.
#[must_use]
pub fn no_content() -> http::Response<ResponseBody> {
    let mut response = http::Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}
