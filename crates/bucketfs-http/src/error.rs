//! HTTP-facing error type.

use bucketfs_vfs::VfsError;
use http::StatusCode;
use serde_json::{Value, json};

/// An error rendered as a JSON response.
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Whether re-issuing the same request may succeed.
    pub retryable: bool,
    /// Extra structured context.
    pub details: Option<Value>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            retryable: false,
            details: None,
        }
    }

    /// 400 for malformed requests.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "InvalidInput", message)
    }

    /// 400 for a missing required header.
    #[must_use]
    pub fn missing_header(name: &str) -> Self {
        Self::bad_request(format!("missing required header: {name}"))
    }

    /// 404 for an unknown path.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFound", format!("no route for {path}"))
    }

    /// 405 for a known path called with the wrong method.
    #[must_use]
    pub fn method_not_allowed(method: &http::Method, path: &str) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "MethodNotAllowed",
            format!("{method} is not allowed on {path}"),
        )
    }

    /// 413 for a body above the configured limit.
    #[must_use]
    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "PayloadTooLarge",
            format!("request body exceeds {limit} bytes"),
        )
    }

    /// 500 for transport failures while reading the request.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "InternalError", message)
    }

    /// JSON body: `{"error", "code", "retryable", "details"?}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": self.message,
            "code": self.code,
            "retryable": self.retryable,
        });
        if let Some(details) = &self.details {
            body["details"] = details.clone();
        }
        body
    }
}

impl From<VfsError> for ApiError {
    fn from(err: VfsError) -> Self {
        let status = match &err {
            VfsError::InvalidInput { .. } | VfsError::BindingNotFound { .. } => {
                StatusCode::BAD_REQUEST
            }
            VfsError::ListingFailed { .. } | VfsError::WriteFailed { .. } => StatusCode::BAD_GATEWAY,
            VfsError::DeletePartial { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let details = match &err {
            VfsError::ListingFailed {
                prefix,
                pages_fetched,
                ..
            } => Some(json!({ "prefix": prefix, "pagesFetched": pages_fetched })),
            VfsError::DeletePartial {
                deleted_count,
                failed_at_chunk,
                requested,
                ..
            } => Some(json!({
                "deletedCount": deleted_count,
                "failedAtChunk": failed_at_chunk,
                "requested": requested,
            })),
            VfsError::WriteFailed { key, .. } => Some(json!({ "key": key })),
            VfsError::BindingNotFound { binding } => Some(json!({ "binding": binding })),
            VfsError::InvalidInput { .. } => None,
        };
        Self {
            status,
            code: err.code(),
            message: err.to_string(),
            retryable: err.is_retryable(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use bucketfs_store::StoreError;

    use super::*;

    #[test]
    fn test_should_map_vfs_errors_to_status() {
        let cases = [
            (VfsError::invalid_input("bad"), StatusCode::BAD_REQUEST),
            (
                VfsError::BindingNotFound {
                    binding: "X".to_owned(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                VfsError::ListingFailed {
                    prefix: "a/".to_owned(),
                    pages_fetched: 1,
                    source: StoreError::unavailable("timeout"),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                VfsError::DeletePartial {
                    deleted_count: 1000,
                    failed_at_chunk: 1,
                    requested: 2500,
                    source: StoreError::unavailable("reset"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_should_carry_partial_delete_details() {
        let api = ApiError::from(VfsError::DeletePartial {
            deleted_count: 1000,
            failed_at_chunk: 1,
            requested: 2500,
            source: StoreError::unavailable("reset"),
        });
        let body = api.to_json();
        assert_eq!(body["code"], "DeletePartial");
        assert_eq!(body["retryable"], false);
        assert_eq!(body["details"]["deletedCount"], 1000);
        assert_eq!(body["details"]["failedAtChunk"], 1);
    }

    #[test]
    fn test_should_omit_details_when_absent() {
        let body = ApiError::missing_header("x-bucket-binding").to_json();
        assert!(body.get("details").is_none());
        assert_eq!(body["code"], "InvalidInput");
    }
}
