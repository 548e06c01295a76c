//! BucketFS request router.
//!
//! Every endpoint is a fixed path with one allowed method. `OPTIONS` on any
//! path is a CORS preflight.

use http::Method;

use crate::error::ApiError;

/// A resolved endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /buckets`
    ListBuckets,
    /// `GET /list-folders`
    ListFolders,
    /// `GET /project-tree`
    ProjectTree,
    /// `GET /list-objects`
    ListObjects,
    /// `POST /upload-file`
    UploadFile,
    /// `POST /delete-objects`
    DeleteObjects,
    /// `POST /list-keys`
    ListKeys,
    /// `POST /export-urls`
    ExportUrls,
    /// `GET /health`
    Health,
    /// `OPTIONS *`
    Preflight,
}

impl Route {
    /// Short name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListBuckets => "ListBuckets",
            Self::ListFolders => "ListFolders",
            Self::ProjectTree => "ProjectTree",
            Self::ListObjects => "ListObjects",
            Self::UploadFile => "UploadFile",
            Self::DeleteObjects => "DeleteObjects",
            Self::ListKeys => "ListKeys",
            Self::ExportUrls => "ExportUrls",
            Self::Health => "Health",
            Self::Preflight => "Preflight",
        }
    }
}

/// Resolve the route for `method` + `path`.
///
/// # Errors
/// 404 for an unknown path, 405 for a known path with the wrong method.
pub fn resolve_route(method: &Method, path: &str) -> Result<Route, ApiError> {
    if method == Method::OPTIONS {
        return Ok(Route::Preflight);
    }
    let (route, allowed) = match path.trim_end_matches('/') {
        "/buckets" => (Route::ListBuckets, Method::GET),
        "/list-folders" => (Route::ListFolders, Method::GET),
        "/project-tree" => (Route::ProjectTree, Method::GET),
        "/list-objects" => (Route::ListObjects, Method::GET),
        "/upload-file" => (Route::UploadFile, Method::POST),
        "/delete-objects" => (Route::DeleteObjects, Method::POST),
        "/list-keys" => (Route::ListKeys, Method::POST),
        "/export-urls" => (Route::ExportUrls, Method::POST),
        "/health" => (Route::Health, Method::GET),
        _ => return Err(ApiError::not_found(path)),
    };
    if *method == allowed || (allowed == Method::GET && method == Method::HEAD) {
        Ok(route)
    } else {
        Err(ApiError::method_not_allowed(method, path))
    }
}
