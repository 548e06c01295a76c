//! Request decoding and dispatch to the [`BucketFs`] façade.

use bucketfs_core::FolderPrefix;
use bucketfs_vfs::{BucketFs, KeySet, ProjectTree, Selection, VfsError};
use bytes::Bytes;
use http::request::Parts;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::response::{ResponseBody, json_response, no_content};
use crate::router::Route;
use crate::service::BucketFsHttpConfig;

/// Header naming the target binding.
pub const BINDING_HEADER: &str = "x-bucket-binding";
/// Header carrying the percent-encoded object key of an upload.
pub const OBJECT_KEY_HEADER: &str = "x-object-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BucketsResponse {
    buckets: Vec<String>,
    version: String,
    debug_env_keys: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FoldersResponse {
    folders: Vec<FolderPrefix>,
}

#[derive(Debug, Serialize)]
struct TreeResponse {
    tree: ProjectTree,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: bool,
    key: String,
    size: usize,
    content_type: String,
}

#[derive(Debug, Serialize)]
struct KeysResponse {
    keys: KeySet,
}

#[derive(Debug, Serialize)]
struct UrlsResponse {
    urls: Vec<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: String,
}

#[derive(Debug, Deserialize)]
struct DeleteObjectsRequest {
    #[serde(default)]
    keys: Vec<String>,
    #[serde(default)]
    prefixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ListKeysRequest {
    prefixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExportUrlsRequest {
    domain: String,
    items: Vec<String>,
}

/// Handle one routed request.
///
/// # Errors
/// Any decoding failure or façade error, rendered by the caller.
pub async fn dispatch(
    fs: &BucketFs,
    config: &BucketFsHttpConfig,
    route: Route,
    parts: &Parts,
    body: Bytes,
) -> Result<http::Response<ResponseBody>, ApiError> {
    debug!(route = route.as_str(), "dispatching request");

    match route {
        Route::Preflight => Ok(no_content()),
        Route::Health => Ok(json_response(&HealthResponse {
            status: "running",
            version: config.version.clone(),
        })),
        Route::ListBuckets => {
            let report = fs.list_bindings();
            Ok(json_response(&BucketsResponse {
                buckets: report.buckets,
                version: config.version.clone(),
                debug_env_keys: report.other_bindings,
            }))
        }
        Route::ListFolders => {
            let folders = fs.list_folders(binding(parts)?).await?;
            Ok(json_response(&FoldersResponse { folders }))
        }
        Route::ProjectTree => {
            let tree = fs.project_tree(binding(parts)?).await?;
            Ok(json_response(&TreeResponse { tree }))
        }
        Route::ListObjects => {
            let prefix = query_param(parts, "prefix").unwrap_or_default();
            let cursor = query_param(parts, "cursor");
            let listing = fs
                .browse(binding(parts)?, &prefix, cursor.as_deref())
                .await?;
            Ok(json_response(&listing))
        }
        Route::UploadFile => {
            let binding = binding(parts)?;
            let key = object_key(parts)?;
            let content_type = header(parts, http::header::CONTENT_TYPE.as_str());
            let receipt = fs.upload(binding, &key, body, content_type).await?;
            Ok(json_response(&UploadResponse {
                success: true,
                key: receipt.key,
                size: receipt.size,
                content_type: receipt.content_type,
            }))
        }
        Route::DeleteObjects => {
            let binding = binding(parts)?;
            let request: DeleteObjectsRequest = parse_json(&body)?;
            let selection = Selection::from_parts(request.keys, request.prefixes)?;
            let summary = fs.delete(binding, &selection).await?;
            Ok(json_response(&summary))
        }
        Route::ListKeys => {
            let binding = binding(parts)?;
            let request: ListKeysRequest = parse_json(&body)?;
            let prefixes = request
                .prefixes
                .into_iter()
                .map(FolderPrefix::new)
                .collect::<Result<Vec<_>, _>>()
                .map_err(VfsError::from)?;
            let keys = fs.list_keys(binding, &prefixes).await?;
            Ok(json_response(&KeysResponse { keys }))
        }
        Route::ExportUrls => {
            let binding = binding(parts)?;
            let request: ExportUrlsRequest = parse_json(&body)?;
            let selection = Selection::partition(request.items)?;
            let urls = fs.export_urls(binding, &request.domain, &selection).await?;
            Ok(json_response(&UrlsResponse { urls }))
        }
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn binding(parts: &Parts) -> Result<&str, ApiError> {
    header(parts, BINDING_HEADER).ok_or_else(|| ApiError::missing_header(BINDING_HEADER))
}

fn object_key(parts: &Parts) -> Result<String, ApiError> {
    let raw = header(parts, OBJECT_KEY_HEADER).ok_or_else(|| ApiError::missing_header(OBJECT_KEY_HEADER))?;
    percent_decode_str(raw)
        .decode_utf8()
        .map(|k| k.into_owned())
        .map_err(|_| ApiError::bad_request(format!("{OBJECT_KEY_HEADER} is not valid UTF-8 once decoded")))
}

fn query_param(parts: &Parts, name: &str) -> Option<String> {
    let query = parts.uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("malformed JSON body: {e}")))
}
