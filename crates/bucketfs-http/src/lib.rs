//! HTTP service layer for BucketFS.
//!
//! Exposes the [`BucketFs`](bucketfs_vfs::BucketFs) façade as JSON endpoints:
//!
//! - **Router**: maps method + path to a [`Route`](router::Route)
//! - **Dispatch**: decodes headers, query strings and JSON bodies, then calls
//!   the façade
//! - **Service**: hyper `Service` implementation adding request ids and CORS
//! - **Response helpers**: JSON success/error response formatting
#![allow(missing_docs)]

pub mod dispatch;
pub mod error;
pub mod response;
pub mod router;
pub mod service;

pub use error::ApiError;
pub use response::ResponseBody;
pub use service::{BucketFsHttpConfig, BucketFsHttpService};
