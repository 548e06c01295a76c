//! Core types, configuration, and errors for BucketFS.
//!
//! This crate provides the building blocks shared by the store gateway, the
//! virtual-filesystem layer, and the HTTP server: environment-driven
//! configuration and the validated [`ObjectKey`] / [`FolderPrefix`] newtypes
//! that every other crate passes around.

mod config;
mod error;
mod types;

pub use config::{BucketFsConfig, MAX_DELETE_CHUNK_SIZE};
pub use error::BucketFsError;
pub use types::{FolderPrefix, ObjectKey, MAX_KEY_BYTES};
