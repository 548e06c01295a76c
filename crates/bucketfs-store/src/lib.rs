//! Object-store boundary for BucketFS.
//!
//! The virtual-filesystem layer treats the object store as a black box that
//! offers exactly three primitives: list (with prefix, cursor, delimiter and
//! limit), put, and delete by key. This crate defines those primitives as
//! capability traits, the data they exchange, and the gateway that turns a
//! symbolic binding name into a handle exposing them.
//!
//! # Architecture
//!
//! ```text
//! binding name ("PHOTOS")
//!        |
//!        v
//!   StoreGateway::resolve  -- capability check -->  Resolution::NotFound
//!        |
//!        v
//!   StoreHandle { Lister, Writer, Deleter }
//!        |
//!        v
//!   MemoryBucket (or any other backend)
//! ```

pub mod capability;
pub mod cursor;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod model;

pub use capability::{Deleter, Lister, Writer};
pub use error::StoreError;
pub use gateway::{Binding, BindingReport, Resolution, StoreGateway, StoreHandle};
pub use memory::MemoryBucket;
pub use model::{ListRequest, ObjectEntry, Page};
