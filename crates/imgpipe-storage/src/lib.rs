//! imgpipe Storage Library
//!
//! This crate provides the object storage abstraction used by the pipeline and its
//! implementations for S3 and the local filesystem.
//!
//! # Addressing
//!
//! Objects are addressed by `(bucket, key)` exactly as the triggering event names them.
//! The local backend maps a bucket to a sub-directory of its root. Keys must not contain
//! `..` or a leading `/`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use imgpipe_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
