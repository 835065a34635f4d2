//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use imgpipe_core::PipelineError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for PipelineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(_) => PipelineError::Unknown(err.to_string()),
            other => PipelineError::Access(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// The pipeline reads the source object and writes the derivative through this trait,
/// so it works with any backend without coupling to its implementation details.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download an object
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Upload `data` to `(bucket, key)`, replacing any existing object
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
