//! In-memory storage for pipeline tests

use async_trait::async_trait;
use imgpipe_storage::{Storage, StorageBackend, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Objects keyed by `(bucket, key)`. Downloads and uploads can be made to fail.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<(String, String), StoredObject>>>,
    uploads: Arc<Mutex<usize>>,
    fail_uploads: bool,
    deny_downloads: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn denying_downloads() -> Self {
        Self {
            deny_downloads: true,
            ..Self::default()
        }
    }

    /// Set an object in the mock storage
    pub fn set_file(&self, bucket: &str, key: &str, data: Vec<u8>) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: "application/octet-stream".to_string(),
            },
        );
    }

    pub fn has_file(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), key.to_string()))
    }

    pub fn get_file(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn upload_count(&self) -> usize {
        *self.uploads.lock().unwrap()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        if self.deny_downloads {
            return Err(StorageError::AccessDenied(format!("{}/{}", bucket, key)));
        }
        self.get_file(bucket, key)
            .map(|object| object.data)
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, key)))
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        if self.fail_uploads {
            return Err(StorageError::QuotaExceeded(bucket.to_string()));
        }
        *self.uploads.lock().unwrap() += 1;
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
