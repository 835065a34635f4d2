use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};

/// S3 storage implementation
///
/// The triggering event names the bucket, so a store is built per call from a builder
/// template carrying the region, endpoint and credentials resolved at startup.
#[derive(Clone)]
pub struct S3Storage {
    builder: AmazonS3Builder,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        // Credentials come from the environment (Lambda execution role, AWS_* variables).
        let mut builder = AmazonS3Builder::from_env().with_region(region);

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http)
                .with_virtual_hosted_style_request(false);
        }

        Ok(S3Storage { builder })
    }

    /// Object path for `key`, taken verbatim.
    ///
    /// `Path::from` would percent-encode every segment and the HTTP layer encodes again,
    /// so a decoded event key such as `café.jpg` would address a different object.
    fn object_path(key: &str) -> StorageResult<Path> {
        Path::parse(key)
            .map_err(|e| StorageError::InvalidKey(format!("{}: {}", key, e)))
    }

    fn store_for(&self, bucket: &str) -> StorageResult<AmazonS3> {
        self.builder
            .clone()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }

    fn map_error(err: ObjectStoreError, bucket: &str, key: &str, upload: bool) -> StorageError {
        let location = format!("{}/{}", bucket, key);
        match err {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(location),
            ObjectStoreError::PermissionDenied { .. } | ObjectStoreError::Unauthenticated { .. } => {
                StorageError::AccessDenied(format!("{}: {}", location, err))
            }
            other if upload => StorageError::UploadFailed(format!("{}: {}", location, other)),
            other => StorageError::DownloadFailed(format!("{}: {}", location, other)),
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let start = std::time::Instant::now();
        let store = self.store_for(bucket)?;
        let location = Self::object_path(key)?;

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 download failed"
            );
            Self::map_error(e, bucket, key, false)
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;
        let size = bytes.len() as u64;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let store = self.store_for(bucket)?;
        let size = data.len() as u64;
        let location = Self::object_path(key)?;

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let result: ObjectResult<_> = store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            Self::map_error(e, bucket, key, true)
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
