//! Metadata recorder
//!
//! Turns a [`TransformationRecord`] into one write-only item whose shape and identifier
//! follow the configured [`MetadataSchemaPolicy`]:
//!
//! - **source-key**: `image_id` is the source key, so a re-run for the same object
//!   overwrites its previous item
//! - **generated**: `id` is a fresh UUID v4 per invocation

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use imgpipe_core::models::generate_record_id;
use imgpipe_core::{
    MetadataSchemaPolicy, PersistedDerivative, RecordStatus, SourceObject, TransformationRecord,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};

/// Write-only key/value metadata store
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Put one item into `table`, replacing any item with the same primary key
    async fn put_item(&self, table: &str, item: Map<String, Value>) -> ServiceResult<()>;
}

#[derive(Serialize)]
struct SourceKeyItem<'a> {
    image_id: &'a str,
    original_bucket: &'a str,
    original_key: &'a str,
    resized_bucket: &'a str,
    resized_key: &'a str,
    timestamp: String,
    status: &'static str,
    created_at: String,
    width: u32,
    height: u32,
    size_bytes: u64,
}

#[derive(Serialize)]
struct GeneratedItem<'a> {
    id: &'a str,
    source_bucket: &'a str,
    source_key: &'a str,
    processed_bucket: &'a str,
    processed_key: &'a str,
    status: &'static str,
    created_at: String,
    processed_at: String,
    width: u32,
    height: u32,
    size_bytes: u64,
}

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Clone)]
pub struct MetadataRecorder {
    store: Arc<dyn MetadataStore>,
    table: String,
    schema: MetadataSchemaPolicy,
}

impl MetadataRecorder {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        table: impl Into<String>,
        schema: MetadataSchemaPolicy,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            schema,
        }
    }

    /// Build the record for a persisted derivative, choosing its identifier by schema.
    pub fn prepare(
        &self,
        source: &SourceObject,
        derivative: &PersistedDerivative,
        created_at: DateTime<Utc>,
    ) -> TransformationRecord {
        let id = match self.schema {
            MetadataSchemaPolicy::SourceKey => source.key.clone(),
            MetadataSchemaPolicy::Generated => generate_record_id(),
        };

        TransformationRecord {
            id,
            source: source.clone(),
            derivative: derivative.location.clone(),
            status: RecordStatus::Processed,
            created_at,
            completed_at: Utc::now(),
            width: derivative.width,
            height: derivative.height,
            size_bytes: derivative.size_bytes,
        }
    }

    /// Item attributes for `record` under the configured schema
    pub fn item(&self, record: &TransformationRecord) -> ServiceResult<Map<String, Value>> {
        let value = match self.schema {
            MetadataSchemaPolicy::SourceKey => serde_json::to_value(SourceKeyItem {
                image_id: &record.id,
                original_bucket: &record.source.bucket,
                original_key: &record.source.key,
                resized_bucket: &record.derivative.bucket,
                resized_key: &record.derivative.key,
                timestamp: rfc3339(&record.completed_at),
                status: record.status.as_str(),
                created_at: rfc3339(&record.created_at),
                width: record.width,
                height: record.height,
                size_bytes: record.size_bytes,
            }),
            MetadataSchemaPolicy::Generated => serde_json::to_value(GeneratedItem {
                id: &record.id,
                source_bucket: &record.source.bucket,
                source_key: &record.source.key,
                processed_bucket: &record.derivative.bucket,
                processed_key: &record.derivative.key,
                status: record.status.as_str(),
                created_at: rfc3339(&record.created_at),
                processed_at: rfc3339(&record.completed_at),
                width: record.width,
                height: record.height,
                size_bytes: record.size_bytes,
            }),
        }
        .map_err(|e| ServiceError::InvalidItem(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(ServiceError::InvalidItem(format!(
                "expected an object, got {}",
                other
            ))),
        }
    }

    /// Write `record` to the metadata table
    pub async fn record(&self, record: &TransformationRecord) -> ServiceResult<()> {
        let item = self.item(record)?;
        let start = std::time::Instant::now();

        match self.store.put_item(&self.table, item).await {
            Ok(()) => {
                tracing::info!(
                    table = %self.table,
                    record_id = %record.id,
                    schema = %self.schema,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Transformation record written"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    table = %self.table,
                    record_id = %record.id,
                    "Transformation record write failed"
                );
                Err(e)
            }
        }
    }
}
