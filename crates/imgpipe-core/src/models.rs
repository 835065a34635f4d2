//! Domain models passed between pipeline stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

use crate::constants::{FAILURE_MESSAGE, NOTIFICATION_SUBJECT, SKIPPED_MESSAGE, SUCCESS_MESSAGE};
use crate::error::ErrorMetadata;

/// A stored object addressed by bucket and key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl Display for ObjectLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// The object named by the triggering event.
pub type SourceObject = ObjectLocation;

/// Encoded derivative ready to be persisted.
#[derive(Debug, Clone)]
pub struct Derivative {
    pub location: ObjectLocation,
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Derivative {
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    /// Split off the encoded bytes so they can move into the storage call.
    pub fn into_parts(self) -> (PersistedDerivative, Vec<u8>) {
        let summary = PersistedDerivative {
            size_bytes: self.size_bytes(),
            location: self.location,
            content_type: self.content_type,
            width: self.width,
            height: self.height,
        };
        (summary, self.data)
    }
}

/// What is known about a derivative once its bytes have been handed to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDerivative {
    pub location: ObjectLocation,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Processed,
    Failed,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Processed => "Processed",
            RecordStatus::Failed => "Failed",
        }
    }
}

/// Describes one completed transformation. Written once, never updated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationRecord {
    pub id: String,
    pub source: ObjectLocation,
    pub derivative: ObjectLocation,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

/// Generates a fresh record identifier for the `generated` metadata schema.
pub fn generate_record_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    message: &'a str,
    original_image: String,
    resized_image: String,
}

impl NotificationMessage {
    /// Completion message referencing the source and derivative locations.
    pub fn completed(
        source: &ObjectLocation,
        derivative: &ObjectLocation,
    ) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(&CompletionBody {
            message: SUCCESS_MESSAGE,
            original_image: source.to_string(),
            resized_image: derivative.to_string(),
        })?;
        Ok(Self {
            subject: NOTIFICATION_SUBJECT.to_string(),
            body,
        })
    }
}

/// Response returned to the invoking layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded string
    pub body: String,
}

impl InvocationResponse {
    fn with_message(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::Value::String(message.to_string()).to_string(),
        }
    }

    pub fn success() -> Self {
        Self::with_message(200, SUCCESS_MESSAGE)
    }

    pub fn skipped() -> Self {
        Self::with_message(200, SKIPPED_MESSAGE)
    }

    pub fn failure() -> Self {
        Self::with_message(500, FAILURE_MESSAGE)
    }

    /// Uniform failure response for `err`; never exposes the error detail.
    pub fn from_error<E: ErrorMetadata>(err: &E) -> Self {
        Self::with_message(err.http_status_code(), &err.client_message())
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
