//! Trigger parsing
//!
//! Builds the [`SourceObject`] from an S3 object-created notification. Only the first
//! record is honored.

use aws_lambda_events::event::s3::S3Event;
use imgpipe_core::{PipelineError, SourceObject};

/// Decode an S3 notification key: `+` is a space and `%XX` are percent escapes.
pub fn decode_key(raw: &str) -> Result<String, PipelineError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|e| PipelineError::Unknown(format!("invalid object key encoding: {}", e)))
}

#[tracing::instrument(skip(event), fields(records = event.records.len()))]
pub fn source_from_event(event: &S3Event) -> Result<SourceObject, PipelineError> {
    let record = event
        .records
        .first()
        .ok_or_else(|| PipelineError::Unknown("event contains no records".to_string()))?;

    if event.records.len() > 1 {
        tracing::warn!(
            ignored_records = event.records.len() - 1,
            "Event carries more than one record; only the first is processed"
        );
    }

    let bucket = record
        .s3
        .bucket
        .name
        .as_deref()
        .filter(|b| !b.is_empty())
        .ok_or_else(|| PipelineError::Unknown("record is missing the bucket name".to_string()))?;

    let raw_key = record
        .s3
        .object
        .key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| PipelineError::Unknown("record is missing the object key".to_string()))?;

    let key = decode_key(raw_key)?;
    if key.is_empty() {
        return Err(PipelineError::Unknown("object key is empty".to_string()));
    }

    Ok(SourceObject::new(bucket, key))
}
