//! Error types module
//!
//! `PipelineError` is the single error type seen at the orchestrator boundary. Each
//! component crate has its own narrower error enum and converts into a `PipelineError`
//! carrying the matching [`ErrorKind`], so the boundary logs a precise kind while the
//! caller only ever sees the generic failure response.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::constants::FAILURE_MESSAGE;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected failures caused by the input object itself
    Warn,
    /// Unexpected failures of the pipeline or its collaborators
    Error,
}

/// Error kind taxonomy reported by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ErrorKind {
    DecodeError,
    TransformError,
    EncodeError,
    AccessError,
    RecordError,
    NotifyError,
    UnknownError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::TransformError => "TransformError",
            ErrorKind::EncodeError => "EncodeError",
            ErrorKind::AccessError => "AccessError",
            ErrorKind::RecordError => "RecordError",
            ErrorKind::NotifyError => "NotifyError",
            ErrorKind::UnknownError => "UnknownError",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// Status code returned to the invoking layer
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DECODE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message; never includes internal details
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Storage access error: {0}")]
    Access(String),

    #[error("Metadata record error: {0}")]
    Record(String),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Decode(_) => ErrorKind::DecodeError,
            PipelineError::Transform(_) => ErrorKind::TransformError,
            PipelineError::Encode(_) => ErrorKind::EncodeError,
            PipelineError::Access(_) => ErrorKind::AccessError,
            PipelineError::Record(_) => ErrorKind::RecordError,
            PipelineError::Notify(_) => ErrorKind::NotifyError,
            PipelineError::Unknown(_) => ErrorKind::UnknownError,
        }
    }
}

impl From<anyhow::Error> for PipelineError {
    fn from(err: anyhow::Error) -> Self {
        PipelineError::Unknown(format!("{:#}", err))
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Unknown(format!("JSON error: {}", err))
    }
}

impl ErrorMetadata for PipelineError {
    fn http_status_code(&self) -> u16 {
        500
    }

    fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::DecodeError => "DECODE_ERROR",
            ErrorKind::TransformError => "TRANSFORM_ERROR",
            ErrorKind::EncodeError => "ENCODE_ERROR",
            ErrorKind::AccessError => "ACCESS_ERROR",
            ErrorKind::RecordError => "RECORD_ERROR",
            ErrorKind::NotifyError => "NOTIFY_ERROR",
            ErrorKind::UnknownError => "UNKNOWN_ERROR",
        }
    }

    fn client_message(&self) -> String {
        FAILURE_MESSAGE.to_string()
    }

    fn log_level(&self) -> LogLevel {
        match self.kind() {
            ErrorKind::DecodeError | ErrorKind::TransformError => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}
