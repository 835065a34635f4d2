use imgpipe_core::PipelineError;
use thiserror::Error;

/// Image processing errors, one variant per pipeline stage
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to transform image: {0}")]
    Transform(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

impl From<ProcessingError> for PipelineError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Decode(msg) => PipelineError::Decode(msg),
            ProcessingError::Transform(msg) => PipelineError::Transform(msg),
            ProcessingError::Encode(msg) => PipelineError::Encode(msg),
        }
    }
}
