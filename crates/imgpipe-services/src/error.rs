use imgpipe_core::PipelineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Metadata write failed: {0}")]
    RecordFailed(String),

    #[error("Invalid metadata item: {0}")]
    InvalidItem(String),

    #[error("Notification publish failed: {0}")]
    PublishFailed(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ServiceError> for PipelineError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::RecordFailed(_) | ServiceError::InvalidItem(_) => {
                PipelineError::Record(err.to_string())
            }
            ServiceError::PublishFailed(_) => PipelineError::Notify(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgpipe_core::ErrorKind;

    #[test]
    fn test_maps_to_pipeline_kinds() {
        let record: PipelineError = ServiceError::RecordFailed("throttled".into()).into();
        assert_eq!(record.kind(), ErrorKind::RecordError);

        let item: PipelineError = ServiceError::InvalidItem("not an object".into()).into();
        assert_eq!(item.kind(), ErrorKind::RecordError);

        let notify: PipelineError = ServiceError::PublishFailed("timeout".into()).into();
        assert_eq!(notify.kind(), ErrorKind::NotifyError);
    }
}
