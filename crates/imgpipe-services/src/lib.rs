//! imgpipe Services Layer
//!
//! Write-only adapters for the two side effects that follow a persisted derivative:
//! the transformation record (metadata store) and the completion message (notifier).
//! Both sit behind traits so the orchestrator can be exercised without AWS.

pub mod error;
pub mod notifier;
pub mod recorder;
pub mod services;

pub use error::{ServiceError, ServiceResult};
pub use notifier::{CompletionNotifier, Notifier};
pub use recorder::{MetadataRecorder, MetadataStore};
#[cfg(feature = "dynamodb")]
pub use services::dynamodb::DynamoDbStore;
#[cfg(feature = "sns")]
pub use services::sns::SnsNotifier;
