use async_trait::async_trait;
use imgpipe_core::NotificationMessage;
use std::sync::Arc;

use crate::error::ServiceResult;

/// Publish/subscribe transport
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, subject: Option<&str>, body: &str) -> ServiceResult<()>;
}

/// Sends completion messages to the configured topic. Fire-and-forget: nothing is rolled
/// back when publishing fails.
#[derive(Clone)]
pub struct CompletionNotifier {
    notifier: Arc<dyn Notifier>,
    topic: String,
}

impl CompletionNotifier {
    pub fn new(notifier: Arc<dyn Notifier>, topic: impl Into<String>) -> Self {
        Self {
            notifier,
            topic: topic.into(),
        }
    }

    pub async fn notify(&self, message: &NotificationMessage) -> ServiceResult<()> {
        let start = std::time::Instant::now();

        match self
            .notifier
            .publish(&self.topic, Some(&message.subject), &message.body)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    topic = %self.topic,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Completion notification published"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    topic = %self.topic,
                    "Completion notification failed"
                );
                Err(e)
            }
        }
    }
}
