use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;

use crate::error::{ServiceError, ServiceResult};
use crate::notifier::Notifier;

/// SNS topic publisher
#[derive(Clone)]
pub struct SnsNotifier {
    client: Client,
}

impl SnsNotifier {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    #[tracing::instrument(skip(self, body), fields(
        aws.service.name = "sns",
        aws.sns.topic = %topic,
        aws.sns.operation = "Publish",
    ))]
    async fn publish(&self, topic: &str, subject: Option<&str>, body: &str) -> ServiceResult<()> {
        let start = std::time::Instant::now();

        let result = self
            .client
            .publish()
            .topic_arn(topic)
            .set_subject(subject.map(String::from))
            .message(body)
            .send()
            .await;

        match result {
            Ok(output) => {
                tracing::debug!(
                    message_id = output.message_id().unwrap_or_default(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "SNS publish successful"
                );
                Ok(())
            }
            Err(e) => {
                let message = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %message,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "SNS publish failed"
                );
                Err(ServiceError::PublishFailed(message))
            }
        }
    }
}
