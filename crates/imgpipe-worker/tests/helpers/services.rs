//! Recording metadata store and notifier with failure injection

use async_trait::async_trait;
use imgpipe_services::{MetadataStore, Notifier, ServiceError, ServiceResult};
use serde_json::{Map, Value};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingStore {
    items: Mutex<Vec<(String, Map<String, Value>)>>,
    fail: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn items(&self) -> Vec<(String, Map<String, Value>)> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataStore for RecordingStore {
    async fn put_item(&self, table: &str, item: Map<String, Value>) -> ServiceResult<()> {
        if self.fail {
            return Err(ServiceError::RecordFailed(
                "ProvisionedThroughputExceededException".to_string(),
            ));
        }
        self.items.lock().unwrap().push((table.to_string(), item));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub topic: String,
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<Published>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, topic: &str, subject: Option<&str>, body: &str) -> ServiceResult<()> {
        if self.fail {
            return Err(ServiceError::PublishFailed("endpoint unreachable".to_string()));
        }
        self.published.lock().unwrap().push(Published {
            topic: topic.to_string(),
            subject: subject.map(String::from),
            body: body.to_string(),
        });
        Ok(())
    }
}
