//! Test helpers: in-memory collaborators and a context builder for pipeline tests.
//!
//! Run from workspace root: `cargo test -p imgpipe-worker`.

#![allow(dead_code)]

pub mod fixtures;
pub mod services;
pub mod storage;

use imgpipe_core::Config;
use imgpipe_worker::PipelineContext;
use std::collections::HashMap;
use std::sync::Arc;

pub use services::{RecordingNotifier, RecordingStore};
pub use storage::MemoryStorage;

pub const OUTPUT_BUCKET: &str = "raw-resized";
pub const TABLE: &str = "image-metadata";
pub const TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:image-processed";

/// Pipeline context wired to in-memory collaborators
pub struct TestPipeline {
    pub context: PipelineContext,
    pub storage: Arc<MemoryStorage>,
    pub store: Arc<RecordingStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestPipeline {
    /// Default configuration: prefix placement into [`OUTPUT_BUCKET`], source-key schema.
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Default configuration with some variables overridden
    pub fn with_env(overrides: &[(&str, &str)]) -> Self {
        Self::build(
            overrides,
            MemoryStorage::new(),
            RecordingStore::new(),
            RecordingNotifier::new(),
        )
    }

    pub fn build(
        overrides: &[(&str, &str)],
        storage: MemoryStorage,
        store: RecordingStore,
        notifier: RecordingNotifier,
    ) -> Self {
        let mut env: HashMap<String, String> = HashMap::from([
            ("OUTPUT_BUCKET".to_string(), OUTPUT_BUCKET.to_string()),
            ("DYNAMODB_TABLE".to_string(), TABLE.to_string()),
            ("SNS_TOPIC_ARN".to_string(), TOPIC.to_string()),
        ]);
        for (name, value) in overrides {
            env.insert(name.to_string(), value.to_string());
        }
        let config = Config::from_lookup(|name| env.get(name).cloned())
            .expect("test configuration should be valid");

        let storage = Arc::new(storage);
        let store = Arc::new(store);
        let notifier = Arc::new(notifier);
        let context =
            PipelineContext::new(config, storage.clone(), store.clone(), notifier.clone())
                .expect("test context should build");

        Self {
            context,
            storage,
            store,
            notifier,
        }
    }
}
