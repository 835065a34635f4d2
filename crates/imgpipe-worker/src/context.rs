//! Pipeline context
//!
//! Everything an invocation needs, built once at process start and shared read-only
//! across invocations. Nothing in here is mutated after construction.

use imgpipe_core::{Config, DerivativeNamer};
use imgpipe_processing::ImageEncoder;
use imgpipe_services::{CompletionNotifier, MetadataRecorder, MetadataStore, Notifier};
use imgpipe_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct PipelineContext {
    pub config: Config,
    pub namer: DerivativeNamer,
    pub storage: Arc<dyn Storage>,
    pub recorder: MetadataRecorder,
    pub notifier: CompletionNotifier,
    pub encoder: ImageEncoder,
}

impl PipelineContext {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        metadata_store: Arc<dyn MetadataStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, anyhow::Error> {
        config.validate()?;
        let namer = config.derivative_namer()?;
        let recorder = MetadataRecorder::new(
            metadata_store,
            config.metadata_table.clone(),
            config.metadata_schema,
        );
        let notifier = CompletionNotifier::new(notifier, config.notification_topic.clone());
        let encoder = ImageEncoder::new(config.jpeg_quality);

        Ok(Self {
            config,
            namer,
            storage,
            recorder,
            notifier,
            encoder,
        })
    }

    pub fn max_dimension(&self) -> u32 {
        self.config.max_dimension
    }
}
