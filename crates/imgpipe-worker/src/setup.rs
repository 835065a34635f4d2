//! Process start-up: AWS clients and the shared pipeline context

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use imgpipe_core::Config;
use imgpipe_services::{DynamoDbStore, SnsNotifier};
use imgpipe_storage::create_storage;
use std::sync::Arc;

use crate::context::PipelineContext;

/// Build the pipeline context from configuration. Called once per process.
pub async fn initialize_context(config: Config) -> Result<Arc<PipelineContext>> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = config.aws_region.clone() {
        loader = loader.region(Region::new(region));
    }
    let sdk_config = loader.load().await;

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;
    let metadata_store = Arc::new(DynamoDbStore::new(aws_sdk_dynamodb::Client::new(
        &sdk_config,
    )));
    let notifier = Arc::new(SnsNotifier::new(aws_sdk_sns::Client::new(&sdk_config)));

    tracing::info!(
        environment = %config.environment,
        storage_backend = %storage.backend_type(),
        output_placement = %config.output_placement,
        metadata_schema = %config.metadata_schema,
        max_dimension = config.max_dimension,
        "Pipeline context initialized"
    );

    let context = PipelineContext::new(config, storage, metadata_store, notifier)
        .context("Invalid pipeline configuration")?;
    Ok(Arc::new(context))
}
