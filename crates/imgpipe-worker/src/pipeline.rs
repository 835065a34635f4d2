//! Pipeline orchestrator
//!
//! Runs fetch, decode, resize, encode, persist, record and notify in order for one
//! source object. Each step runs only if the previous one succeeded. All failures are
//! caught here, logged once with the state reached and mapped to the uniform failure
//! response. There are no retries.

use aws_lambda_events::event::s3::S3Event;
use chrono::Utc;
use imgpipe_core::{
    Derivative, ErrorMetadata, InvocationResponse, LogLevel, NotificationMessage, ObjectLocation,
    PipelineError, SourceObject,
};
use imgpipe_processing::{ImageDecoder, ImageTransformer};
use std::time::Instant;

use crate::context::PipelineContext;
use crate::state::PipelineState;
use crate::trigger::source_from_event;

/// How far an invocation got, kept outside the step chain so the error boundary can
/// report it.
#[derive(Debug)]
struct Progress {
    state: PipelineState,
    derivative: Option<ObjectLocation>,
}

impl Progress {
    fn new() -> Self {
        Self {
            state: PipelineState::Received,
            derivative: None,
        }
    }

    fn advance(&mut self) {
        self.state = self.state.next();
    }
}

/// Handle one trigger event.
pub async fn handle_event(ctx: &PipelineContext, event: &S3Event) -> InvocationResponse {
    match source_from_event(event) {
        Ok(source) => process(ctx, &source).await,
        Err(err) => {
            tracing::error!(
                state = %PipelineState::Received,
                error_kind = %err.kind(),
                error = %err,
                "Invalid trigger event"
            );
            InvocationResponse::from_error(&err)
        }
    }
}

/// Process one source object and map the outcome to a response.
pub async fn process(ctx: &PipelineContext, source: &SourceObject) -> InvocationResponse {
    if ctx.config.skip_derivative_keys && ctx.namer.is_derivative(source) {
        tracing::info!(
            bucket = %source.bucket,
            key = %source.key,
            policy = %ctx.namer.policy(),
            "Source is a derivative; skipping"
        );
        return InvocationResponse::skipped();
    }

    let start = Instant::now();
    let mut progress = Progress::new();

    match run(ctx, source, &mut progress).await {
        Ok(derivative) => {
            progress.advance();
            tracing::info!(
                bucket = %source.bucket,
                key = %source.key,
                derivative = %derivative,
                state = %progress.state,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Image processed"
            );
            InvocationResponse::success()
        }
        Err(err) => {
            report_failure(source, &progress, &err, start);
            InvocationResponse::from_error(&err)
        }
    }
}

async fn run(
    ctx: &PipelineContext,
    source: &SourceObject,
    progress: &mut Progress,
) -> Result<ObjectLocation, PipelineError> {
    let created_at = Utc::now();

    // Received -> Decoded. A failed read is reported as Received.
    let data = ctx.storage.download(&source.bucket, &source.key).await?;
    let buffer = ImageDecoder::decode(&data)?;
    let mut original = buffer.metadata();
    original.size_bytes = Some(data.len() as u64);
    drop(data);
    progress.advance();

    let buffer = ImageTransformer::fit_within(buffer, ctx.max_dimension())?;
    progress.advance();

    let encoded = ctx.encoder.encode(&buffer)?;
    drop(buffer);
    progress.advance();

    let derivative = Derivative {
        location: ctx.namer.destination(source),
        data: encoded.data,
        content_type: encoded.content_type,
        width: encoded.width,
        height: encoded.height,
    };
    tracing::debug!(
        bucket = %source.bucket,
        key = %source.key,
        format = %original.format,
        from_width = original.width,
        from_height = original.height,
        from_size_bytes = original.size_bytes,
        to_width = derivative.width,
        to_height = derivative.height,
        size_bytes = derivative.size_bytes(),
        "Derivative encoded"
    );

    let (persisted, bytes) = derivative.into_parts();
    ctx.storage
        .upload(
            &persisted.location.bucket,
            &persisted.location.key,
            bytes,
            persisted.content_type,
        )
        .await?;
    progress.derivative = Some(persisted.location.clone());
    progress.advance();

    let record = ctx.recorder.prepare(source, &persisted, created_at);
    ctx.recorder.record(&record).await?;
    progress.advance();

    let message = NotificationMessage::completed(source, &persisted.location)?;
    ctx.notifier.notify(&message).await?;
    progress.advance();

    Ok(persisted.location)
}

fn report_failure(
    source: &SourceObject,
    progress: &Progress,
    err: &PipelineError,
    start: Instant,
) {
    // Persisted but never recorded: the derivative exists without a record.
    let orphaned_artifact = progress.state == PipelineState::Persisted;
    let derivative = progress
        .derivative
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    match err.log_level() {
        LogLevel::Warn => tracing::warn!(
            bucket = %source.bucket,
            key = %source.key,
            state = %progress.state,
            error_kind = %err.kind(),
            error_code = err.error_code(),
            error = %err,
            outcome = %PipelineState::Failed,
            orphaned_artifact,
            derivative = %derivative,
            duration_ms,
            "Image processing failed"
        ),
        LogLevel::Error => tracing::error!(
            bucket = %source.bucket,
            key = %source.key,
            state = %progress.state,
            error_kind = %err.kind(),
            error_code = err.error_code(),
            error = %err,
            outcome = %PipelineState::Failed,
            orphaned_artifact,
            derivative = %derivative,
            duration_ms,
            "Image processing failed"
        ),
    }
}
