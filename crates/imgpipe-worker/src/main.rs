use aws_lambda_events::event::s3::S3Event;
use imgpipe_core::Config;
use imgpipe_infra::init_telemetry;
use imgpipe_worker::{handle_event, setup};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load configuration
    let config = Config::from_env()?;

    init_telemetry(config.log_format)?;

    let context = setup::initialize_context(config).await?;

    run(service_fn(move |event: LambdaEvent<S3Event>| {
        let context = context.clone();
        async move { Ok::<_, Error>(handle_event(&context, &event.payload).await) }
    }))
    .await
}
