//! Configuration module
//!
//! Configuration is read once at process start and never per invocation. The values end
//! up in an immutable [`Config`] that the worker wraps into its pipeline context.

use std::env;

use crate::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DIMENSION};
use crate::naming::DerivativeNamer;
use crate::policy::{MetadataSchemaPolicy, OutputPlacementPolicy};
use crate::storage_types::StorageBackend;

/// Log output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    // Pipeline behavior
    pub output_bucket: Option<String>,
    pub metadata_table: String,
    pub notification_topic: String,
    pub max_dimension: u32,
    pub output_placement: OutputPlacementPolicy,
    pub metadata_schema: MetadataSchemaPolicy,
    pub jpeg_quality: u8,
    pub skip_derivative_keys: bool,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub local_storage_path: Option<String>,
    pub aws_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    // Logging
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let metadata_table = var("DYNAMODB_TABLE")
            .ok_or_else(|| anyhow::anyhow!("DYNAMODB_TABLE must be set"))?;
        let notification_topic = var("SNS_TOPIC_ARN")
            .ok_or_else(|| anyhow::anyhow!("SNS_TOPIC_ARN must be set"))?;

        let max_dimension = match var("MAX_DIMENSION") {
            Some(v) => v
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("MAX_DIMENSION must be a positive integer"))?,
            None => DEFAULT_MAX_DIMENSION,
        };

        let jpeg_quality = match var("JPEG_QUALITY") {
            Some(v) => v
                .parse::<u8>()
                .map_err(|_| anyhow::anyhow!("JPEG_QUALITY must be a number between 1 and 100"))?,
            None => DEFAULT_JPEG_QUALITY,
        };

        let output_placement: OutputPlacementPolicy = var("OUTPUT_PLACEMENT")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();
        let metadata_schema: MetadataSchemaPolicy = var("METADATA_SCHEMA")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();

        let skip_derivative_keys: bool = match var("SKIP_DERIVATIVE_KEYS") {
            Some(v) => match v.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(anyhow::anyhow!(
                        "SKIP_DERIVATIVE_KEYS must be true or false, got {:?}",
                        v
                    ))
                }
            },
            None => true,
        };

        let storage_backend: StorageBackend = var("STORAGE_BACKEND")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(StorageBackend::S3);

        let log_format: LogFormat = var("LOG_FORMAT")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(LogFormat::Json);

        let config = Config {
            environment,
            output_bucket: var("OUTPUT_BUCKET"),
            metadata_table,
            notification_topic,
            max_dimension,
            output_placement,
            metadata_schema,
            jpeg_quality,
            skip_derivative_keys,
            storage_backend,
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            aws_region: var("AWS_REGION").or_else(|| var("AWS_DEFAULT_REGION")),
            s3_endpoint: var("S3_ENDPOINT"),
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_dimension == 0 {
            return Err(anyhow::anyhow!("MAX_DIMENSION must be greater than zero"));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!("JPEG_QUALITY must be between 1 and 100"));
        }

        if self.output_placement == OutputPlacementPolicy::Prefix && self.output_bucket.is_none() {
            return Err(anyhow::anyhow!(
                "OUTPUT_BUCKET must be set when OUTPUT_PLACEMENT=prefix"
            ));
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
            ));
        }

        Ok(())
    }

    pub fn derivative_namer(&self) -> Result<DerivativeNamer, anyhow::Error> {
        DerivativeNamer::new(self.output_placement, self.output_bucket.clone())
    }
}
