//! imgpipe Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and naming
//! policies shared by all imgpipe components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod policy;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::{ErrorKind, ErrorMetadata, LogLevel, PipelineError};
pub use models::{
    Derivative, InvocationResponse, NotificationMessage, ObjectLocation, PersistedDerivative,
    RecordStatus, SourceObject, TransformationRecord,
};
pub use naming::{derivative_key, DerivativeNamer};
pub use policy::{MetadataSchemaPolicy, OutputPlacementPolicy};
pub use storage_types::StorageBackend;
