//! Derivative naming.
//!
//! Maps a source object to the location of its derivative under an
//! [`OutputPlacementPolicy`]:
//!
//! - **prefix**: `resized-{key}` in the shared output bucket
//! - **path**: `processed/{basename(key)}` in the source bucket
//!
//! Naming is pure; the same source and policy always produce the same location.

use crate::constants::{PROCESSED_DIR, RESIZED_PREFIX};
use crate::models::{ObjectLocation, SourceObject};
use crate::policy::OutputPlacementPolicy;

/// Last path segment of a storage key.
pub fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Derivative key for `key` under `policy`.
pub fn derivative_key(key: &str, policy: OutputPlacementPolicy) -> String {
    match policy {
        OutputPlacementPolicy::Prefix => format!("{}{}", RESIZED_PREFIX, key),
        OutputPlacementPolicy::Path => format!("{}{}", PROCESSED_DIR, basename(key)),
    }
}

/// Resolves derivative locations for one configured placement policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivativeNamer {
    policy: OutputPlacementPolicy,
    output_bucket: Option<String>,
}

impl DerivativeNamer {
    /// `output_bucket` is required for prefix placement and ignored for path placement.
    pub fn new(
        policy: OutputPlacementPolicy,
        output_bucket: Option<String>,
    ) -> Result<Self, anyhow::Error> {
        if policy == OutputPlacementPolicy::Prefix
            && output_bucket.as_deref().map_or(true, |b| b.trim().is_empty())
        {
            return Err(anyhow::anyhow!(
                "prefix output placement requires an output bucket"
            ));
        }
        Ok(Self {
            policy,
            output_bucket,
        })
    }

    pub fn policy(&self) -> OutputPlacementPolicy {
        self.policy
    }

    pub fn destination(&self, source: &SourceObject) -> ObjectLocation {
        let bucket = match (self.policy, &self.output_bucket) {
            (OutputPlacementPolicy::Prefix, Some(bucket)) => bucket.clone(),
            _ => source.bucket.clone(),
        };
        ObjectLocation::new(bucket, derivative_key(&source.key, self.policy))
    }

    /// Whether `source` is itself a derivative that this namer would produce.
    ///
    /// Path placement writes into the triggering bucket, so without this check every
    /// derivative would retrigger the pipeline on itself.
    pub fn is_derivative(&self, source: &SourceObject) -> bool {
        match self.policy {
            OutputPlacementPolicy::Path => source.key.starts_with(PROCESSED_DIR),
            OutputPlacementPolicy::Prefix => {
                self.output_bucket.as_deref() == Some(source.bucket.as_str())
                    && source.key.starts_with(RESIZED_PREFIX)
            }
        }
    }
}
