//! Configurable policies selecting between the two supported output layouts.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Where a derivative is written and how its key is derived from the source key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputPlacementPolicy {
    /// `resized-{key}` in the shared output bucket
    #[default]
    Prefix,
    /// `processed/{basename}` back in the source bucket
    Path,
}

impl FromStr for OutputPlacementPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prefix" | "prefix-style" => Ok(OutputPlacementPolicy::Prefix),
            "path" | "path-style" => Ok(OutputPlacementPolicy::Path),
            _ => Err(anyhow::anyhow!("Invalid output placement policy: {}", s)),
        }
    }
}

impl Display for OutputPlacementPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OutputPlacementPolicy::Prefix => write!(f, "prefix"),
            OutputPlacementPolicy::Path => write!(f, "path"),
        }
    }
}

/// Shape and identifier of the metadata item written per transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataSchemaPolicy {
    /// Keyed by the source key (`image_id`); re-processing overwrites the item
    #[default]
    SourceKey,
    /// Keyed by a fresh UUID v4 (`id`); every invocation adds an item
    Generated,
}

impl FromStr for MetadataSchemaPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source-key" | "source_key" => Ok(MetadataSchemaPolicy::SourceKey),
            "generated" | "uuid" => Ok(MetadataSchemaPolicy::Generated),
            _ => Err(anyhow::anyhow!("Invalid metadata schema policy: {}", s)),
        }
    }
}

impl Display for MetadataSchemaPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MetadataSchemaPolicy::SourceKey => write!(f, "source-key"),
            MetadataSchemaPolicy::Generated => write!(f, "generated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_placement() {
        assert_eq!(
            "prefix".parse::<OutputPlacementPolicy>().unwrap(),
            OutputPlacementPolicy::Prefix
        );
        assert_eq!(
            "Path-Style".parse::<OutputPlacementPolicy>().unwrap(),
            OutputPlacementPolicy::Path
        );
        assert!("bucket".parse::<OutputPlacementPolicy>().is_err());
    }

    #[test]
    fn test_parse_schema() {
        assert_eq!(
            "source-key".parse::<MetadataSchemaPolicy>().unwrap(),
            MetadataSchemaPolicy::SourceKey
        );
        assert_eq!(
            "generated".parse::<MetadataSchemaPolicy>().unwrap(),
            MetadataSchemaPolicy::Generated
        );
        assert!("random".parse::<MetadataSchemaPolicy>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for policy in [OutputPlacementPolicy::Prefix, OutputPlacementPolicy::Path] {
            assert_eq!(policy.to_string().parse::<OutputPlacementPolicy>().unwrap(), policy);
        }
        for policy in [MetadataSchemaPolicy::SourceKey, MetadataSchemaPolicy::Generated] {
            assert_eq!(policy.to_string().parse::<MetadataSchemaPolicy>().unwrap(), policy);
        }
    }
}
