//! Image metadata types

use serde::{Deserialize, Serialize};

/// Image metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size_bytes: Option<u64>,
}

impl ImageMetadata {
    pub fn longer_dimension(&self) -> u32 {
        self.width.max(self.height)
    }
}
