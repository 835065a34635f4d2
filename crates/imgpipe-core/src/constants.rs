//! Constants shared by the pipeline crates.

/// Default bound for the longer side of a derivative, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// Default JPEG quality used when re-encoding JPEG sources.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Key prefix used by the prefix-style output placement.
pub const RESIZED_PREFIX: &str = "resized-";

/// Key directory used by the path-style output placement.
pub const PROCESSED_DIR: &str = "processed/";

pub const NOTIFICATION_SUBJECT: &str = "Image Processing Completed";

pub const SUCCESS_MESSAGE: &str = "Image processed successfully";
pub const FAILURE_MESSAGE: &str = "Error processing image";
pub const SKIPPED_MESSAGE: &str = "Image skipped: derivative key";
