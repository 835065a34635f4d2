//! Image processing module
//!
//! - Decoding with format inference (decoder)
//! - Bounded-dimension resize (resize)
//! - Re-encoding in the source format (encoder)

pub mod decoder;
pub mod encoder;
pub mod resize;

pub use decoder::{ImageBuffer, ImageDecoder};
pub use encoder::{EncodedImage, ImageEncoder};
pub use resize::ImageTransformer;

use ::image::ImageFormat;

/// Containers the pipeline reads and writes.
pub const SUPPORTED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

pub fn is_supported(format: ImageFormat) -> bool {
    SUPPORTED_FORMATS.contains(&format)
}

/// Upper-case format tag, e.g. `JPEG`
pub fn format_tag(format: ImageFormat) -> String {
    format!("{:?}", format).to_uppercase()
}
