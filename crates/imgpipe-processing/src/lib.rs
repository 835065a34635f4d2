//! imgpipe Processing Library
//!
//! Decoding, bounded-dimension resizing and re-encoding of raster images. Every
//! operation here is pure and deterministic: identical bytes and settings produce
//! identical output bytes.

pub mod error;
pub mod image;
pub mod metadata;

pub use error::ProcessingError;
pub use crate::image::{EncodedImage, ImageBuffer, ImageDecoder, ImageEncoder, ImageTransformer};
pub use metadata::ImageMetadata;
