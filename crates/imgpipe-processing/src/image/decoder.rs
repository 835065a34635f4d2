//! Image decoder - raw bytes to an in-memory raster

use ::image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;

use super::{format_tag, is_supported};
use crate::error::ProcessingError;
use crate::metadata::ImageMetadata;

/// Decoded raster plus the container format it was read from.
///
/// Owned by a single invocation; the format travels with the pixels so the encoder can
/// write the derivative back in the same container.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    image: DynamicImage,
    format: ImageFormat,
}

impl ImageBuffer {
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Self { image, format }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn metadata(&self) -> ImageMetadata {
        let (width, height) = self.dimensions();
        ImageMetadata {
            width,
            height,
            format: format_tag(self.format),
            size_bytes: None,
        }
    }
}

pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode `data`, inferring the container from its leading bytes.
    pub fn decode(data: &[u8]) -> Result<ImageBuffer, ProcessingError> {
        if data.is_empty() {
            return Err(ProcessingError::Decode("empty input".to_string()));
        }

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;

        let format = reader.format().ok_or_else(|| {
            ProcessingError::Decode("unrecognized image container".to_string())
        })?;

        if !is_supported(format) {
            return Err(ProcessingError::Decode(format!(
                "unsupported image container: {}",
                format_tag(format)
            )));
        }

        let image = reader
            .decode()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;

        let (width, height) = image.dimensions();
        tracing::debug!(
            format = %format_tag(format),
            width,
            height,
            size_bytes = data.len(),
            "Image decoded"
        );

        Ok(ImageBuffer::new(image, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn create_test_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(100, 80, Rgba([255, 0, 0, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn create_test_jpeg() -> Vec<u8> {
        let img = RgbImage::from_fn(64, 48, |x, y| Rgb([(x * 4) as u8, (y * 5) as u8, 128]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
            .unwrap();
        buffer
    }

    #[test]
    fn test_decode_png() {
        let buffer = ImageDecoder::decode(&create_test_png()).unwrap();
        assert_eq!(buffer.format(), ImageFormat::Png);
        assert_eq!(buffer.dimensions(), (100, 80));

        let metadata = buffer.metadata();
        assert_eq!(metadata.format, "PNG");
        assert_eq!(metadata.width, 100);
        assert_eq!(metadata.height, 80);
    }

    #[test]
    fn test_decode_jpeg() {
        let buffer = ImageDecoder::decode(&create_test_jpeg()).unwrap();
        assert_eq!(buffer.format(), ImageFormat::Jpeg);
        assert_eq!(buffer.dimensions(), (64, 48));
        assert_eq!(buffer.metadata().format, "JPEG");
    }

    #[test]
    fn test_decode_invalid_image() {
        let result = ImageDecoder::decode(b"not an image");
        assert!(matches!(result, Err(ProcessingError::Decode(_))));
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(
            ImageDecoder::decode(&[]),
            Err(ProcessingError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_truncated_image() {
        let data = create_test_png();
        let truncated = &data[..data.len() / 2];
        assert!(matches!(
            ImageDecoder::decode(truncated),
            Err(ProcessingError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_unsupported_container() {
        // Little-endian TIFF header; the container is recognized but not handled.
        let tiff = [0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
        assert!(matches!(
            ImageDecoder::decode(&tiff),
            Err(ProcessingError::Decode(_))
        ));
    }
}
