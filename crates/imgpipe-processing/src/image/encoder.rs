//! Image encoder - serializes a raster back into its container format

use ::image::codecs::jpeg::JpegEncoder;
use ::image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

use super::decoder::ImageBuffer;
use super::{format_tag, is_supported};
use crate::error::ProcessingError;

/// Encoded image bytes with the container they were written in
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ImageEncoder {
    jpeg_quality: u8,
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::new(imgpipe_core::constants::DEFAULT_JPEG_QUALITY)
    }
}

impl ImageEncoder {
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    /// Encode in the format the buffer was decoded from
    pub fn encode(&self, buffer: &ImageBuffer) -> Result<EncodedImage, ProcessingError> {
        self.encode_as(buffer, buffer.format())
    }

    /// Encode in an explicitly requested format
    pub fn encode_as(
        &self,
        buffer: &ImageBuffer,
        format: ImageFormat,
    ) -> Result<EncodedImage, ProcessingError> {
        if !is_supported(format) {
            return Err(ProcessingError::Encode(format!(
                "writing {} is not supported",
                format_tag(format)
            )));
        }

        let img = buffer.image();
        let (width, height) = img.dimensions();
        let estimated_size = (width as usize) * (height as usize) * 3 / 4;
        let mut data = Vec::with_capacity(estimated_size);

        let result = match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut data, self.jpeg_quality);
                // JPEG has no alpha channel and no 16-bit samples.
                match img.color() {
                    ColorType::L8 | ColorType::Rgb8 => img.write_with_encoder(encoder),
                    ColorType::L16 | ColorType::La8 | ColorType::La16 => {
                        DynamicImage::ImageLuma8(img.to_luma8()).write_with_encoder(encoder)
                    }
                    _ => DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder),
                }
            }
            other => img.write_to(&mut Cursor::new(&mut data), other),
        };
        result.map_err(|e| ProcessingError::Encode(e.to_string()))?;

        tracing::debug!(
            format = %format_tag(format),
            width,
            height,
            size_bytes = data.len(),
            "Image encoded"
        );

        Ok(EncodedImage {
            data,
            format,
            content_type: format.to_mime_type(),
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::decoder::ImageDecoder;
    use ::image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_encode_preserves_format() {
        let encoder = ImageEncoder::default();
        for format in [
            ImageFormat::Jpeg,
            ImageFormat::Png,
            ImageFormat::Gif,
            ImageFormat::WebP,
        ] {
            let image = if format == ImageFormat::Jpeg {
                gradient(40, 30)
            } else {
                DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 30, Rgba([10, 20, 30, 255])))
            };
            let buffer = ImageBuffer::new(image, format);
            let encoded = encoder.encode(&buffer).unwrap();
            assert_eq!(encoded.format, format);
            assert_eq!((encoded.width, encoded.height), (40, 30));

            let decoded = ImageDecoder::decode(&encoded.data).unwrap();
            assert_eq!(decoded.format(), format);
            assert_eq!(decoded.dimensions(), (40, 30));
        }
    }

    #[test]
    fn test_content_type() {
        let buffer = ImageBuffer::new(gradient(8, 8), ImageFormat::Png);
        let encoded = ImageEncoder::default().encode(&buffer).unwrap();
        assert_eq!(encoded.content_type, "image/png");

        let buffer = ImageBuffer::new(gradient(8, 8), ImageFormat::Jpeg);
        let encoded = ImageEncoder::default().encode(&buffer).unwrap();
        assert_eq!(encoded.content_type, "image/jpeg");
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let buffer = ImageBuffer::new(gradient(8, 8), ImageFormat::Png);
        let result = ImageEncoder::default().encode_as(&buffer, ImageFormat::Tiff);
        assert!(matches!(result, Err(ProcessingError::Encode(_))));
    }

    #[test]
    fn test_jpeg_with_alpha_is_flattened() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([0, 0, 255, 128])));
        let buffer = ImageBuffer::new(image, ImageFormat::Jpeg);
        let encoded = ImageEncoder::default().encode(&buffer).unwrap();
        assert_eq!(ImageDecoder::decode(&encoded.data).unwrap().format(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_lower_jpeg_quality_produces_smaller_output() {
        let buffer = ImageBuffer::new(gradient(256, 256), ImageFormat::Jpeg);
        let high = ImageEncoder::new(95).encode(&buffer).unwrap();
        let low = ImageEncoder::new(20).encode(&buffer).unwrap();
        assert!(low.data.len() < high.data.len());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let buffer = ImageBuffer::new(gradient(120, 90), ImageFormat::Jpeg);
        let encoder = ImageEncoder::new(75);
        let first = encoder.encode(&buffer).unwrap();
        let second = encoder.encode(&buffer).unwrap();
        assert_eq!(first.data, second.data);
    }
}
