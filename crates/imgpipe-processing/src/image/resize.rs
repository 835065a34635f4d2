use ::image::imageops::FilterType;

use super::decoder::ImageBuffer;
use crate::error::ProcessingError;

/// Bounded-dimension ("fit within a box") resize
pub struct ImageTransformer;

impl ImageTransformer {
    /// Target dimensions for fitting `(width, height)` inside a `bound x bound` box.
    ///
    /// Never upscales: images whose longer side is already within the bound keep their
    /// dimensions. Otherwise the longer side becomes exactly `bound`.
    pub fn calculate_dimensions(width: u32, height: u32, bound: u32) -> (u32, u32) {
        let longer = width.max(height);
        if longer <= bound {
            return (width, height);
        }

        let scale = |side: u32| -> u32 {
            let scaled = (side as f64 * bound as f64 / longer as f64).round() as u32;
            scaled.clamp(1, bound)
        };

        if width >= height {
            (bound, scale(height))
        } else {
            (scale(width), bound)
        }
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Downscale `buffer` so its longer side is at most `bound`, in a single pass.
    pub fn fit_within(buffer: ImageBuffer, bound: u32) -> Result<ImageBuffer, ProcessingError> {
        if bound == 0 {
            return Err(ProcessingError::Transform(
                "bound must be greater than zero".to_string(),
            ));
        }

        let (width, height) = buffer.dimensions();
        if width == 0 || height == 0 {
            return Err(ProcessingError::Transform(format!(
                "image has zero area ({}x{})",
                width, height
            )));
        }

        let (target_width, target_height) = Self::calculate_dimensions(width, height, bound);
        if (target_width, target_height) == (width, height) {
            tracing::debug!(width, height, bound, "Image already within bound");
            return Ok(buffer);
        }

        let format = buffer.format();
        let img = buffer.into_image();
        let filter = Self::select_filter(width, height, target_width, target_height);
        let resized = img.resize_exact(target_width, target_height, filter);

        tracing::debug!(
            from_width = width,
            from_height = height,
            to_width = resized.width(),
            to_height = resized.height(),
            filter = ?filter,
            "Image resized"
        );

        Ok(ImageBuffer::new(resized, format))
    }
}
