//! Image fixtures generated in memory

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 241) as u8, ((x / 7 + y / 5) % 256) as u8])
    })
}

pub fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut data = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut data), format)
        .expect("fixture should encode");
    data
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255])
    });
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

/// Decode fixture or derivative bytes, returning format and dimensions
pub fn inspect(data: &[u8]) -> (ImageFormat, u32, u32) {
    let format = image::guess_format(data).expect("derivative should be an image");
    let image = image::load_from_memory(data).expect("derivative should decode");
    (format, image.width(), image.height())
}
