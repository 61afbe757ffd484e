//! Test fixtures: encoded images of chosen sizes and multipart parts.

use axum_test::multipart::Part;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8, 255])
    });
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode fixture");
    buffer
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

pub fn png_part(width: u32, height: u32) -> Part {
    Part::bytes(create_test_png(width, height))
        .file_name(format!("{}x{}.png", width, height))
        .mime_type("image/png")
}

pub fn jpeg_part(width: u32, height: u32) -> Part {
    Part::bytes(create_test_jpeg(width, height))
        .file_name(format!("{}x{}.jpg", width, height))
        .mime_type("image/jpeg")
}

pub fn text_part() -> Part {
    Part::bytes(b"just some text".to_vec())
        .file_name("notes.txt")
        .mime_type("text/plain")
}

/// Declared as PNG but not decodable.
pub fn corrupt_png_part() -> Part {
    Part::bytes(b"\x89PNG\r\n\x1a\nthis is not really a png".to_vec())
        .file_name("broken.png")
        .mime_type("image/png")
}
