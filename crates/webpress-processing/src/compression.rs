use anyhow::{anyhow, Result};
use image::{DynamicImage, GenericImageView};

/// Largest width or height a WebP bitstream can carry.
pub const WEBP_MAX_DIMENSION: u32 = 16383;

pub const WEBP_EXTENSION: &str = "webp";
pub const WEBP_CONTENT_TYPE: &str = "image/webp";

/// Lossy WebP encoder
pub struct WebPCompressor;

impl WebPCompressor {
    /// Encode at `quality` (1-100).
    pub fn compress(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        let (width, height) = img.dimensions();
        Self::check_dimensions(width, height)?;

        let rgba_img = img.to_rgba8();
        let webp_data = Self::encode_rgba(&rgba_img, width, height, quality as f32)?;

        tracing::debug!(
            width = width,
            height = height,
            quality = quality,
            output_bytes = webp_data.len(),
            "Encoded WebP image"
        );

        Ok(webp_data)
    }

    /// `Encoder::encode` unwraps the encoder status; go through the fallible call instead.
    fn encode_rgba(rgba: &[u8], width: u32, height: u32, quality: f32) -> Result<Vec<u8>> {
        let encoder = webp::Encoder::from_rgba(rgba, width, height);
        let memory = encoder
            .encode_simple(false, quality)
            .map_err(|e| anyhow!("WebP encoding failed: {:?}", e))?;
        Ok(memory.to_vec())
    }

    /// Reject sizes the encoder cannot represent before any pixels are touched.
    pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 || width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
            return Err(anyhow!(
                "Image dimensions {}x{} are outside the WebP range (1-{})",
                width,
                height,
                WEBP_MAX_DIMENSION
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, 255])
        }))
    }

    #[test]
    fn test_compress_produces_decodable_webp() {
        let data = WebPCompressor::compress(&gradient(64, 32), 80).unwrap();
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WEBP");

        let decoded = image::ImageReader::new(Cursor::new(&data))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(decoded.dimensions(), (64, 32));
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let img = gradient(128, 128);
        let low = WebPCompressor::compress(&img, 10).unwrap();
        let high = WebPCompressor::compress(&img, 100).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_encoder_error_is_returned() {
        let pixels = [0u8; 4 * 4 * 4];
        let result = WebPCompressor::encode_rgba(&pixels, 4, 4, 150.0);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("WebP encoding failed"));
    }

    #[test]
    fn test_check_dimensions() {
        assert!(WebPCompressor::check_dimensions(1, 1).is_ok());
        assert!(WebPCompressor::check_dimensions(16383, 16383).is_ok());
        assert!(WebPCompressor::check_dimensions(16384, 1).is_err());
        assert!(WebPCompressor::check_dimensions(1, 0).is_err());
    }
}
