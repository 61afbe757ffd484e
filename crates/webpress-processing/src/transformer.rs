//! Image transformer - decode, plan, resize and encode one image
//!
//! Everything here is synchronous and CPU bound; callers on the async runtime
//! go through `spawn_blocking`.

use anyhow::Context;
use image::GenericImageView;
use std::io::Cursor;

use crate::compression::WebPCompressor;
use crate::metadata::ImageMetadata;
use crate::params::ConversionParams;
use crate::resize::{ImageResize, ResizePlan};

/// One encoded output image
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub struct ImageTransformer;

impl ImageTransformer {
    pub fn convert(data: &[u8], params: &ConversionParams) -> Result<ConvertedImage, anyhow::Error> {
        let cursor = Cursor::new(data);
        let img = image::ImageReader::new(cursor)
            .with_guessed_format()
            .context("Failed to read image header")?
            .decode()
            .context("Failed to decode image")?;

        let metadata = ImageMetadata::from_image(&img);
        let plan = ResizePlan::compute(
            metadata,
            params.width,
            params.height,
            params.maintain_aspect_ratio,
        );

        if let Some((w, h)) = ImageResize::target_dimensions(metadata, plan) {
            WebPCompressor::check_dimensions(w, h).context("Resize target out of range")?;
            tracing::debug!(
                from_width = metadata.width,
                from_height = metadata.height,
                to_width = w,
                to_height = h,
                "Resizing image"
            );
        }

        let img = ImageResize::apply(img, plan);
        let (width, height) = img.dimensions();
        let data = WebPCompressor::compress(&img, params.quality)?;

        Ok(ConvertedImage {
            data,
            width,
            height,
        })
    }
}
