use image::{DynamicImage, GenericImageView};

use crate::metadata::ImageMetadata;

/// Target dimensions for one image. An unset side is derived from the source
/// aspect ratio when the plan is applied; an empty plan means no resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizePlan {
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
}

impl ResizePlan {
    /// Plan the resize of an image with the given metadata.
    ///
    /// Without `maintain_aspect_ratio` the requested sides pass through
    /// unchanged. With it, a lone side determines the other from the source
    /// aspect ratio, and two sides act as a bounding box the result fits into.
    pub fn compute(
        metadata: ImageMetadata,
        width: Option<u32>,
        height: Option<u32>,
        maintain_aspect_ratio: bool,
    ) -> Self {
        if !maintain_aspect_ratio {
            return Self {
                target_width: width,
                target_height: height,
            };
        }

        let aspect_ratio = metadata.aspect_ratio();

        let (target_width, target_height) = match (width, height) {
            (Some(w), Some(h)) => {
                if w as f64 / h as f64 > aspect_ratio {
                    (round_dimension(h as f64 * aspect_ratio), h)
                } else {
                    (w, round_dimension(w as f64 / aspect_ratio))
                }
            }
            (Some(w), None) => (w, round_dimension(w as f64 / aspect_ratio)),
            (None, Some(h)) => (round_dimension(h as f64 * aspect_ratio), h),
            (None, None) => return Self::default(),
        };

        Self {
            target_width: Some(target_width),
            target_height: Some(target_height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.target_width.is_none() && self.target_height.is_none()
    }
}

/// Nearest integer, halves away from zero, never below one pixel.
fn round_dimension(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Concrete output size for a plan, or `None` when the plan is empty.
    pub fn target_dimensions(metadata: ImageMetadata, plan: ResizePlan) -> Option<(u32, u32)> {
        match (plan.target_width, plan.target_height) {
            (Some(w), Some(h)) => Some((w, h)),
            (Some(w), None) => Some((w, round_dimension(w as f64 / metadata.aspect_ratio()))),
            (None, Some(h)) => Some((round_dimension(h as f64 * metadata.aspect_ratio()), h)),
            (None, None) => None,
        }
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> image::imageops::FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            image::imageops::FilterType::Triangle
        } else if max_ratio > 1.5 {
            image::imageops::FilterType::CatmullRom
        } else {
            image::imageops::FilterType::Lanczos3
        }
    }

    /// Resize image to exact dimensions
    pub fn resize_image(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }

    /// Apply a plan; an empty plan or one matching the source size returns the image as is.
    pub fn apply(img: DynamicImage, plan: ResizePlan) -> DynamicImage {
        let metadata = ImageMetadata::from_image(&img);
        match Self::target_dimensions(metadata, plan) {
            Some((w, h)) if (w, h) != (metadata.width, metadata.height) => {
                Self::resize_image(&img, w, h)
            }
            _ => img,
        }
    }
}
