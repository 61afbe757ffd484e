use image::{DynamicImage, GenericImageView};

/// Intrinsic dimensions of a decoded source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
}

impl ImageMetadata {
    pub fn from_image(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_from_image() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 10, Rgba([0, 0, 0, 255])));
        let meta = ImageMetadata::from_image(&img);
        assert_eq!(meta, ImageMetadata { width: 40, height: 10 });
        assert_eq!(meta.aspect_ratio(), 4.0);
    }
}
