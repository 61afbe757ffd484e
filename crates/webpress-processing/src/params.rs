//! Conversion request parameters
//!
//! Query strings arrive as raw optional strings and are turned into a typed
//! [`ConversionParams`] in one pure step. Numeric values are parsed strictly:
//! only plain base-10 digits are accepted, so `"12abc"`, `"1.5"`, `"+3"` and
//! `" 7"` are all rejected rather than coerced.

use bytes::Bytes;
use serde::Deserialize;
use webpress_core::constants::{
    DEFAULT_QUALITY, MAX_DIMENSION, MAX_FILES_PER_REQUEST, MAX_QUALITY, MIN_QUALITY,
};

use crate::error::ConversionError;

/// Query parameters exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConversionParams {
    pub width: Option<String>,
    pub height: Option<String>,
    pub quality: Option<String>,
    #[serde(rename = "maintainAspectRatio")]
    pub maintain_aspect_ratio: Option<String>,
}

/// Validated conversion parameters shared by every image of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: u8,
    pub maintain_aspect_ratio: bool,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            quality: DEFAULT_QUALITY,
            maintain_aspect_ratio: false,
        }
    }
}

impl ConversionParams {
    pub fn parse(raw: &RawConversionParams) -> Result<Self, ConversionError> {
        let width = parse_bounded("width", raw.width.as_deref(), 1, MAX_DIMENSION)?;
        let height = parse_bounded("height", raw.height.as_deref(), 1, MAX_DIMENSION)?;
        let quality = parse_bounded(
            "quality",
            raw.quality.as_deref(),
            MIN_QUALITY as u32,
            MAX_QUALITY as u32,
        )?
        .map(|q| q as u8)
        .unwrap_or(DEFAULT_QUALITY);

        Ok(Self {
            width,
            height,
            quality,
            maintain_aspect_ratio: raw.maintain_aspect_ratio.as_deref() == Some("true"),
        })
    }
}

/// Parse an optional integer parameter within `[min, max]`. Absent and empty
/// values both mean "not given".
fn parse_bounded(
    name: &str,
    value: Option<&str>,
    min: u32,
    max: u32,
) -> Result<Option<u32>, ConversionError> {
    let value = match value {
        None | Some("") => return Ok(None),
        Some(v) => v,
    };

    let invalid = || {
        ConversionError::InvalidParameters(format!(
            "{} must be an integer between {} and {}",
            name, min, max
        ))
    };

    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let parsed: u32 = value.parse().map_err(|_| invalid())?;
    if parsed < min || parsed > max {
        return Err(invalid());
    }

    Ok(Some(parsed))
}

/// One uploaded image as read from a multipart part.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

impl SourceImage {
    /// Accepts any `image/*` content type; everything else is rejected.
    pub fn new(
        file_name: Option<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Result<Self, ConversionError> {
        let content_type = content_type.into();
        if !is_image_content_type(&content_type) {
            return Err(ConversionError::UnsupportedFileType(content_type));
        }

        Ok(Self {
            file_name,
            content_type,
            data,
        })
    }
}

pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .get(..6)
        .map(|prefix| prefix.eq_ignore_ascii_case("image/"))
        .unwrap_or(false)
}

/// A validated batch: between one and `MAX_FILES_PER_REQUEST` images plus
/// the parameters applied to each of them.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    images: Vec<SourceImage>,
    params: ConversionParams,
}

impl ConversionRequest {
    pub fn new(images: Vec<SourceImage>, params: ConversionParams) -> Result<Self, ConversionError> {
        if images.is_empty() {
            return Err(ConversionError::NoFiles);
        }
        if images.len() > MAX_FILES_PER_REQUEST {
            return Err(ConversionError::TooManyFiles {
                count: images.len(),
                max: MAX_FILES_PER_REQUEST,
            });
        }

        Ok(Self { images, params })
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn into_parts(self) -> (Vec<SourceImage>, ConversionParams) {
        (self.images, self.params)
    }
}
