//! Webpress image processing
//!
//! Query parameter validation, resize planning, WebP compression and the
//! batch converter that ties them to a storage backend.

pub mod compression;
pub mod error;
pub mod metadata;
pub mod params;
pub mod pipeline;
pub mod resize;
pub mod transformer;

pub use compression::WebPCompressor;
pub use error::ConversionError;
pub use metadata::ImageMetadata;
pub use params::{ConversionParams, ConversionRequest, RawConversionParams, SourceImage};
pub use pipeline::{BatchConverter, ConversionResult};
pub use resize::{ImageResize, ResizePlan};
pub use transformer::ImageTransformer;
