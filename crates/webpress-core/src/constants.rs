//! Request limits shared by the processing pipeline and the HTTP layer.

/// Maximum number of images accepted in one upload batch.
pub const MAX_FILES_PER_REQUEST: usize = 20;

/// Upper bound for a requested width or height, in pixels.
pub const MAX_DIMENSION: u32 = 5000;

/// Inclusive bounds for the encoder quality parameter.
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Quality applied when the request does not specify one.
pub const DEFAULT_QUALITY: u8 = 80;

/// Multipart field that carries the uploaded images.
pub const IMAGES_FIELD: &str = "images";

/// Path prefix under which converted images are served.
pub const IMAGES_ROUTE_PREFIX: &str = "/images";
