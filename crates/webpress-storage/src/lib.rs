//! Webpress Storage Library
//!
//! Storage abstraction for converted images and its local filesystem backend.
//!
//! # Storage key format
//!
//! Keys are flat, single-segment file names such as
//! `1718035200123-9f3a61c2.webp`. They never contain a path separator or
//! `..`; name generation lives in the `keys` module so every writer agrees on
//! the format.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::{generate_output_name, validate_key};
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
