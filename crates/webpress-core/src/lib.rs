//! Webpress Core Library
//!
//! This crate provides the configuration, error taxonomy and shared limits
//! used by every webpress component.

pub mod config;
pub mod constants;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
