//! Webpress API Library
//!
//! HTTP handlers, error mapping and application setup for the image
//! conversion service.

mod handlers;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
