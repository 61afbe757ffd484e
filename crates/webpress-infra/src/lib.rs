//! Webpress Infrastructure Library
//!
//! Shared infrastructure for the webpress service:
//! - Middleware (request ID, security headers)
//! - Tracing initialization

pub mod middleware;
pub mod telemetry;

pub use middleware::{request_id_middleware, security_headers_middleware, RequestId};
pub use telemetry::{init_telemetry, shutdown_telemetry};
