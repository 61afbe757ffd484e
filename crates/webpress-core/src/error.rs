//! Error types module
//!
//! All request-level failures are unified under `AppError`. Each variant
//! self-describes how it should be presented over HTTP through the
//! `ErrorMetadata` trait; the API crate turns that into a response.

use std::io;

use crate::constants::MAX_FILES_PER_REQUEST;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "CONVERSION_FAILED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Too many files: {count} received, maximum is {max}")]
    TooManyFiles { count: usize, max: usize },

    #[error("No files provided")]
    NoFiles,

    #[error("Image conversion failed")]
    ConversionFailed {
        #[source]
        source: anyhow::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::InvalidInput(_) => (400, "INVALID_PARAMETERS", false, LogLevel::Debug),
        AppError::UnsupportedFileType(_) => (400, "UNSUPPORTED_FILE_TYPE", false, LogLevel::Debug),
        AppError::TooManyFiles { .. } => (400, "TOO_MANY_FILES", false, LogLevel::Debug),
        AppError::NoFiles => (400, "NO_FILES", false, LogLevel::Debug),
        AppError::ConversionFailed { .. } => (500, "CONVERSION_FAILED", true, LogLevel::Error),
        AppError::NotFound(_) => (404, "NOT_FOUND", false, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, LogLevel::Warn),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidParameters",
            AppError::UnsupportedFileType(_) => "UnsupportedFileType",
            AppError::TooManyFiles { .. } => "TooManyFiles",
            AppError::NoFiles => "NoFiles",
            AppError::ConversionFailed { .. } => "ConversionFailed",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::UnsupportedFileType(_) => "Only image files are allowed".to_string(),
            AppError::TooManyFiles { max, .. } => {
                format!("Too many files: maximum {} images per request", max)
            }
            AppError::NoFiles => "No images provided".to_string(),
            AppError::ConversionFailed { .. } => "Image conversion failed".to_string(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

impl AppError {
    /// Too-many-files error against the standard batch limit.
    pub fn too_many_files(count: usize) -> Self {
        AppError::TooManyFiles {
            count,
            max: MAX_FILES_PER_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_invalid_input() {
        let err = AppError::InvalidInput("quality must be between 1 and 100".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_PARAMETERS");
        assert_eq!(err.client_message(), "quality must be between 1 and 100");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_batch_shape_errors() {
        let err = AppError::too_many_files(21);
        assert_eq!(err.http_status_code(), 400);
        assert!(err.client_message().contains("maximum 20"));

        let err = AppError::NoFiles;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "No images provided");

        let err = AppError::UnsupportedFileType("text/plain".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "Only image files are allowed");
    }

    #[test]
    fn test_conversion_failed_hides_cause() {
        let err = AppError::ConversionFailed {
            source: anyhow::anyhow!("corrupt PNG chunk in upload-3.png"),
        };
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Image conversion failed");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(err.detailed_message().contains("corrupt PNG chunk"));
    }

    #[test]
    fn test_internal_errors_use_generic_message() {
        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");

        let err = AppError::from(io::Error::other("boom"));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.client_message(), "Internal server error");
    }
}
