//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Domain errors convert into
//! `AppError` first, so every failure renders the same way: status from
//! `ErrorMetadata`, a JSON `ErrorResponse`, and one log line at the error's
//! log level.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use webpress_core::{AppError, ErrorMetadata, LogLevel};
use webpress_processing::ConversionError;
use webpress_storage::StorageError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
            error_type: None,
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: both the trait and AppError are foreign to this crate)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<ConversionError> for HttpAppError {
    fn from(err: ConversionError) -> Self {
        HttpAppError(err.into())
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(_) => AppError::NotFound("Image not found".to_string()),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::UploadFailed(msg)
            | StorageError::DownloadFailed(msg)
            | StorageError::DeleteFailed(msg)
            | StorageError::ConfigError(msg) => AppError::Internal(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let detail = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %detail, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %detail, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %detail, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let mut body = ErrorResponse::new(app_error.client_message(), app_error.error_code());
        // Sensitive errors carry internal causes (paths, decoder output); those stay in the logs.
        if !app_error.is_sensitive() {
            body.details = Some(app_error.detailed_message());
            body.error_type = Some(app_error.error_type().to_string());
        }

        (status, Json(body)).into_response()
    }
}
