use webpress_core::AppError;

/// Failures of a conversion request, from validation through storage.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Too many files: {count} received, maximum is {max}")]
    TooManyFiles { count: usize, max: usize },

    #[error("No images provided")]
    NoFiles,

    #[error("Image conversion failed")]
    ConversionFailed(#[source] anyhow::Error),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidParameters(msg) => AppError::InvalidInput(msg),
            ConversionError::UnsupportedFileType(content_type) => {
                AppError::UnsupportedFileType(content_type)
            }
            ConversionError::TooManyFiles { count, max } => AppError::TooManyFiles { count, max },
            ConversionError::NoFiles => AppError::NoFiles,
            ConversionError::ConversionFailed(source) => AppError::ConversionFailed { source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webpress_core::ErrorMetadata;

    #[test]
    fn test_maps_to_app_error_statuses() {
        let err: AppError = ConversionError::InvalidParameters("width must be an integer between 1 and 5000".into()).into();
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "width must be an integer between 1 and 5000");

        let err: AppError = ConversionError::TooManyFiles { count: 21, max: 20 }.into();
        assert_eq!(err.client_message(), "Too many files: maximum 20 images per request");

        let err: AppError = ConversionError::NoFiles.into();
        assert_eq!(err.error_code(), "NO_FILES");

        let err: AppError = ConversionError::ConversionFailed(anyhow::anyhow!("bad PNG")).into();
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Image conversion failed");
    }
}
