//! Multipart collection for the upload handler

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use webpress_core::constants::{IMAGES_FIELD, MAX_FILES_PER_REQUEST};
use webpress_core::AppError;
use webpress_processing::params::is_image_content_type;
use webpress_processing::SourceImage;

/// Read every `images` part of the form, in order.
///
/// Parts are checked as they arrive: a non-image content type, an oversized
/// file or a part beyond the batch limit stops reading immediately. Plain
/// text fields are ignored; file parts under any other name are rejected.
pub async fn collect_images(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<Vec<SourceImage>, AppError> {
    let mut images = Vec::new();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name != IMAGES_FIELD {
            if field.file_name().is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Unexpected file field '{}'; send images in the '{}' field",
                    field_name, IMAGES_FIELD
                )));
            }
            continue;
        }

        if images.len() == MAX_FILES_PER_REQUEST {
            return Err(AppError::too_many_files(images.len() + 1));
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        if !is_image_content_type(&content_type) {
            return Err(AppError::UnsupportedFileType(content_type));
        }

        let data = read_field_limited(&mut field, max_file_size).await?;
        tracing::debug!(
            index = images.len(),
            file_name = ?file_name,
            content_type = %content_type,
            size_bytes = data.len(),
            "Received image part"
        );

        images.push(SourceImage::new(file_name, content_type, data)?);
    }

    Ok(images)
}

async fn read_field_limited(field: &mut Field<'_>, max_file_size: usize) -> Result<Bytes, AppError> {
    let mut buffer = BytesMut::new();

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if buffer.len() + chunk.len() > max_file_size {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the maximum size of {} bytes",
                max_file_size
            )));
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}
