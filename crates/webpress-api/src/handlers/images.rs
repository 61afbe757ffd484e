//! Serving converted images

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;
use std::sync::Arc;
use webpress_core::AppError;
use webpress_processing::compression::WEBP_CONTENT_TYPE;

/// `GET /images/{name}`: stream a stored output.
#[tracing::instrument(skip(state), fields(operation = "get_image"))]
pub async fn get_image(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    let stream = state.storage.download_stream(&name).await?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, WEBP_CONTENT_TYPE)
        // Names are never reused, so a stored output never changes.
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
