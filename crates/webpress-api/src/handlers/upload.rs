//! Batch upload and conversion

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::collect_images;
use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::QueryRejection,
    extract::{Multipart, Query, State},
    Json,
};
use std::sync::Arc;
use webpress_core::AppError;
use webpress_processing::{ConversionParams, ConversionRequest, ConversionResult, RawConversionParams};

/// `POST /upload`: convert every `images` part to WebP and return their URLs in order.
///
/// Query parameters are validated before any part is read.
#[tracing::instrument(skip(state, query, multipart), fields(operation = "upload_images"))]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RawConversionParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ConversionResult>, HttpAppError> {
    let Query(raw) = query.map_err(|e| {
        AppError::InvalidInput(format!("Invalid query string: {}", e.body_text()))
    })?;
    let params = ConversionParams::parse(&raw)?;

    // Anything that is not a multipart body carries no images.
    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Upload without a multipart body");
        AppError::NoFiles
    })?;

    let images = collect_images(multipart, state.config.max_file_size_bytes).await?;
    let request = ConversionRequest::new(images, params)?;
    let image_count = request.image_count();

    let result = state.converter.convert(request).await?;

    tracing::info!(
        image_count = image_count,
        width = ?params.width,
        height = ?params.height,
        quality = params.quality,
        maintain_aspect_ratio = params.maintain_aspect_ratio,
        "Images converted"
    );

    Ok(Json(result))
}
