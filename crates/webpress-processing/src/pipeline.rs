//! Batch converter
//!
//! Converts the images of one request strictly in order and stores each
//! result. The first failure aborts the batch; outputs already written for
//! that batch are removed before the error is returned.

use anyhow::anyhow;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use webpress_storage::Storage;

use crate::compression::WEBP_EXTENSION;
use crate::error::ConversionError;
use crate::params::{ConversionParams, ConversionRequest, SourceImage};
use crate::transformer::ImageTransformer;

/// Public URLs of the converted images, in input order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConversionResult {
    pub urls: Vec<String>,
}

#[derive(Clone)]
pub struct BatchConverter {
    storage: Arc<dyn Storage>,
}

impl BatchConverter {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    #[tracing::instrument(skip(self, request), fields(image_count = request.image_count()))]
    pub async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        let start = Instant::now();
        let (images, params) = request.into_parts();
        let mut written: Vec<String> = Vec::with_capacity(images.len());
        let mut urls = Vec::with_capacity(images.len());

        for (index, image) in images.into_iter().enumerate() {
            let SourceImage {
                file_name,
                content_type,
                data,
            } = image;
            match self.convert_one(data, params).await {
                Ok((key, url)) => {
                    written.push(key);
                    urls.push(url);
                }
                Err(e) => {
                    tracing::error!(
                        index = index,
                        file_name = ?file_name,
                        content_type = %content_type,
                        error = %format!("{:#}", e),
                        "Image conversion failed, aborting batch"
                    );
                    self.cleanup(&written).await;
                    return Err(ConversionError::ConversionFailed(e));
                }
            }
        }

        tracing::info!(
            image_count = urls.len(),
            quality = params.quality,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Batch converted"
        );

        Ok(ConversionResult { urls })
    }

    async fn convert_one(
        &self,
        data: Bytes,
        params: ConversionParams,
    ) -> Result<(String, String), anyhow::Error> {
        let converted =
            tokio::task::spawn_blocking(move || ImageTransformer::convert(&data, &params))
                .await
                .map_err(|e| anyhow!("Conversion task failed: {}", e))??;

        let stored = self
            .storage
            .upload(WEBP_EXTENSION, converted.data)
            .await?;
        Ok(stored)
    }

    async fn cleanup(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.storage.delete(key).await {
                tracing::warn!(
                    error = %e,
                    key = %key,
                    "Failed to clean up output after batch failure"
                );
            }
        }
    }
}
