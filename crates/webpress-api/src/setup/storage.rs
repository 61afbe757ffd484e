//! Storage backend setup

use anyhow::{Context, Result};
use std::sync::Arc;
use webpress_core::Config;
use webpress_storage::{LocalStorage, Storage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.output_dir, config.images_base_url())
        .await
        .context("Failed to initialize local storage")?;

    tracing::info!(
        path = %storage.base_path().display(),
        base_url = %config.images_base_url(),
        "Local storage initialized"
    );

    Ok(Arc::new(storage))
}
