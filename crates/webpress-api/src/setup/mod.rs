//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use webpress_core::Config;

/// Initialize the entire application: tracing, storage, state and routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    webpress_infra::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        output_dir = %config.output_dir.display(),
        public_base_url = %config.public_base_url,
        "Configuration loaded and validated successfully"
    );

    build_app(config).await
}

/// Build state and router without touching global tracing state.
pub async fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(config, storage));

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
