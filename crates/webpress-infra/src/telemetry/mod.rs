//! Tracing initialization

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "webpress=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Production logs JSON lines,
/// everything else gets the human readable formatter.
pub fn init_telemetry(is_production: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(is_production.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!is_production).then(tracing_subscriber::fmt::layer))
        .try_init()?;

    tracing::info!(json = is_production, "Tracing initialized");
    Ok(())
}

pub async fn shutdown_telemetry() {
    tracing::debug!("Telemetry shutdown");
}
