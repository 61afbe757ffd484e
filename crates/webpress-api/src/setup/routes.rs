//! Router assembly

use crate::handlers::{health::health_check, images::get_image, upload::upload_images};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use webpress_core::constants::IMAGES_ROUTE_PREFIX;
use webpress_core::Config;
use webpress_infra::middleware::{
    request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};

pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let body_limit = config.max_request_body_bytes();
    tracing::info!(
        max_file_size_bytes = config.max_file_size_bytes,
        max_request_body_bytes = body_limit,
        "Request body limits configured"
    );

    let app = Router::new()
        .route("/upload", post(upload_images))
        .route(&format!("{}/{{name}}", IMAGES_ROUTE_PREFIX), get(get_image))
        .route("/health", get(health_check))
        // The tower-http layer below enforces the limit for every route.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            config.is_production(),
            security_headers_middleware,
        ))
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let request_id = HeaderName::from_bytes(REQUEST_ID_HEADER.as_bytes())?;

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    Ok(cors
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([request_id]))
}
