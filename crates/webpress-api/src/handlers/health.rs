//! Health check

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
}

/// `GET /health`: 200 when the storage backend answers, 503 otherwise.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let storage = state.storage.clone();
    let storage_status = run_check(
        TIMEOUT,
        async move { storage.health_check().await },
        "unhealthy",
    )
    .await;

    let healthy = storage_status == "healthy";
    if !healthy {
        tracing::error!(storage = %storage_status, "Health check failed");
    }

    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        storage: storage_status,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_check_outcomes() {
        let ok = run_check(TIMEOUT, async { Ok::<(), String>(()) }, "unhealthy").await;
        assert_eq!(ok, "healthy");

        let failed = run_check(TIMEOUT, async { Err::<(), _>("disk gone") }, "unhealthy").await;
        assert_eq!(failed, "unhealthy: disk gone");

        let slow = run_check(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<(), String>(())
            },
            "unhealthy",
        )
        .await;
        assert_eq!(slow, "timeout");
    }
}
