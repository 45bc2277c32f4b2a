//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (backend answers at all)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::server::state::AppState;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// healthy or degraded
    pub status: String,
    /// Backend the `/api` proxy forwards to
    pub backend_url: String,
    /// reachable or unreachable
    pub backend: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Any HTTP answer from the backend counts as ready; only transport
/// failures make the server unready.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if backend_reachable(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let reachable = backend_reachable(&state).await;

    Json(HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        backend_url: state.backend_url().to_string(),
        backend: if reachable { "reachable" } else { "unreachable" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn backend_reachable(state: &AppState) -> bool {
    state
        .http
        .get(state.backend_url())
        .timeout(Duration::from_secs(2))
        .send()
        .await
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        assert_eq!(liveness().await, StatusCode::OK);
    }
}
