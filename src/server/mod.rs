//! CampusEvents Dev Server
//!
//! Serves the built browser UI and fronts the REST backend, built with Axum.
//!
//! # Endpoints
//!
//! - `ANY /api/*` - Forwarded to `backend.url`
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//! - anything else - File from `server.static_dir`, falling back to
//!   `index.html` so client-side routes survive a reload
//!
//! # Example
//!
//! ```rust,no_run
//! use campus_events::config::Config;
//! use campus_events::server::{serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::new(Config::load_default())?;
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let static_dir = state.static_dir();
    let spa = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));
    let cors = cors_layer(&state.config.server.cors_origins);

    let shared_state = Arc::new(state);

    Router::new()
        .route("/api/*path", any(routes::proxy::forward))
        .nest("/health", health_routes)
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS from the configured origins; permissive when none are listed
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the dev server
pub async fn serve(state: AppState) -> Result<(), ServerError> {
    let addr = state.config.server.bind_addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("CampusEvents server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("CampusEvents server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        extract::Query,
        http::{Request, StatusCode},
        routing::post,
        Json,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    /// Fake backend that echoes what it received
    async fn spawn_backend() -> String {
        let router = Router::new().route(
            "/api/events",
            post(
                |Query(q): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                    Json(json!({
                        "data": {"received": body, "query": q},
                        "errors": [],
                        "hasErrors": false
                    }))
                },
            ),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn create_test_app(backend_url: String, static_dir: &std::path::Path) -> Router {
        let mut config = Config::default();
        config.backend.url = backend_url;
        config.backend.timeout_secs = 5;
        config.server.static_dir = static_dir.to_string_lossy().to_string();
        build_router(AppState::new(config).unwrap())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let dir = tempdir().unwrap();
        let app = create_test_app(closed_port_url().await, dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_backend() {
        let dir = tempdir().unwrap();
        let app = create_test_app(closed_port_url().await, dir.path());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["backend"], "unreachable");
    }

    #[tokio::test]
    async fn test_proxy_forwards_body_and_query() {
        let dir = tempdir().unwrap();
        let app = create_test_app(spawn_backend().await, dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/events?source=ui")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"title": "Career Fair"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["received"]["title"], "Career Fair");
        assert_eq!(body["data"]["query"]["source"], "ui");
    }

    #[tokio::test]
    async fn test_proxy_passes_upstream_status() {
        let dir = tempdir().unwrap();
        let app = create_test_app(spawn_backend().await, dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_proxy_backend_down() {
        let dir = tempdir().unwrap();
        let app = create_test_app(closed_port_url().await, dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body["hasErrors"], true);
        assert_eq!(body["errors"][0]["message"], "Backend unavailable");
    }

    #[tokio::test]
    async fn test_spa_fallback() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>campus</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        let app = create_test_app(closed_port_url().await, dir.path());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/chatroom/12")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<html>campus</html>");

        let response = app
            .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"console.log(1)");
    }

    #[test]
    fn test_cors_layer_skips_invalid_origin() {
        // Building must not panic on a bad entry
        let _layer = cors_layer(&["http://localhost:8084".to_string(), "bad\norigin".to_string()]);
    }
}
