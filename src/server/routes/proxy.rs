//! API Proxy
//!
//! Forwards `/api/*` to the configured backend so the browser UI can use
//! same-origin requests. Method, path, query, body and the content
//! negotiation headers pass through unchanged. The upstream status and body
//! come back as-is.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::Response,
};
use std::sync::Arc;

use crate::server::error::{ServerError, ServerResult};
use crate::server::state::AppState;

/// Request headers copied to the backend
const FORWARDED_HEADERS: &[&str] = &["content-type", "accept", "authorization", "cookie"];

/// ANY /api/*path
pub async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ServerResult<Response> {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let target = format!("{}{}", state.backend_url(), path);

    let upstream_method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| ServerError::Internal(format!("method {}: {}", method, e)))?;

    let mut request = state.http.request(upstream_method, &target);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(*name).and_then(|v| v.to_str().ok()) {
            request = request.header(*name, value);
        }
    }
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    tracing::debug!(method = %method, url = %target, "forwarding to backend");

    let upstream = request.send().await.map_err(|e| {
        tracing::warn!(url = %target, error = %e, "backend request failed");
        if e.is_timeout() {
            ServerError::GatewayTimeout(e.to_string())
        } else {
            ServerError::BadGateway(e.to_string())
        }
    })?;

    let status = upstream.status().as_u16();
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let set_cookie: Vec<String> = upstream
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();

    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ServerError::BadGateway(e.to_string()))?;

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    for cookie in set_cookie {
        builder = builder.header(header::SET_COOKIE, cookie);
    }

    builder
        .body(Body::from(bytes.to_vec()))
        .map_err(|e| ServerError::Internal(format!("response: {}", e)))
}
