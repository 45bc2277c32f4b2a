//! Application State
//!
//! Shared state accessible by all handlers, wrapped in `Arc` by the router.

use crate::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::error::ServerError;

/// Shared state for the dev server
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Upstream HTTP client, reused across proxied requests
    pub http: reqwest::Client,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()
            .map_err(|e| ServerError::Internal(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            http,
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Backend base URL without a trailing slash
    pub fn backend_url(&self) -> &str {
        self.config.backend.url.trim_end_matches('/')
    }

    pub fn static_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.server.static_dir)
    }
}
