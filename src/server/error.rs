//! Server Error Types
//!
//! Errors are rendered as envelopes so the browser UI treats a dead
//! backend exactly like any other rejected call.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{Envelope, FieldError};

/// Message the UI receives when the backend cannot be reached
pub const BACKEND_UNAVAILABLE: &str = "Backend unavailable";

#[derive(Error, Debug)]
pub enum ServerError {
    /// Upstream transport failure
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Upstream did not answer in time
    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY", BACKEND_UNAVAILABLE),
            ServerError::GatewayTimeout(_) => {
                (StatusCode::GATEWAY_TIMEOUT, "GATEWAY_TIMEOUT", BACKEND_UNAVAILABLE)
            }
            ServerError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal error")
            }
            ServerError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR", "Internal error"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Server error occurred"
        );

        let body: Envelope<serde_json::Value> = Envelope::failed(vec![FieldError {
            property: String::new(),
            message: message.to_string(),
        }]);

        let mut response = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }
        response
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
