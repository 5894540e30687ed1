//! Error types for the focus server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use focus_engine::FocusError;
use thiserror::Error;

/// Configuration-related errors, reported at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors surfaced to HTTP clients as `500 {"error": ".."}`.
///
/// A store outage is never turned into a no-slot answer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Focus(#[from] FocusError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "focus suggestion failed");
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
