//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for request handling
#[derive(Error, Debug)]
pub enum ApiError {
    /// No route matches the request
    #[error("Not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
        };

        let body = Json(json!({
            "detail": detail,
        }));

        (status, body).into_response()
    }
}

/// Errors that stop the service before it starts serving
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A CORS origin is not a valid header value
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
}
