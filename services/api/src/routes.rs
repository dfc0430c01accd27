//! API service routes

use axum::{
    Json, Router,
    http::HeaderValue,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ApiConfig,
    error::{ApiError, StartupError},
};

pub const API_TITLE: &str = "The Forum API";
pub const API_DESCRIPTION: &str = "Backend API for The Forum application";
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the router for the API service
pub fn create_router(config: &ApiConfig) -> Result<Router, StartupError> {
    let cors = cors_layer(&config.cors_origins)?;

    Ok(Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// CORS for the web application
///
/// Credentials are allowed, so the requested method and headers are echoed
/// back instead of answering with a wildcard. A `*` origin echoes the
/// request's origin for the same reason.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, StartupError> {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| StartupError::InvalidOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Root endpoint
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "The Forum API is running"
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy"
    }))
}

/// Service metadata, published in OpenAPI form
pub async fn openapi() -> impl IntoResponse {
    Json(json!({
        "openapi": "3.1.0",
        "info": {
            "title": API_TITLE,
            "description": API_DESCRIPTION,
            "version": API_VERSION,
        },
        "paths": {
            "/": { "get": { "summary": "Root" } },
            "/health": { "get": { "summary": "Health Check" } },
        },
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
