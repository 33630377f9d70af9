//! REST API Routes Module
//!
//! Route handlers organized by entity type:
//! - Canonical project CRUD (each mutation resyncs the portfolio)
//! - Public portfolio reads and forced sync
//! - Testimonials, inquiries and site settings
//! - Health check endpoints (Kubernetes-compatible)
//! - CORS support for the browser-based public site

pub mod health;
pub mod inquiry;
pub mod portfolio;
pub mod project;
pub mod settings;
pub mod testimonial;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::types::MAX_LIST_LIMIT;

// Re-export route creation functions for convenience
pub use health::create_router as health_router;
pub use inquiry::create_router as inquiry_router;
pub use portfolio::create_router as portfolio_router;
pub use project::create_router as project_router;
pub use settings::create_router as settings_router;
pub use testimonial::create_router as testimonial_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ============================================================================
// LIST WINDOWING
// ============================================================================

/// Apply `offset`/`limit` to an already filtered list.
pub(crate) fn window<T>(
    items: Vec<T>,
    offset: Option<usize>,
    limit: Option<usize>,
) -> ApiResult<Vec<T>> {
    let limit = match limit {
        Some(0) => return Err(ApiError::invalid_range("limit", 1, MAX_LIST_LIMIT)),
        Some(n) if n > MAX_LIST_LIMIT => {
            return Err(ApiError::invalid_range("limit", 1, MAX_LIST_LIMIT))
        }
        Some(n) => n,
        None => MAX_LIST_LIMIT,
    };
    Ok(items
        .into_iter()
        .skip(offset.unwrap_or(0))
        .take(limit)
        .collect())
}

// ============================================================================
// CORS
// ============================================================================

/// Build the CORS layer from configuration.
pub fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - Entity routes under /api/v1/*
/// - Health checks at /health/*
/// - OpenAPI spec at /openapi.json
///
/// Authentication is handled by the session provider in front of this
/// service, so no auth middleware is layered here.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    let api = Router::new()
        .nest("/projects", project_router())
        .nest("/portfolio", portfolio_router())
        .nest("/testimonials", testimonial_router())
        .nest("/inquiries", inquiry_router())
        .nest("/settings", settings_router());

    Router::new()
        .nest("/api/v1", api)
        .nest("/health", health_router())
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
        .with_state(state)
}
