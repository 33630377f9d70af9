//! LUMEN API - REST Layer
//!
//! Axum routes over the keyed-store repositories. Project mutations drive the
//! portfolio sync bridge; the public portfolio routes only ever read its
//! cache. Errors are returned as structured [`ApiError`] JSON.

pub mod config;
pub mod error;
pub mod macros;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod types;

pub use config::{ApiConfig, StoreBackend};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
