//! Site Settings Routes

use std::sync::Arc;

use axum::{extract::State, Json};
use lumen_core::SiteSettings;
use lumen_storage::SettingsRepository;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// GET /api/v1/settings - Current site settings
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    tag = "Settings",
    responses(
        (status = 200, description = "Site settings (defaults when never saved)", body = SiteSettings),
    ),
)]
pub async fn get_settings(
    State(settings): State<Arc<SettingsRepository>>,
) -> ApiResult<Json<SiteSettings>> {
    Ok(Json(settings.get()?))
}

/// PUT /api/v1/settings - Replace site settings
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    tag = "Settings",
    request_body = SiteSettings,
    responses(
        (status = 200, description = "Settings saved", body = SiteSettings),
        (status = 400, description = "Invalid settings", body = ApiError),
    ),
)]
pub async fn put_settings(
    State(settings): State<Arc<SettingsRepository>>,
    Json(req): Json<SiteSettings>,
) -> ApiResult<Json<SiteSettings>> {
    settings.put(&req)?;
    Ok(Json(req))
}

/// Create the settings routes router.
pub fn create_router() -> axum::Router<AppState> {
    axum::Router::new().route("/", axum::routing::get(get_settings).put(put_settings))
}
