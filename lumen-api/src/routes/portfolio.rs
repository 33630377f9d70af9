//! Public Portfolio Routes
//!
//! Read-only view over the projected portfolio cache. Only the forced sync
//! writes, and it writes through the same bridge the project handlers use.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use lumen_core::PortfolioProject;
use lumen_storage::PortfolioSync;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::{PortfolioResponse, SyncResponse},
};

/// GET /api/v1/portfolio - Projected portfolio for the public pages
#[utoipa::path(
    get,
    path = "/api/v1/portfolio",
    tag = "Portfolio",
    responses(
        (status = 200, description = "Projected portfolio, or the built-in examples", body = PortfolioResponse),
    ),
)]
pub async fn list_portfolio(State(portfolio): State<Arc<PortfolioSync>>) -> impl IntoResponse {
    Json(PortfolioResponse::from(portfolio.projected()))
}

/// GET /api/v1/portfolio/{id} - One projected project
#[utoipa::path(
    get,
    path = "/api/v1/portfolio/{id}",
    tag = "Portfolio",
    params(
        ("id" = String, Path, description = "Projected id (slug, or canonical id when no slug)")
    ),
    responses(
        (status = 200, description = "Projected project", body = PortfolioProject),
        (status = 404, description = "No such portfolio entry", body = ApiError),
    ),
)]
pub async fn get_portfolio_project(
    State(portfolio): State<Arc<PortfolioSync>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PortfolioProject>> {
    portfolio
        .find(&id)
        .map(Json)
        .ok_or_else(|| ApiError::entity_not_found("PortfolioProject", &id))
}

/// POST /api/v1/portfolio/sync - Force a full resync
#[utoipa::path(
    post,
    path = "/api/v1/portfolio/sync",
    tag = "Portfolio",
    responses(
        (status = 200, description = "Sync outcome", body = SyncResponse),
    ),
)]
pub async fn sync_portfolio(State(portfolio): State<Arc<PortfolioSync>>) -> Json<SyncResponse> {
    Json(SyncResponse::from(portfolio.sync()))
}

/// Create the portfolio routes router.
pub fn create_router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(list_portfolio))
        .route("/sync", axum::routing::post(sync_portfolio))
        .route("/:id", axum::routing::get(get_portfolio_project))
}
