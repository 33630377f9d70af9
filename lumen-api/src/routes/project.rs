//! Project REST API Routes
//!
//! Canonical project CRUD. Every successful mutation re-runs the portfolio
//! sync so the public pages never lag behind the admin.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use lumen_core::{Project, ProjectUpdate};
use lumen_storage::PortfolioSync;

use crate::{
    error::{ApiError, ApiResult},
    routes::window,
    state::{AppState, ProjectRepo},
    types::{CreateProjectRequest, ListProjectsRequest, ListProjectsResponse},
};

fn resync(portfolio: &PortfolioSync) {
    let outcome = portfolio.sync();
    tracing::debug!(?outcome, "Portfolio resynced after project mutation");
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/projects - List canonical projects
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    params(ListProjectsRequest),
    responses(
        (status = 200, description = "List of projects", body = ListProjectsResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn list_projects(
    State(repo): State<ProjectRepo>,
    Query(params): Query<ListProjectsRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut projects = repo.list()?;

    if let Some(term) = params.search.as_deref() {
        projects.retain(|p| p.matches_search(term));
    }
    if let Some(featured) = params.featured {
        projects.retain(|p| p.featured == featured);
    }

    let total = projects.len();
    let projects = window(projects, params.offset, params.limit)?;

    Ok(Json(ListProjectsResponse { projects, total }))
}

/// POST /api/v1/projects - Create a project
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = Project),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 409, description = "Slug already in use", body = ApiError),
    ),
)]
pub async fn create_project(
    State(repo): State<ProjectRepo>,
    State(portfolio): State<Arc<PortfolioSync>>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<impl IntoResponse> {
    let project = req.into_project(Utc::now());
    project.validate()?;

    repo.insert(&project)?;
    tracing::info!(id = %project.id, title = %project.title, "Project created");
    resync(&portfolio);

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id} - Get project by ID
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = Project),
        (status = 404, description = "Project not found", body = ApiError),
    ),
)]
pub async fn get_project(
    State(repo): State<ProjectRepo>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let project = repo
        .get(&id)?
        .ok_or_else(|| ApiError::entity_not_found("Project", &id))?;
    Ok(Json(project))
}

/// PATCH /api/v1/projects/{id} - Update a project
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = ProjectUpdate,
    responses(
        (status = 200, description = "Project updated successfully", body = Project),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Project not found", body = ApiError),
        (status = 409, description = "Slug already in use", body = ApiError),
    ),
)]
pub async fn update_project(
    State(repo): State<ProjectRepo>,
    State(portfolio): State<Arc<PortfolioSync>>,
    Path(id): Path<String>,
    Json(req): Json<ProjectUpdate>,
) -> ApiResult<impl IntoResponse> {
    if req.is_empty() {
        return Err(ApiError::invalid_input(
            "At least one field must be provided for update",
        ));
    }

    let mut project = repo
        .get(&id)?
        .ok_or_else(|| ApiError::entity_not_found("Project", &id))?;
    req.apply(&mut project, Utc::now());
    project.validate()?;

    repo.update(&project)?;
    tracing::info!(id = %project.id, "Project updated");
    resync(&portfolio);

    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id} - Delete a project
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 204, description = "Project deleted successfully"),
        (status = 404, description = "Project not found", body = ApiError),
    ),
)]
pub async fn delete_project(
    State(repo): State<ProjectRepo>,
    State(portfolio): State<Arc<PortfolioSync>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    repo.delete(&id)?;
    tracing::info!(id = %id, "Project deleted");
    resync(&portfolio);
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the project routes router.
pub fn create_router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::post(create_project))
        .route("/", axum::routing::get(list_projects))
        .route("/:id", axum::routing::get(get_project))
        .route("/:id", axum::routing::patch(update_project))
        .route("/:id", axum::routing::delete(delete_project))
}
