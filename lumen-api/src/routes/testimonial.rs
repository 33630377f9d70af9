//! Testimonial REST API Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use lumen_core::{Testimonial, TestimonialUpdate};

use crate::{
    error::{ApiError, ApiResult},
    state::{AppState, TestimonialRepo},
    types::{CreateTestimonialRequest, ListTestimonialsRequest, ListTestimonialsResponse},
};

/// GET /api/v1/testimonials - List testimonials
#[utoipa::path(
    get,
    path = "/api/v1/testimonials",
    tag = "Testimonials",
    params(ListTestimonialsRequest),
    responses(
        (status = 200, description = "List of testimonials", body = ListTestimonialsResponse),
    ),
)]
pub async fn list_testimonials(
    State(repo): State<TestimonialRepo>,
    Query(params): Query<ListTestimonialsRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut testimonials = repo.list()?;
    if let Some(featured) = params.featured {
        testimonials.retain(|t| t.featured == featured);
    }
    if let Some(term) = params.search.as_deref() {
        testimonials.retain(|t| t.matches_search(term));
    }

    Ok(Json(ListTestimonialsResponse {
        total: testimonials.len(),
        testimonials,
    }))
}

/// POST /api/v1/testimonials - Create a testimonial
#[utoipa::path(
    post,
    path = "/api/v1/testimonials",
    tag = "Testimonials",
    request_body = CreateTestimonialRequest,
    responses(
        (status = 201, description = "Testimonial created successfully", body = Testimonial),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn create_testimonial(
    State(repo): State<TestimonialRepo>,
    Json(req): Json<CreateTestimonialRequest>,
) -> ApiResult<impl IntoResponse> {
    let testimonial = req.into_testimonial(Utc::now());
    testimonial.validate()?;
    repo.insert(&testimonial)?;
    tracing::info!(id = %testimonial.id, "Testimonial created");
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// GET /api/v1/testimonials/{id} - Get testimonial by ID
#[utoipa::path(
    get,
    path = "/api/v1/testimonials/{id}",
    tag = "Testimonials",
    params(
        ("id" = String, Path, description = "Testimonial ID")
    ),
    responses(
        (status = 200, description = "Testimonial details", body = Testimonial),
        (status = 404, description = "Testimonial not found", body = ApiError),
    ),
)]
pub async fn get_testimonial(
    State(repo): State<TestimonialRepo>,
    Path(id): Path<String>,
) -> ApiResult<Json<Testimonial>> {
    repo.get(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::entity_not_found("Testimonial", &id))
}

/// PATCH /api/v1/testimonials/{id} - Update a testimonial
#[utoipa::path(
    patch,
    path = "/api/v1/testimonials/{id}",
    tag = "Testimonials",
    params(
        ("id" = String, Path, description = "Testimonial ID")
    ),
    request_body = TestimonialUpdate,
    responses(
        (status = 200, description = "Testimonial updated successfully", body = Testimonial),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Testimonial not found", body = ApiError),
    ),
)]
pub async fn update_testimonial(
    State(repo): State<TestimonialRepo>,
    Path(id): Path<String>,
    Json(req): Json<TestimonialUpdate>,
) -> ApiResult<Json<Testimonial>> {
    if req.is_empty() {
        return Err(ApiError::invalid_input(
            "At least one field must be provided for update",
        ));
    }

    let mut testimonial = repo
        .get(&id)?
        .ok_or_else(|| ApiError::entity_not_found("Testimonial", &id))?;
    req.apply(&mut testimonial);
    testimonial.validate()?;
    repo.update(&testimonial)?;
    tracing::info!(id = %testimonial.id, "Testimonial updated");
    Ok(Json(testimonial))
}

/// DELETE /api/v1/testimonials/{id} - Delete a testimonial
#[utoipa::path(
    delete,
    path = "/api/v1/testimonials/{id}",
    tag = "Testimonials",
    params(
        ("id" = String, Path, description = "Testimonial ID")
    ),
    responses(
        (status = 204, description = "Testimonial deleted successfully"),
        (status = 404, description = "Testimonial not found", body = ApiError),
    ),
)]
pub async fn delete_testimonial(
    State(repo): State<TestimonialRepo>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    repo.delete(&id)?;
    tracing::info!(id = %id, "Testimonial deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Create the testimonial routes router.
pub fn create_router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::post(create_testimonial))
        .route("/", axum::routing::get(list_testimonials))
        .route("/:id", axum::routing::get(get_testimonial))
        .route("/:id", axum::routing::patch(update_testimonial))
        .route("/:id", axum::routing::delete(delete_testimonial))
}
