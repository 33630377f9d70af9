//! Inquiry REST API Routes
//!
//! The public contact form posts here; everything else is admin-facing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use lumen_core::{Inquiry, InquiryUpdate};

use crate::{
    error::{ApiError, ApiResult},
    state::{AppState, InquiryRepo},
    types::{CreateInquiryRequest, ListInquiriesRequest, ListInquiriesResponse},
};

/// GET /api/v1/inquiries - List inquiries, newest first
#[utoipa::path(
    get,
    path = "/api/v1/inquiries",
    tag = "Inquiries",
    params(ListInquiriesRequest),
    responses(
        (status = 200, description = "List of inquiries", body = ListInquiriesResponse),
    ),
)]
pub async fn list_inquiries(
    State(repo): State<InquiryRepo>,
    Query(params): Query<ListInquiriesRequest>,
) -> ApiResult<impl IntoResponse> {
    let mut inquiries = repo.list()?;
    if let Some(status) = params.status {
        inquiries.retain(|i| i.status == status);
    }
    if let Some(term) = params.search.as_deref() {
        inquiries.retain(|i| i.matches_search(term));
    }
    inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(ListInquiriesResponse {
        total: inquiries.len(),
        inquiries,
    }))
}

/// POST /api/v1/inquiries - Submit the contact form
#[utoipa::path(
    post,
    path = "/api/v1/inquiries",
    tag = "Inquiries",
    request_body = CreateInquiryRequest,
    responses(
        (status = 201, description = "Inquiry received", body = Inquiry),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn create_inquiry(
    State(repo): State<InquiryRepo>,
    Json(req): Json<CreateInquiryRequest>,
) -> ApiResult<impl IntoResponse> {
    let inquiry = req.into_inquiry(Utc::now());
    inquiry.validate()?;
    repo.insert(&inquiry)?;
    tracing::info!(id = %inquiry.id, service = ?inquiry.service, "Inquiry received");
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// GET /api/v1/inquiries/{id} - Get inquiry by ID
#[utoipa::path(
    get,
    path = "/api/v1/inquiries/{id}",
    tag = "Inquiries",
    params(
        ("id" = String, Path, description = "Inquiry ID")
    ),
    responses(
        (status = 200, description = "Inquiry details", body = Inquiry),
        (status = 404, description = "Inquiry not found", body = ApiError),
    ),
)]
pub async fn get_inquiry(
    State(repo): State<InquiryRepo>,
    Path(id): Path<String>,
) -> ApiResult<Json<Inquiry>> {
    repo.get(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::entity_not_found("Inquiry", &id))
}

/// PATCH /api/v1/inquiries/{id} - Update status or contact details
#[utoipa::path(
    patch,
    path = "/api/v1/inquiries/{id}",
    tag = "Inquiries",
    params(
        ("id" = String, Path, description = "Inquiry ID")
    ),
    request_body = InquiryUpdate,
    responses(
        (status = 200, description = "Inquiry updated successfully", body = Inquiry),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Inquiry not found", body = ApiError),
    ),
)]
pub async fn update_inquiry(
    State(repo): State<InquiryRepo>,
    Path(id): Path<String>,
    Json(req): Json<InquiryUpdate>,
) -> ApiResult<Json<Inquiry>> {
    if req.is_empty() {
        return Err(ApiError::invalid_input(
            "At least one field must be provided for update",
        ));
    }

    let mut inquiry = repo
        .get(&id)?
        .ok_or_else(|| ApiError::entity_not_found("Inquiry", &id))?;
    let previous = inquiry.status;
    req.apply(&mut inquiry);
    repo.update(&inquiry)?;
    tracing::info!(id = %inquiry.id, from = %previous, to = %inquiry.status, "Inquiry updated");
    Ok(Json(inquiry))
}

/// DELETE /api/v1/inquiries/{id} - Delete an inquiry
#[utoipa::path(
    delete,
    path = "/api/v1/inquiries/{id}",
    tag = "Inquiries",
    params(
        ("id" = String, Path, description = "Inquiry ID")
    ),
    responses(
        (status = 204, description = "Inquiry deleted successfully"),
        (status = 404, description = "Inquiry not found", body = ApiError),
    ),
)]
pub async fn delete_inquiry(
    State(repo): State<InquiryRepo>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    repo.delete(&id)?;
    tracing::info!(id = %id, "Inquiry deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Create the inquiry routes router.
pub fn create_router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::post(create_inquiry))
        .route("/", axum::routing::get(list_inquiries))
        .route("/:id", axum::routing::get(get_inquiry))
        .route("/:id", axum::routing::patch(update_inquiry))
        .route("/:id", axum::routing::delete(delete_inquiry))
}
