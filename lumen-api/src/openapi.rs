//! OpenAPI Specification for LUMEN API
//!
//! Generated by utoipa from the route annotations and the schema derives on
//! the core entities.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::types::*;

// Import route modules for path references
use crate::routes::{health, inquiry, portfolio, project, settings, testimonial};

use lumen_core::{
    GalleryImage, Inquiry, InquiryId, InquiryStatus, InquiryUpdate, PortfolioProject, Project,
    ProjectId, ProjectUpdate, SiteSettings, Testimonial, TestimonialId, TestimonialUpdate,
};

/// OpenAPI document for LUMEN API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LUMEN API",
        version = "0.4.0",
        description = "Back-office and public data API for the Lumen Lighting website",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Lumen Lighting", url = "https://lumen-lighting.example")
    ),
    servers(
        (url = "https://api.lumen-lighting.example", description = "Production"),
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Projects", description = "Canonical project records owned by the admin panel"),
        (name = "Portfolio", description = "Projected, read-only portfolio served to the public pages"),
        (name = "Testimonials", description = "Client testimonials"),
        (name = "Inquiries", description = "Contact-form submissions"),
        (name = "Settings", description = "Site-wide settings"),
        (name = "Health", description = "Liveness and readiness probes"),
    ),
    paths(
        project::list_projects,
        project::create_project,
        project::get_project,
        project::update_project,
        project::delete_project,
        portfolio::list_portfolio,
        portfolio::get_portfolio_project,
        portfolio::sync_portfolio,
        testimonial::list_testimonials,
        testimonial::create_testimonial,
        testimonial::get_testimonial,
        testimonial::update_testimonial,
        testimonial::delete_testimonial,
        inquiry::list_inquiries,
        inquiry::create_inquiry,
        inquiry::get_inquiry,
        inquiry::update_inquiry,
        inquiry::delete_inquiry,
        settings::get_settings,
        settings::put_settings,
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        Project,
        ProjectId,
        ProjectUpdate,
        GalleryImage,
        CreateProjectRequest,
        ListProjectsResponse,
        PortfolioProject,
        PortfolioResponse,
        SyncResponse,
        SyncStatus,
        Testimonial,
        TestimonialId,
        TestimonialUpdate,
        CreateTestimonialRequest,
        ListTestimonialsResponse,
        Inquiry,
        InquiryId,
        InquiryStatus,
        InquiryUpdate,
        CreateInquiryRequest,
        ListInquiriesResponse,
        SiteSettings,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        ComponentHealth,
    ))
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate OpenAPI spec as JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        let openapi = Self::openapi();
        serde_json::to_string_pretty(&openapi)
    }
}
