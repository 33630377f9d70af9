//! Testimonial-related API types

use lumen_core::{Testimonial, TestimonialId, Timestamp};
use serde::{Deserialize, Serialize};

fn default_rating() -> u8 {
    5
}

/// Request to create a testimonial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialRequest {
    pub client_name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub quote: String,
    /// Star rating, 1 to 5 (default 5)
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default)]
    pub featured: bool,
}

impl CreateTestimonialRequest {
    pub fn into_testimonial(self, now: Timestamp) -> Testimonial {
        Testimonial {
            id: TestimonialId::generate(),
            client_name: self.client_name.trim().to_string(),
            company: self.company.filter(|c| !c.trim().is_empty()),
            role: self.role.filter(|r| !r.trim().is_empty()),
            quote: self.quote.trim().to_string(),
            rating: self.rating,
            featured: self.featured,
            created_at: now,
        }
    }
}

/// Query for listing testimonials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTestimonialsRequest {
    pub featured: Option<bool>,
    pub search: Option<String>,
}

/// Response containing a list of testimonials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListTestimonialsResponse {
    pub testimonials: Vec<Testimonial>,
    pub total: usize,
}
