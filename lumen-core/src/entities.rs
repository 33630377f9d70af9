//! Canonical entities owned by the admin back-office.

use crate::error::{LumenResult, ValidationError};
use crate::identity::{InquiryId, ProjectId, TestimonialId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// HELPERS
// ============================================================================

/// Trim a string and drop it if nothing is left.
fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

/// Case-insensitive substring match over a record's searchable text.
fn matches_any(term: &str, fields: &[Option<&str>]) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn validate_email(field: &str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::invalid(field, "must be a valid email address")),
    }
}

// ============================================================================
// GALLERY IMAGES
// ============================================================================

/// Image attached to a project gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(default)]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub is_featured: bool,
}

impl GalleryImage {
    /// Build a gallery image from a bare URL at a 1-based gallery position.
    pub fn from_url(position: usize, url: impl Into<String>) -> Self {
        Self {
            id: format!("gallery-{}", position),
            url: url.into(),
            alt: String::new(),
            is_featured: false,
        }
    }
}

/// Stored gallery entries come in two shapes: older records hold bare URL
/// strings, newer ones hold image objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredGalleryEntry {
    Url(String),
    Image(GalleryImage),
}

/// Normalize a stored gallery into image objects.
///
/// This is the only place that knows about the bare-string shape. Every
/// entry gets a non-empty id: bare strings and id-less objects receive their
/// 1-based position.
fn deserialize_gallery<'de, D>(deserializer: D) -> Result<Vec<GalleryImage>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<StoredGalleryEntry>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            StoredGalleryEntry::Url(url) => GalleryImage::from_url(index + 1, url),
            StoredGalleryEntry::Image(mut image) => {
                if image.id.trim().is_empty() {
                    image.id = format!("gallery-{}", index + 1);
                }
                image
            }
        })
        .collect())
}

// ============================================================================
// PROJECTS
// ============================================================================

/// Canonical project record, owned by the admin mutation handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub results: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_gallery")]
    pub gallery_images: Vec<GalleryImage>,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "date-time"))]
    pub updated_at: Option<Timestamp>,
}

impl Project {
    /// Whether the title, category, location or description contain `term`.
    pub fn matches_search(&self, term: &str) -> bool {
        matches_any(
            term,
            &[
                Some(self.title.as_str()),
                Some(self.category.as_str()),
                self.location.as_deref(),
                self.description.as_deref(),
            ],
        )
    }

    /// Validate the fields an admin must provide.
    pub fn validate(&self) -> LumenResult<()> {
        require("title", &self.title)?;
        require("category", &self.category)?;
        if let Some(slug) = &self.slug {
            let valid = !slug.is_empty()
                && slug
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !valid {
                return Err(ValidationError::invalid(
                    "slug",
                    "must contain only lowercase letters, digits and dashes",
                )
                .into());
            }
        }
        Ok(())
    }
}

/// Update payload for projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub title: Option<String>,
    /// Blank clears the slug.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub results: Option<String>,
    pub featured: Option<bool>,
    pub main_image: Option<String>,
    pub gallery_images: Option<Vec<GalleryImage>>,
    pub completion_date: Option<String>,
}

impl ProjectUpdate {
    /// Whether the payload changes anything at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the update in place and stamp `updated_at`.
    pub fn apply(self, project: &mut Project, now: Timestamp) {
        if let Some(title) = self.title {
            project.title = title.trim().to_string();
        }
        if let Some(slug) = self.slug {
            project.slug = non_blank(slug);
        }
        if let Some(description) = self.description {
            project.description = non_blank(description);
        }
        if let Some(category) = self.category {
            project.category = category.trim().to_string();
        }
        if let Some(location) = self.location {
            project.location = non_blank(location);
        }
        if let Some(challenge) = self.challenge {
            project.challenge = non_blank(challenge);
        }
        if let Some(solution) = self.solution {
            project.solution = non_blank(solution);
        }
        if let Some(results) = self.results {
            project.results = non_blank(results);
        }
        if let Some(featured) = self.featured {
            project.featured = featured;
        }
        if let Some(main_image) = self.main_image {
            project.main_image = non_blank(main_image);
        }
        if let Some(gallery_images) = self.gallery_images {
            project.gallery_images = gallery_images;
        }
        if let Some(completion_date) = self.completion_date {
            project.completion_date = non_blank(completion_date);
        }
        project.updated_at = Some(now);
    }
}

// ============================================================================
// TESTIMONIALS
// ============================================================================

/// Client testimonial shown on the home and services pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub client_name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub quote: String,
    pub rating: u8,
    #[serde(default)]
    pub featured: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

impl Testimonial {
    pub fn matches_search(&self, term: &str) -> bool {
        matches_any(
            term,
            &[
                Some(self.client_name.as_str()),
                self.company.as_deref(),
                Some(self.quote.as_str()),
            ],
        )
    }

    pub fn validate(&self) -> LumenResult<()> {
        require("clientName", &self.client_name)?;
        require("quote", &self.quote)?;
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::invalid("rating", "must be between 1 and 5").into());
        }
        Ok(())
    }
}

/// Update payload for testimonials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TestimonialUpdate {
    pub client_name: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub quote: Option<String>,
    pub rating: Option<u8>,
    pub featured: Option<bool>,
}

impl TestimonialUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, testimonial: &mut Testimonial) {
        if let Some(client_name) = self.client_name {
            testimonial.client_name = client_name.trim().to_string();
        }
        if let Some(company) = self.company {
            testimonial.company = non_blank(company);
        }
        if let Some(role) = self.role {
            testimonial.role = non_blank(role);
        }
        if let Some(quote) = self.quote {
            testimonial.quote = quote.trim().to_string();
        }
        if let Some(rating) = self.rating {
            testimonial.rating = rating;
        }
        if let Some(featured) = self.featured {
            testimonial.featured = featured;
        }
    }
}

// ============================================================================
// INQUIRIES
// ============================================================================

/// Processing status of a contact-form inquiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Contact-form submission from the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: InquiryStatus,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

impl Inquiry {
    pub fn matches_search(&self, term: &str) -> bool {
        matches_any(
            term,
            &[
                Some(self.name.as_str()),
                Some(self.email.as_str()),
                self.service.as_deref(),
                Some(self.message.as_str()),
            ],
        )
    }

    pub fn validate(&self) -> LumenResult<()> {
        require("name", &self.name)?;
        validate_email("email", &self.email)?;
        require("message", &self.message)?;
        Ok(())
    }
}

/// Update payload for inquiries. Admins only move the status along and fix
/// contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct InquiryUpdate {
    pub status: Option<InquiryStatus>,
    pub phone: Option<String>,
    pub service: Option<String>,
}

impl InquiryUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, inquiry: &mut Inquiry) {
        if let Some(status) = self.status {
            inquiry.status = status;
        }
        if let Some(phone) = self.phone {
            inquiry.phone = non_blank(phone);
        }
        if let Some(service) = self.service {
            inquiry.service = non_blank(service);
        }
    }
}

// ============================================================================
// SITE SETTINGS
// ============================================================================

/// Site-wide settings edited from the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub company_name: String,
    #[serde(default)]
    pub tagline: String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub service_areas: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            company_name: "Lumen Lighting Co.".to_string(),
            tagline: "Commercial and residential LED lighting, designed and installed."
                .to_string(),
            contact_email: "hello@lumen-lighting.example".to_string(),
            contact_phone: "(555) 010-2040".to_string(),
            address: "120 Filament Way, Springfield".to_string(),
            service_areas: vec![
                "Springfield".to_string(),
                "Shelbyville".to_string(),
                "Capital City".to_string(),
            ],
        }
    }
}

impl SiteSettings {
    /// Validate settings before they replace the stored record.
    pub fn validate(&self) -> LumenResult<()> {
        require("companyName", &self.company_name)?;
        validate_email("contactEmail", &self.contact_email)?;
        if self.service_areas.iter().any(|area| area.trim().is_empty()) {
            return Err(ValidationError::invalid("serviceAreas", "entries must not be blank").into());
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
