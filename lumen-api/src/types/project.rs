//! Project-related API types

use lumen_core::{slugify, GalleryImage, Project, ProjectId, Timestamp};
use serde::{Deserialize, Serialize};

/// Request to create a new canonical project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    /// URL slug; derived from the title when absent
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
    #[serde(default)]
    pub gallery_images: Vec<GalleryImage>,
    #[serde(default)]
    pub completion_date: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateProjectRequest {
    /// Build the canonical record with a fresh id.
    pub fn into_project(self, now: Timestamp) -> Project {
        let title = self.title.trim().to_string();
        let slug = trimmed(self.slug).or_else(|| Some(slugify(&title)).filter(|s| !s.is_empty()));

        Project {
            id: ProjectId::generate(),
            title,
            slug,
            description: trimmed(self.description),
            category: self.category.trim().to_string(),
            location: trimmed(self.location),
            challenge: trimmed(self.challenge),
            solution: trimmed(self.solution),
            results: trimmed(self.results),
            featured: self.featured,
            main_image: trimmed(self.main_image),
            gallery_images: self.gallery_images,
            completion_date: trimmed(self.completion_date),
            created_at: now,
            updated_at: None,
        }
    }
}

/// Query for listing projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProjectsRequest {
    /// Case-insensitive match on title, category, location or description
    pub search: Option<String>,
    /// Only featured (or only non-featured) projects
    pub featured: Option<bool>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

/// Response containing a list of projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListProjectsResponse {
    pub projects: Vec<Project>,
    /// Total count (before pagination)
    pub total: usize,
}
