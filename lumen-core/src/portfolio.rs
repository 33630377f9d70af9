//! Portfolio projection
//!
//! The public portfolio pages never read canonical projects. They read a
//! denormalized copy produced by [`PortfolioProject::from_project`], which is
//! regenerated in full on every sync.

use crate::entities::Project;
use crate::identity::Timestamp;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCATION: &str = "Location not specified";
pub const DEFAULT_CHALLENGE: &str = "Challenge details not available";
pub const DEFAULT_SOLUTION: &str = "Solution details not available";
pub const DEFAULT_RESULTS: &str = "Results details not available";

/// Read-only project shape consumed by the public portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProject {
    /// Slug of the canonical project, or its id when no slug is set.
    pub id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub description: String,
    pub challenge: String,
    pub solution: String,
    pub results: String,
    pub image_src: String,
    pub gallery_images: Vec<String>,
    pub featured: bool,
    pub completion_date: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
}

fn or_default(value: &Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => default.to_string(),
    }
}

impl PortfolioProject {
    /// Project a canonical record into its public shape.
    pub fn from_project(project: &Project) -> Self {
        let id = match &project.slug {
            Some(slug) if !slug.trim().is_empty() => slug.clone(),
            _ => project.id.to_string(),
        };

        Self {
            id,
            title: project.title.clone(),
            category: project.category.clone(),
            location: or_default(&project.location, DEFAULT_LOCATION),
            description: project.description.clone().unwrap_or_default(),
            challenge: or_default(&project.challenge, DEFAULT_CHALLENGE),
            solution: or_default(&project.solution, DEFAULT_SOLUTION),
            results: or_default(&project.results, DEFAULT_RESULTS),
            image_src: project.main_image.clone().unwrap_or_default(),
            gallery_images: project
                .gallery_images
                .iter()
                .map(|image| image.url.clone())
                .collect(),
            featured: project.featured,
            completion_date: project.completion_date.clone(),
            created_at: project.created_at,
        }
    }
}

fn builtin_created_at() -> Timestamp {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Fixed showcase served when neither canonical data nor a cache exists.
pub fn builtin_portfolio() -> Vec<PortfolioProject> {
    let created_at = builtin_created_at();
    vec![
        PortfolioProject {
            id: "downtown-office-retrofit".to_string(),
            title: "Downtown Office Retrofit".to_string(),
            category: "Commercial".to_string(),
            location: "Springfield".to_string(),
            description: "Full LED conversion of a six-floor office building.".to_string(),
            challenge: "Aging fluorescent fixtures with high maintenance costs.".to_string(),
            solution: "Networked LED panels with daylight harvesting.".to_string(),
            results: "62% reduction in lighting energy use.".to_string(),
            image_src: "/images/portfolio/office-retrofit.jpg".to_string(),
            gallery_images: vec![
                "/images/portfolio/office-retrofit-lobby.jpg".to_string(),
                "/images/portfolio/office-retrofit-floor.jpg".to_string(),
            ],
            featured: true,
            completion_date: Some("2023-06".to_string()),
            created_at,
        },
        PortfolioProject {
            id: "warehouse-high-bay".to_string(),
            title: "Warehouse High-Bay Upgrade".to_string(),
            category: "Industrial".to_string(),
            location: "Shelbyville".to_string(),
            description: "High-bay LED fixtures with occupancy sensing.".to_string(),
            challenge: "Poor visibility in picking aisles.".to_string(),
            solution: "Aisle-optimized optics and motion sensors.".to_string(),
            results: "Light levels doubled while energy use halved.".to_string(),
            image_src: "/images/portfolio/warehouse.jpg".to_string(),
            gallery_images: vec!["/images/portfolio/warehouse-aisle.jpg".to_string()],
            featured: false,
            completion_date: Some("2023-09".to_string()),
            created_at,
        },
        PortfolioProject {
            id: "lakeside-residence".to_string(),
            title: "Lakeside Residence".to_string(),
            category: "Residential".to_string(),
            location: "Capital City".to_string(),
            description: "Layered interior and landscape lighting.".to_string(),
            challenge: "Glare on the lake-facing windows at night.".to_string(),
            solution: "Warm dimmable downlights and shielded path lights.".to_string(),
            results: "Comfortable evening lighting with app control.".to_string(),
            image_src: "/images/portfolio/lakeside.jpg".to_string(),
            gallery_images: Vec::new(),
            featured: true,
            completion_date: None,
            created_at,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::GalleryImage;
    use crate::identity::ProjectId;

    fn office_retrofit() -> Project {
        Project {
            id: ProjectId::new("p1"),
            title: "Office Retrofit".to_string(),
            slug: Some("office-retrofit".to_string()),
            description: None,
            category: "Commercial".to_string(),
            location: None,
            challenge: None,
            solution: None,
            results: None,
            featured: false,
            main_image: Some("/img/a.jpg".to_string()),
            gallery_images: vec![GalleryImage::from_url(1, "/img/b.jpg")],
            completion_date: None,
            created_at: builtin_created_at(),
            updated_at: None,
        }
    }

    #[test]
    fn test_office_retrofit_projection() {
        let projected = PortfolioProject::from_project(&office_retrofit());
        assert_eq!(projected.id, "office-retrofit");
        assert_eq!(projected.image_src, "/img/a.jpg");
        assert_eq!(projected.gallery_images, vec!["/img/b.jpg".to_string()]);
        assert_eq!(projected.location, DEFAULT_LOCATION);
        assert_eq!(projected.challenge, DEFAULT_CHALLENGE);
        assert_eq!(projected.solution, DEFAULT_SOLUTION);
        assert_eq!(projected.results, DEFAULT_RESULTS);
        assert_eq!(projected.description, "");
        assert_eq!(projected.category, "Commercial");
    }

    #[test]
    fn test_blank_slug_falls_back_to_id() {
        let mut project = office_retrofit();
        project.slug = Some("   ".to_string());
        assert_eq!(PortfolioProject::from_project(&project).id, "p1");

        project.slug = None;
        project.main_image = None;
        let projected = PortfolioProject::from_project(&project);
        assert_eq!(projected.id, "p1");
        assert_eq!(projected.image_src, "");
    }

    #[test]
    fn test_gallery_order_preserved() {
        let mut project = office_retrofit();
        project.gallery_images = (1..=4)
            .map(|n| GalleryImage::from_url(n, format!("/img/{}.jpg", n)))
            .collect();
        let projected = PortfolioProject::from_project(&project);
        assert_eq!(
            projected.gallery_images,
            vec!["/img/1.jpg", "/img/2.jpg", "/img/3.jpg", "/img/4.jpg"]
        );
    }

    #[test]
    fn test_present_fields_copied() {
        let mut project = office_retrofit();
        project.location = Some("Springfield".to_string());
        project.results = Some("Halved energy use".to_string());
        project.featured = true;
        project.completion_date = Some("2024-02".to_string());
        let projected = PortfolioProject::from_project(&project);
        assert_eq!(projected.location, "Springfield");
        assert_eq!(projected.results, "Halved energy use");
        assert!(projected.featured);
        assert_eq!(projected.completion_date.as_deref(), Some("2024-02"));
        assert_eq!(projected.created_at, project.created_at);
    }

    #[test]
    fn test_projection_json_is_camel_case() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(PortfolioProject::from_project(&office_retrofit()))?;
        assert_eq!(json["imageSrc"], "/img/a.jpg");
        assert_eq!(json["galleryImages"][0], "/img/b.jpg");
        assert!(json.get("createdAt").is_some());
        Ok(())
    }

    #[test]
    fn test_builtin_portfolio() {
        let builtin = builtin_portfolio();
        assert_eq!(builtin.len(), 3);
        let ids: std::collections::HashSet<_> = builtin.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }
}
