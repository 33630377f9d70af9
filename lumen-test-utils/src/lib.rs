//! LUMEN Test Utilities
//!
//! Centralized test infrastructure for the LUMEN workspace:
//! - Proptest generators for all entity types
//! - A keyed store that fails on demand
//! - Test fixtures for common scenarios
//! - Custom assertions for LUMEN-specific errors

// Re-export the in-memory store from its source crate
pub use lumen_storage::{InMemoryKeyedStore, KeyedStore, StoreKey};

pub use lumen_core::{
    EntityType, GalleryImage, Inquiry, InquiryId, InquiryStatus, LumenError, LumenResult,
    Project, ProjectId, SiteSettings, StorageError, Testimonial, TestimonialId, Timestamp,
};

use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// FAILING STORE
// ============================================================================

/// Keyed store wrapper whose reads and writes can be made to fail.
#[derive(Debug, Default)]
pub struct FailingKeyedStore {
    inner: InMemoryKeyedStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingKeyedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn failure(op: &str) -> LumenError {
        LumenError::Storage(StorageError::TransactionFailed {
            reason: format!("injected {} failure", op),
        })
    }
}

impl KeyedStore for FailingKeyedStore {
    fn get(&self, key: StoreKey) -> LumenResult<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::failure("read"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: StoreKey, value: &[u8]) -> LumenResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::failure("write"));
        }
        self.inner.set(key, value)
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating LUMEN entity types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a Timestamp within 2020-2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    pub fn arb_project_id() -> impl Strategy<Value = ProjectId> {
        "[a-z0-9]{1,12}".prop_map(ProjectId::new)
    }

    pub fn arb_slug() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,3}".prop_map(|s| s)
    }

    pub fn arb_gallery_image() -> impl Strategy<Value = GalleryImage> {
        (
            "gallery-[0-9]{1,3}",
            "/img/[a-z0-9]{1,10}\\.jpg",
            "[a-zA-Z ]{0,20}",
            any::<bool>(),
        )
            .prop_map(|(id, url, alt, is_featured)| GalleryImage {
                id,
                url,
                alt,
                is_featured,
            })
    }

    pub fn arb_category() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Commercial".to_string()),
            Just("Industrial".to_string()),
            Just("Residential".to_string()),
            Just("Outdoor".to_string()),
        ]
    }

    /// Generate a valid canonical Project.
    pub fn arb_project() -> impl Strategy<Value = Project> {
        (
            arb_project_id(),
            "[A-Z][a-zA-Z ]{0,30}",
            prop::option::of(arb_slug()),
            arb_category(),
            prop::option::of("[a-zA-Z ]{1,20}"),
            prop::option::of("[a-zA-Z .]{1,60}"),
            any::<bool>(),
            prop::option::of("/img/[a-z0-9]{1,10}\\.jpg"),
            prop::collection::vec(arb_gallery_image(), 0..5),
            arb_timestamp(),
        )
            .prop_map(
                |(
                    id,
                    title,
                    slug,
                    category,
                    location,
                    challenge,
                    featured,
                    main_image,
                    gallery_images,
                    created_at,
                )| Project {
                    id,
                    title,
                    slug,
                    description: None,
                    category,
                    location,
                    challenge,
                    solution: None,
                    results: None,
                    featured,
                    main_image,
                    gallery_images,
                    completion_date: None,
                    created_at,
                    updated_at: None,
                },
            )
    }

    /// Generate a list of projects with distinct ids.
    pub fn arb_projects(max: usize) -> impl Strategy<Value = Vec<Project>> {
        prop::collection::vec(arb_project(), 0..=max).prop_map(|projects| {
            projects
                .into_iter()
                .enumerate()
                .map(|(n, mut project)| {
                    project.id = ProjectId::new(format!("{}-{}", project.id, n));
                    project
                })
                .collect()
        })
    }

    pub fn arb_testimonial() -> impl Strategy<Value = Testimonial> {
        (
            "[a-z0-9]{1,12}",
            "[A-Z][a-z]{1,12}",
            prop::option::of("[A-Z][a-zA-Z ]{1,20}"),
            "[a-zA-Z .!]{1,80}",
            1u8..=5,
            any::<bool>(),
            arb_timestamp(),
        )
            .prop_map(
                |(id, client_name, company, quote, rating, featured, created_at)| Testimonial {
                    id: TestimonialId::new(id),
                    client_name,
                    company,
                    role: None,
                    quote,
                    rating,
                    featured,
                    created_at,
                },
            )
    }

    pub fn arb_inquiry_status() -> impl Strategy<Value = InquiryStatus> {
        prop_oneof![
            Just(InquiryStatus::New),
            Just(InquiryStatus::Contacted),
            Just(InquiryStatus::Closed),
        ]
    }

    pub fn arb_inquiry() -> impl Strategy<Value = Inquiry> {
        (
            "[a-z0-9]{1,12}",
            "[A-Z][a-z]{1,12}",
            "[a-z]{1,8}@[a-z]{1,8}\\.com",
            "[a-zA-Z .?]{1,80}",
            arb_inquiry_status(),
            arb_timestamp(),
        )
            .prop_map(|(id, name, email, message, status, created_at)| Inquiry {
                id: InquiryId::new(id),
                name,
                email,
                phone: None,
                service: None,
                message,
                status,
                created_at,
            })
    }

    /// Generate valid site settings.
    pub fn arb_site_settings() -> impl Strategy<Value = SiteSettings> {
        (
            "[A-Z][a-zA-Z ]{1,30}",
            "[a-z]{1,8}@[a-z]{1,8}\\.com",
            prop::collection::vec("[A-Z][a-z]{2,12}", 0..4),
        )
            .prop_map(|(company_name, contact_email, service_areas)| SiteSettings {
                company_name,
                contact_email,
                service_areas,
                ..SiteSettings::default()
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    /// Fixed creation time so projections are reproducible.
    pub fn fixed_time() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Minimal project with only the required fields set.
    pub fn project(id: &str, title: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            title: title.to_string(),
            slug: None,
            description: None,
            category: "Commercial".to_string(),
            location: None,
            challenge: None,
            solution: None,
            results: None,
            featured: false,
            main_image: None,
            gallery_images: Vec::new(),
            completion_date: None,
            created_at: fixed_time(),
            updated_at: None,
        }
    }

    /// The "Office Retrofit" project with a slug and one gallery image.
    pub fn office_retrofit() -> Project {
        Project {
            slug: Some("office-retrofit".to_string()),
            main_image: Some("/img/a.jpg".to_string()),
            gallery_images: vec![GalleryImage::from_url(1, "/img/b.jpg")],
            ..project("p1", "Office Retrofit")
        }
    }

    /// Stored JSON for "Office Retrofit" using the legacy bare-string gallery.
    pub fn office_retrofit_legacy_json() -> serde_json::Value {
        serde_json::json!({
            "id": "p1",
            "title": "Office Retrofit",
            "slug": "office-retrofit",
            "mainImage": "/img/a.jpg",
            "galleryImages": ["/img/b.jpg"],
            "category": "Commercial",
            "createdAt": "2024-03-01T12:00:00Z"
        })
    }

    pub fn testimonial(id: &str, client_name: &str, rating: u8) -> Testimonial {
        Testimonial {
            id: TestimonialId::new(id),
            client_name: client_name.to_string(),
            company: Some("Acme Offices".to_string()),
            role: None,
            quote: "The new lighting transformed the space.".to_string(),
            rating,
            featured: false,
            created_at: fixed_time(),
        }
    }

    pub fn inquiry(id: &str, name: &str, status: InquiryStatus) -> Inquiry {
        Inquiry {
            id: InquiryId::new(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            service: Some("Retrofit".to_string()),
            message: "Please send a quote.".to_string(),
            status,
            created_at: fixed_time(),
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for LUMEN results.

    use super::*;

    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &LumenResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    #[track_caller]
    pub fn assert_err<T: std::fmt::Debug>(result: &LumenResult<T>) {
        assert!(result.is_err(), "Expected Err, got Ok: {:?}", result);
    }

    /// Assert that a LumenResult is a NotFound storage error.
    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &LumenResult<T>, entity_type: EntityType) {
        match result {
            Err(LumenError::Storage(StorageError::NotFound { entity_type: et, .. })) => {
                assert_eq!(*et, entity_type, "Wrong entity type in NotFound error");
            }
            other => panic!("Expected NotFound error for {:?}, got: {:?}", entity_type, other),
        }
    }

    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &LumenResult<T>) {
        match result {
            Err(LumenError::Validation(_)) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
