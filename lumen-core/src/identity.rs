//! Identity types for LUMEN entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new entity identifier.
///
/// Identifiers are UUIDv7 strings, so they sort by creation time while still
/// allowing hand-written ids ("p1", legacy slugs) in stored collections.
pub fn new_entity_id() -> String {
    Uuid::now_v7().to_string()
}

/// Entity type discriminator used in error reporting and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EntityType {
    Project,
    PortfolioProject,
    Testimonial,
    Inquiry,
    Settings,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Project => "Project",
            EntityType::PortfolioProject => "PortfolioProject",
            EntityType::Testimonial => "Testimonial",
            EntityType::Inquiry => "Inquiry",
            EntityType::Settings => "Settings",
        };
        f.write_str(name)
    }
}

/// Common behavior of the string-backed entity identifiers.
pub trait EntityIdType: Clone + fmt::Display {
    /// The entity type this identifier belongs to.
    const ENTITY_TYPE: EntityType;

    /// Borrow the identifier as a plain string.
    fn as_str(&self) -> &str;
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $entity:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh identifier.
            pub fn generate() -> Self {
                Self(new_entity_id())
            }

            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Consume the identifier, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl EntityIdType for $name {
            const ENTITY_TYPE: EntityType = $entity;

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a canonical (admin-owned) project.
    ProjectId,
    EntityType::Project
);
define_entity_id!(
    /// Identifier of a client testimonial.
    TestimonialId,
    EntityType::Testimonial
);
define_entity_id!(
    /// Identifier of a contact-form inquiry.
    InquiryId,
    EntityType::Inquiry
);

/// Build a URL slug from a title.
///
/// Lowercases ASCII alphanumerics, collapses every other run of characters
/// into a single `-`, and trims leading/trailing dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ProjectId::generate();
        let b = ProjectId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_serializes_transparently() -> Result<(), serde_json::Error> {
        let id = ProjectId::new("p1");
        assert_eq!(serde_json::to_string(&id)?, "\"p1\"");
        let back: ProjectId = serde_json::from_str("\"p1\"")?;
        assert_eq!(back, id);
        Ok(())
    }

    #[test]
    fn test_id_entity_type() {
        assert_eq!(ProjectId::ENTITY_TYPE, EntityType::Project);
        assert_eq!(InquiryId::ENTITY_TYPE, EntityType::Inquiry);
        assert_eq!(TestimonialId::new("t").as_str(), "t");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Office Retrofit"), "office-retrofit");
        assert_eq!(slugify("  LED -- Warehouse  (Phase 2) "), "led-warehouse-phase-2");
        assert_eq!(slugify("***"), "");
        assert_eq!(slugify("Café Lights"), "caf-lights");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn slug_is_url_safe(title in ".{0,64}") {
                let slug = slugify(&title);
                prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
                prop_assert!(!slug.starts_with('-'));
                prop_assert!(!slug.ends_with('-'));
                prop_assert!(!slug.contains("--"));
            }

            #[test]
            fn slugify_is_idempotent(title in "[A-Za-z0-9 ._-]{0,48}") {
                let once = slugify(&title);
                prop_assert_eq!(slugify(&once), once);
            }
        }
    }
}
