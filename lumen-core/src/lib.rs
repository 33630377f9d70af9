//! LUMEN Core - Entity Types
//!
//! Pure data structures for the LED-lighting site back-office. All other
//! crates depend on this. Besides the entities themselves this crate owns the
//! portfolio projection rules, because the projection is a pure function of
//! a canonical project and has no storage concerns.

pub mod entities;
pub mod error;
pub mod identity;
pub mod portfolio;

pub use entities::{
    GalleryImage, Inquiry, InquiryStatus, InquiryUpdate, Project, ProjectUpdate, SiteSettings,
    Testimonial, TestimonialUpdate,
};
pub use error::{ConfigError, LumenError, LumenResult, StorageError, ValidationError};
pub use identity::{
    new_entity_id, slugify, EntityIdType, EntityType, InquiryId, ProjectId, TestimonialId,
    Timestamp,
};
pub use portfolio::{
    builtin_portfolio, PortfolioProject, DEFAULT_CHALLENGE, DEFAULT_LOCATION, DEFAULT_RESULTS,
    DEFAULT_SOLUTION,
};
