//! API Request and Response Types
//!
//! Entities themselves come from `lumen_core`; this module only adds the
//! request bodies, list queries and list envelopes. Update payloads reuse the
//! core `*Update` types directly.

// Project types
mod project;
pub use project::*;

// Portfolio types
mod portfolio;
pub use portfolio::*;

// Testimonial types
mod testimonial;
pub use testimonial::*;

// Inquiry types
mod inquiry;
pub use inquiry::*;

/// Largest page a list endpoint will return.
pub const MAX_LIST_LIMIT: usize = 500;
