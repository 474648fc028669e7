//! Typed client for the Skillwave Academy REST backend.
//!
//! Covers the public endpoints the site consumes: course/category listing,
//! course detail, contact and subscription forms, OTP issuance/verification
//! and the multipart registration submission. Every language-sensitive call
//! sends an `Accept-Language` header with the active UI language code.

mod client;
mod envelope;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    Category, ContactMessage, Course, CourseDetail, FilePayload, RegistrationForm,
};

/// Production backend. Platform crates may override this when constructing
/// the client (tests point it at a local mock server).
pub const DEFAULT_BASE_URL: &str = "https://api.skillwave.uz";
