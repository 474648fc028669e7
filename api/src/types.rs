//! Wire types for the academy backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub slug: String,
}

/// Paginated wrapper the categories endpoint uses.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoryPage {
    pub results: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_type: Option<String>,
    pub level: String,
    pub duration: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_new: bool,
    pub category: u32,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseDetail {
    pub id: u32,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_type: Option<String>,
    pub level: String,
    pub duration: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub what_will_learn: String,
    #[serde(default)]
    pub video_hours: u32,
    #[serde(default)]
    pub coding_exercises: u32,
    #[serde(default)]
    pub articles: u32,
    #[serde(default)]
    pub has_certificate: bool,
    #[serde(default)]
    pub outcomes: Vec<CourseOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseOutcome {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// A file selected in the browser (or read from disk in native builds),
/// carried as raw bytes so the client stays platform-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Complete registration submission. `phone` must already be in digits-only
/// form with no leading `+`; the wizard strips it before building this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub course: u32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub birth_date: String,
    pub phone: String,
    pub email: String,
    pub telegram_username: Option<String>,
    pub passport_series: String,
    pub passport_number: String,
    pub pinfl: String,
    pub passport_image: FilePayload,
}
