//! Course catalog: category filter tabs and course cards.

pub mod course_card;
pub mod filter_tabs;

pub use course_card::CourseCard;
pub use filter_tabs::FilterTabs;

use crate::t;

/// Localized label for a backend level value. Unknown levels fall through
/// verbatim so a new backend value degrades gracefully.
pub fn level_label(level: &str) -> String {
    match level {
        "beginner" => t!("course-level-beginner"),
        "intermediate" => t!("course-level-intermediate"),
        "advanced" => t!("course-level-advanced"),
        other => other.to_string(),
    }
}
