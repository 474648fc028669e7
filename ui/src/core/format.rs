//! Formatting helpers for presentation.

/// Render remaining seconds as `m:ss` for the OTP countdown.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
