//! Client-side error type for backend calls.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, TLS, timeout, malformed body).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered but reported failure. `rate_limited` is set when
    /// the message looks like a throttling response, so the UI can swap in
    /// its canonical "too many attempts" string instead of echoing whatever
    /// phrasing the backend used this time.
    #[error("{message}")]
    Server { message: String, rate_limited: bool },

    /// The backend refused the request without a usable error message.
    #[error("request rejected by the backend")]
    Rejected,

    /// Non-2xx status with no usable error payload.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub(crate) fn server(message: String) -> Self {
        let rate_limited = looks_rate_limited(&message);
        ApiError::Server {
            message,
            rate_limited,
        }
    }

    /// True when the backend throttled us, regardless of its exact phrasing.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            ApiError::Server {
                rate_limited: true,
                ..
            }
        )
    }
}

/// Case-insensitive substring sniff over the backend's free-form error text.
/// The backend is not consistent about throttling messages, so we match the
/// handful of phrasings observed in production.
fn looks_rate_limited(message: &str) -> bool {
    let lowered = message.to_lowercase();
    ["too many", "attempts", "try again", "limit"]
        .iter()
        .any(|needle| lowered.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttling_phrasings_are_classified() {
        for msg in [
            "Too many attempts",
            "OTP request limit reached",
            "please try again in 5 minutes",
            "ATTEMPTS EXCEEDED",
        ] {
            assert!(
                ApiError::server(msg.to_string()).is_rate_limited(),
                "expected {msg:?} to classify as rate limited"
            );
        }
    }

    #[test]
    fn ordinary_errors_pass_through() {
        let err = ApiError::server("phone number is not registered".to_string());
        assert!(!err.is_rate_limited());
        assert_eq!(err.to_string(), "phone number is not registered");
    }
}
