//! Mapping from typed wizard issues to localized display strings, and from
//! API errors to the engine's transport-free failure type.

use api::ApiError;

use super::engine::{FormIssue, OtpIssue, RemoteFailure};
use super::validate::ValidationError;
use crate::t;

/// Collapse an `ApiError` into what the engine cares about. Rate-limited
/// responses lose their raw phrasing here; the UI always shows the one
/// canonical localized message for them.
pub fn remote_failure(err: ApiError) -> RemoteFailure {
    if err.is_rate_limited() {
        return RemoteFailure::RateLimited;
    }
    match err {
        ApiError::Server { message, .. } => RemoteFailure::Message(message),
        ApiError::Http(_) | ApiError::Rejected | ApiError::Status(_) | ApiError::Json(_) => {
            RemoteFailure::Transport
        }
    }
}

pub fn form_issue_text(issue: &FormIssue) -> String {
    match issue {
        FormIssue::Validation(err) => validation_text(*err),
        FormIssue::PhoneUnverified => t!("error-phone-unverified"),
    }
}

pub fn validation_text(err: ValidationError) -> String {
    match err {
        ValidationError::RequiredFields => t!("error-required-fields"),
        ValidationError::InvalidName => t!("error-invalid-name"),
        ValidationError::InvalidBirthDate => t!("error-invalid-birth-date"),
        ValidationError::InvalidEmail => t!("error-invalid-email"),
        ValidationError::InvalidPhone => t!("error-invalid-phone"),
        ValidationError::InvalidTelegram => t!("error-invalid-telegram"),
        ValidationError::InvalidPassportSeries => t!("error-invalid-passport-series"),
        ValidationError::InvalidPassportNumber => t!("error-invalid-passport-number"),
        ValidationError::InvalidPinfl => t!("error-invalid-pinfl"),
        ValidationError::MissingPassportImage => t!("error-missing-passport-image"),
    }
}

pub fn otp_issue_text(issue: &OtpIssue) -> String {
    match issue {
        OtpIssue::WaitBeforeResend => t!("error-wait-before-resend"),
        OtpIssue::InvalidPhone => t!("error-invalid-phone"),
        OtpIssue::CodeLength => t!("error-otp-length"),
        OtpIssue::RateLimited => t!("error-too-many-attempts"),
        OtpIssue::SendFailed => t!("error-otp-send-failed"),
        OtpIssue::VerifyFailed => t!("error-otp-verify-failed"),
        // Non-throttling backend messages are shown verbatim.
        OtpIssue::Server(message) => message.clone(),
    }
}

pub fn submit_failure_text(failure: &RemoteFailure) -> String {
    match failure {
        RemoteFailure::RateLimited => t!("error-too-many-attempts"),
        RemoteFailure::Message(message) => message.clone(),
        RemoteFailure::Transport => t!("error-registration-failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_api_errors_collapse_to_the_canonical_failure() {
        let err = ApiError::Server {
            message: "too many attempts".into(),
            rate_limited: true,
        };
        assert_eq!(remote_failure(err), RemoteFailure::RateLimited);
    }

    #[test]
    fn ordinary_server_messages_survive_verbatim() {
        let err = ApiError::Server {
            message: "phone not registered".into(),
            rate_limited: false,
        };
        assert_eq!(
            remote_failure(err),
            RemoteFailure::Message("phone not registered".into())
        );
    }

    #[test]
    fn throttled_issue_renders_the_canonical_localized_string() {
        crate::i18n::init();
        let _ = crate::i18n::set_language("ru");
        assert_eq!(
            otp_issue_text(&OtpIssue::RateLimited),
            "Слишком много попыток, попробуйте позже"
        );
    }
}
