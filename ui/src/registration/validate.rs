//! Per-step field validation for the registration wizard.
//!
//! Pure functions over the draft: no network, no state. The wizard refuses
//! to advance past a step until its validator passes, and re-checks the
//! whole draft before submission.

use time::macros::format_description;
use time::Date;

use super::draft::{RegistrationDraft, NAME_MAX_CHARS, PHONE_MAX_CHARS};
use super::engine::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    RequiredFields,
    InvalidName,
    InvalidBirthDate,
    InvalidEmail,
    InvalidPhone,
    InvalidTelegram,
    InvalidPassportSeries,
    InvalidPassportNumber,
    InvalidPinfl,
    MissingPassportImage,
}

pub fn validate_step(step: Step, draft: &RegistrationDraft) -> Result<(), ValidationError> {
    match step {
        Step::Personal => validate_personal(draft),
        Step::Contact => validate_contact(draft),
        Step::Documents => validate_documents(draft),
        // Step 4 has no draft fields of its own; the OTP flow gates it.
        Step::Verification => Ok(()),
    }
}

/// Everything the submission endpoint needs, steps 1–3 in order.
pub fn validate_draft(draft: &RegistrationDraft) -> Result<(), ValidationError> {
    validate_personal(draft)?;
    validate_contact(draft)?;
    validate_documents(draft)
}

fn validate_personal(draft: &RegistrationDraft) -> Result<(), ValidationError> {
    if draft.first_name.is_empty()
        || draft.last_name.is_empty()
        || draft.middle_name.is_empty()
        || draft.birth_date.is_empty()
    {
        return Err(ValidationError::RequiredFields);
    }
    for name in [&draft.first_name, &draft.last_name, &draft.middle_name] {
        if !name_is_valid(name) {
            return Err(ValidationError::InvalidName);
        }
    }
    if !birth_date_is_valid(&draft.birth_date) {
        return Err(ValidationError::InvalidBirthDate);
    }
    Ok(())
}

fn validate_contact(draft: &RegistrationDraft) -> Result<(), ValidationError> {
    if draft.phone.is_empty() || draft.email.is_empty() {
        return Err(ValidationError::RequiredFields);
    }
    if !email_is_valid(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !phone_is_valid(&draft.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    if !draft.telegram_username.is_empty() && !telegram_is_valid(&draft.telegram_username) {
        return Err(ValidationError::InvalidTelegram);
    }
    Ok(())
}

fn validate_documents(draft: &RegistrationDraft) -> Result<(), ValidationError> {
    if draft.passport_series.is_empty()
        || draft.passport_number.is_empty()
        || draft.pinfl.is_empty()
    {
        return Err(ValidationError::RequiredFields);
    }
    if draft.passport_image.is_none() {
        return Err(ValidationError::MissingPassportImage);
    }
    if !(draft.passport_series.len() == 2
        && draft.passport_series.chars().all(|c| c.is_ascii_uppercase()))
    {
        return Err(ValidationError::InvalidPassportSeries);
    }
    if !(draft.passport_number.len() == 7
        && draft.passport_number.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(ValidationError::InvalidPassportNumber);
    }
    if !(draft.pinfl.len() == 14 && draft.pinfl.chars().all(|c| c.is_ascii_digit())) {
        return Err(ValidationError::InvalidPinfl);
    }
    Ok(())
}

pub fn name_is_valid(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= NAME_MAX_CHARS
        && name.chars().all(super::draft::is_name_char)
}

/// `+998` followed by exactly nine digits.
pub fn phone_is_valid(phone: &str) -> bool {
    phone.len() == PHONE_MAX_CHARS
        && phone.starts_with("+998")
        && phone[1..].chars().all(|c| c.is_ascii_digit())
}

/// `local@domain.tld` shape check, mirroring the classic
/// `^[^\s@]+@[^\s@]+\.[^\s@]+$` form regex.
pub fn email_is_valid(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && !tld.is_empty()
        && !domain.chars().any(char::is_whitespace)
}

pub fn telegram_is_valid(handle: &str) -> bool {
    let body = handle.strip_prefix('@').unwrap_or(handle);
    !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn birth_date_is_valid(raw: &str) -> bool {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::FilePayload;

    fn complete_draft() -> RegistrationDraft {
        let mut draft = RegistrationDraft::for_course(3);
        draft.set_first_name("Aziz");
        draft.set_last_name("Karimov");
        draft.set_middle_name("Anvarovich");
        draft.set_birth_date("2001-03-14");
        draft.set_phone("+998901234567");
        draft.set_email("aziz@example.com");
        draft.set_passport_series("AB");
        draft.set_passport_number("1234567");
        draft.set_pinfl("12345678901234");
        draft.attach_passport_image(FilePayload {
            file_name: "passport.jpg".into(),
            mime_type: "image/jpeg".into(),
            bytes: vec![1, 2, 3],
        });
        draft
    }

    #[test]
    fn complete_draft_passes_every_step() {
        let draft = complete_draft();
        for step in [Step::Personal, Step::Contact, Step::Documents, Step::Verification] {
            assert_eq!(validate_step(step, &draft), Ok(()));
        }
        assert_eq!(validate_draft(&draft), Ok(()));
    }

    #[test]
    fn names_accept_cyrillic_diacritics_and_punctuation() {
        for name in ["Анна-Мария", "O'tkir", "Ғафур", "Жан.", "Ўктам"] {
            assert!(name_is_valid(name), "{name} should be valid");
        }
    }

    #[test]
    fn names_reject_digits_and_symbols() {
        for name in ["Aziz1", "A_z", "", "No#me", "смай☺лик"] {
            assert!(!name_is_valid(name), "{name:?} should be invalid");
        }
        let too_long = "a".repeat(NAME_MAX_CHARS + 1);
        assert!(!name_is_valid(&too_long));
    }

    #[test]
    fn step_one_flags_missing_and_malformed_fields() {
        let mut draft = complete_draft();
        draft.middle_name.clear();
        assert_eq!(
            validate_step(Step::Personal, &draft),
            Err(ValidationError::RequiredFields)
        );

        let mut draft = complete_draft();
        draft.birth_date = "14.03.2001".into();
        assert_eq!(
            validate_step(Step::Personal, &draft),
            Err(ValidationError::InvalidBirthDate)
        );

        let mut draft = complete_draft();
        draft.birth_date = "2001-02-30".into();
        assert_eq!(
            validate_step(Step::Personal, &draft),
            Err(ValidationError::InvalidBirthDate)
        );
    }

    #[test]
    fn phone_must_be_uzbek_mobile_format() {
        assert!(phone_is_valid("+998901234567"));
        for phone in ["+99890123456", "+9989012345678", "998901234567", "+79161234567"] {
            assert!(!phone_is_valid(phone), "{phone} should be invalid");
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(email_is_valid("user@example.com"));
        assert!(email_is_valid("a.b+c@sub.domain.uz"));
        for email in ["user", "user@", "@example.com", "user@nodot", "a b@example.com"] {
            assert!(!email_is_valid(email), "{email} should be invalid");
        }
    }

    #[test]
    fn documents_step_checks_exact_shapes() {
        let mut draft = complete_draft();
        draft.passport_series = "A".into();
        assert_eq!(
            validate_step(Step::Documents, &draft),
            Err(ValidationError::InvalidPassportSeries)
        );

        let mut draft = complete_draft();
        draft.passport_number = "123456".into();
        assert_eq!(
            validate_step(Step::Documents, &draft),
            Err(ValidationError::InvalidPassportNumber)
        );

        let mut draft = complete_draft();
        draft.pinfl = "1234".into();
        assert_eq!(
            validate_step(Step::Documents, &draft),
            Err(ValidationError::InvalidPinfl)
        );

        let mut draft = complete_draft();
        draft.passport_image = None;
        assert_eq!(
            validate_step(Step::Documents, &draft),
            Err(ValidationError::MissingPassportImage)
        );
    }

    #[test]
    fn coerced_series_stays_invalid_until_two_letters() {
        // "ab12" is stored as "AB" by the setter and then validates; a lone
        // digit-only entry coerces to empty and fails as required-missing.
        let mut draft = complete_draft();
        draft.set_passport_series("ab12");
        assert_eq!(draft.passport_series, "AB");
        assert_eq!(validate_step(Step::Documents, &draft), Ok(()));

        draft.set_passport_series("1");
        assert_eq!(
            validate_step(Step::Documents, &draft),
            Err(ValidationError::RequiredFields)
        );
    }
}
