//! The in-progress registration record and its input coercion rules.
//!
//! Every setter filters raw input the same way the form fields constrain
//! typing: disallowed characters are dropped rather than rejected, so the
//! stored draft is always in canonical shape and the validators only have
//! to check completeness and length.

use api::{FilePayload, RegistrationForm};

pub const NAME_MAX_CHARS: usize = 50;
pub const PHONE_MAX_CHARS: usize = 13; // "+998" + 9 digits
pub const TELEGRAM_MAX_CHARS: usize = 32;
pub const OTP_CODE_LEN: usize = 6;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RegistrationDraft {
    pub course: Option<u32>,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub birth_date: String,
    pub phone: String,
    pub email: String,
    pub telegram_username: String,
    pub passport_series: String,
    pub passport_number: String,
    pub pinfl: String,
    pub passport_image: Option<FilePayload>,
}

impl RegistrationDraft {
    pub fn for_course(course_id: u32) -> Self {
        Self {
            course: Some(course_id),
            ..Self::default()
        }
    }

    pub fn set_first_name(&mut self, raw: &str) {
        self.first_name = sanitize_name(raw);
    }

    pub fn set_last_name(&mut self, raw: &str) {
        self.last_name = sanitize_name(raw);
    }

    pub fn set_middle_name(&mut self, raw: &str) {
        self.middle_name = sanitize_name(raw);
    }

    pub fn set_birth_date(&mut self, raw: &str) {
        self.birth_date = raw.trim().to_string();
    }

    pub fn set_phone(&mut self, raw: &str) {
        self.phone = normalize_phone(raw);
    }

    pub fn set_email(&mut self, raw: &str) {
        self.email = raw.trim().to_string();
    }

    pub fn set_telegram_username(&mut self, raw: &str) {
        self.telegram_username = sanitize_telegram(raw);
    }

    pub fn set_passport_series(&mut self, raw: &str) {
        self.passport_series = sanitize_passport_series(raw);
    }

    pub fn set_passport_number(&mut self, raw: &str) {
        self.passport_number = digits_only(raw, 7);
    }

    pub fn set_pinfl(&mut self, raw: &str) {
        self.pinfl = digits_only(raw, 14);
    }

    pub fn attach_passport_image(&mut self, file: FilePayload) {
        self.passport_image = Some(file);
    }

    /// Phone as the backend expects it: digits only, no leading `+`.
    pub fn phone_digits(&self) -> String {
        self.phone.trim_start_matches('+').to_string()
    }

    /// Package the draft for submission. `None` until the course id and the
    /// passport image are present; field validity is the validators' job.
    pub fn to_submission(&self) -> Option<RegistrationForm> {
        let course = self.course?;
        let passport_image = self.passport_image.clone()?;
        let telegram = self.telegram_username.trim();
        Some(RegistrationForm {
            course,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            middle_name: self.middle_name.clone(),
            birth_date: self.birth_date.clone(),
            phone: self.phone_digits(),
            email: self.email.clone(),
            telegram_username: (!telegram.is_empty()).then(|| telegram.to_string()),
            passport_series: self.passport_series.clone(),
            passport_number: self.passport_number.clone(),
            pinfl: self.pinfl.clone(),
            passport_image,
        })
    }
}

/// Characters allowed in name fields: Latin and Cyrillic letters (which
/// covers the Uzbek Cyrillic extensions), space, hyphen, apostrophe, period.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{0400}'..='\u{04FF}').contains(&c)
        || matches!(c, ' ' | '-' | '\'' | '.')
}

pub fn sanitize_name(raw: &str) -> String {
    raw.chars().filter(|&c| is_name_char(c)).take(NAME_MAX_CHARS).collect()
}

/// Coerce any input into `+` followed by digits, capped at the Uzbek
/// `+998XXXXXXXXX` length. Idempotent: normalizing an already-normal number
/// yields the same value.
pub fn normalize_phone(raw: &str) -> String {
    let mut out = String::with_capacity(PHONE_MAX_CHARS);
    out.push('+');
    out.extend(
        raw.chars()
            .filter(char::is_ascii_digit)
            .take(PHONE_MAX_CHARS - 1),
    );
    out
}

/// Uppercase Latin letters only, truncated to the 2-character series.
pub fn sanitize_passport_series(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .take(2)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn digits_only(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Optional `@handle`: word characters with a single optional leading `@`.
pub fn sanitize_telegram(raw: &str) -> String {
    let mut out = String::new();
    for (i, c) in raw.chars().enumerate() {
        if i == 0 && c == '@' {
            out.push(c);
        } else if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        }
        if out.len() == TELEGRAM_MAX_CHARS {
            break;
        }
    }
    out
}

pub fn sanitize_otp_code(raw: &str) -> String {
    digits_only(raw, OTP_CODE_LEN)
}

/// Content type for the picked passport file, from its extension. The
/// backend only requires presence, so `application/octet-stream` is a safe
/// fallback.
pub fn mime_for_file(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "heic" => "image/heic",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_normalization_is_idempotent() {
        let once = normalize_phone("+998901234567");
        let twice = normalize_phone(&once);
        assert_eq!(once, "+998901234567");
        assert_eq!(once, twice);
    }

    #[test]
    fn phone_gains_plus_and_drops_separators() {
        assert_eq!(normalize_phone("998 90 123-45-67"), "+998901234567");
        assert_eq!(normalize_phone("abc"), "+");
        assert_eq!(normalize_phone("+9989012345678901"), "+998901234567");
    }

    #[test]
    fn passport_series_is_uppercased_and_truncated() {
        assert_eq!(sanitize_passport_series("ab12"), "AB");
        assert_eq!(sanitize_passport_series("a"), "A");
        assert_eq!(sanitize_passport_series("12"), "");
        assert_eq!(sanitize_passport_series("abcd"), "AB");
    }

    #[test]
    fn names_keep_letters_and_punctuation_only() {
        assert_eq!(sanitize_name("Анна-Мария"), "Анна-Мария");
        assert_eq!(sanitize_name("O'tkir"), "O'tkir");
        assert_eq!(sanitize_name("Aziz123"), "Aziz");
        assert_eq!(sanitize_name("Ғафур"), "Ғафур");
        let long = "а".repeat(60);
        assert_eq!(sanitize_name(&long).chars().count(), NAME_MAX_CHARS);
    }

    #[test]
    fn telegram_handle_keeps_single_leading_at() {
        assert_eq!(sanitize_telegram("@aziz_k"), "@aziz_k");
        assert_eq!(sanitize_telegram("aziz k!"), "azizk");
        assert_eq!(sanitize_telegram("a@b"), "ab");
    }

    #[test]
    fn otp_code_is_digits_capped_at_six() {
        assert_eq!(sanitize_otp_code("12 34 56 78"), "123456");
        assert_eq!(sanitize_otp_code("12a3"), "123");
    }

    #[test]
    fn submission_strips_the_phone_plus() {
        let mut draft = RegistrationDraft::for_course(5);
        draft.set_phone("+998901234567");
        draft.attach_passport_image(FilePayload {
            file_name: "p.jpg".into(),
            mime_type: "image/jpeg".into(),
            bytes: vec![1],
        });
        let form = draft.to_submission().expect("submittable");
        assert_eq!(form.phone, "998901234567");
        assert_eq!(form.course, 5);
        assert_eq!(form.telegram_username, None);
    }

    #[test]
    fn submission_requires_an_image() {
        let draft = RegistrationDraft::for_course(5);
        assert!(draft.to_submission().is_none());
    }
}
