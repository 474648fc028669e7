//! Site language state.
//!
//! The three site languages map one-to-one onto the backend's
//! `Accept-Language` codes. The active language lives in an explicit
//! `Signal<Language>` provided by the platform crate; components subscribe
//! to it instead of relying on a page reload to pick up changes.

use crate::core::storage;
use crate::i18n;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Ru,
    Uz,
    En,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ru, Language::Uz, Language::En];

    /// Code sent in `Accept-Language` and used as the locale folder name.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Uz => "uz",
            Language::En => "en",
        }
    }

    /// Label shown in the language switcher.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Ru => "Русский",
            Language::Uz => "O'zbekcha",
            Language::En => "English",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

/// Language to start the session with: the persisted preference, or Russian.
pub fn initial() -> Language {
    storage::load_language_code()
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or_default()
}

/// Switch the active language: update the fluent loader and persist the
/// choice. The caller is responsible for updating the shared signal so the
/// tree re-renders.
pub fn activate(lang: Language) {
    let _ = i18n::set_language(lang.code());
    storage::save_language_code(lang.code());
}
