//! Shared UI crate for the Skillwave Academy site. Cross-platform views,
//! the course catalog, and the registration wizard live here.

pub mod catalog;
pub mod core;
pub mod i18n;
pub mod registration;
pub mod views;

pub mod components {
    // Localized application navbar with the language switcher.
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    // Footer with the newsletter subscription form.
    pub mod app_footer;
    pub use app_footer::AppFooter;

    pub mod contact_form;
    pub use contact_form::ContactForm;

    pub mod registration_modal;
    pub use registration_modal::RegistrationModal;
}
