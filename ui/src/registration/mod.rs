//! Course registration wizard: draft, validation, state machine, and the
//! Dioxus views that drive them.

pub mod draft;
pub mod engine;
pub mod messages;
pub mod success;
pub mod validate;
pub mod view;

pub use draft::RegistrationDraft;
pub use engine::{OtpState, Phase, RegistrationEngine, Step, OTP_TTL_SECS};
pub use success::RegistrationSuccess;
pub use validate::ValidationError;
pub use view::RegistrationWizard;
