//! State machine for the 4-step registration wizard.
//!
//! The engine is render-agnostic and fully synchronous: every method
//! mutates the engine and, where a side effect is needed, returns a
//! dispatch value describing the network call or timer the view must
//! launch. Async completions come back through `*_resolved` methods
//! tagged with the session id they belong to; completions from a
//! previous session are ignored, so a torn-down or reset wizard can
//! never be mutated by a stale response. Countdown ticks additionally
//! carry an OTP epoch so the per-second loop of an earlier code stops
//! once a new code is issued.

use super::draft::{sanitize_otp_code, RegistrationDraft, OTP_CODE_LEN};
use super::validate::{self, phone_is_valid, ValidationError};

/// How long an issued code stays valid, in seconds.
pub const OTP_TTL_SECS: u32 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Personal,
    Contact,
    Documents,
    Verification,
}

impl Step {
    pub const COUNT: u8 = 4;

    /// 1-based position shown in the progress bar.
    pub fn index(self) -> u8 {
        match self {
            Step::Personal => 1,
            Step::Contact => 2,
            Step::Documents => 3,
            Step::Verification => 4,
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Personal => Some(Step::Contact),
            Step::Contact => Some(Step::Documents),
            Step::Documents => Some(Step::Verification),
            Step::Verification => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::Personal => None,
            Step::Contact => Some(Step::Personal),
            Step::Documents => Some(Step::Contact),
            Step::Verification => Some(Step::Documents),
        }
    }
}

/// OTP sub-state within step 4. `verified` is monotonic: once reached it is
/// never left for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpState {
    Idle,
    Requesting,
    Sent { remaining: u32, verifying: bool },
    Verified,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Submitting,
    Submitted,
    Failed,
}

/// Outcome of a backend call, already stripped of transport detail. The
/// view maps `api::ApiError` into this before feeding the engine, keeping
/// the engine free of HTTP types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// Backend throttled us; the UI shows its canonical localized message.
    RateLimited,
    /// Backend refused with a usable message, echoed to the user as-is.
    Message(String),
    /// Network-level failure or unusable response.
    Transport,
}

/// Step-level problem shown in the wizard banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormIssue {
    Validation(ValidationError),
    PhoneUnverified,
}

/// Problem shown next to the OTP controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpIssue {
    WaitBeforeResend,
    InvalidPhone,
    CodeLength,
    RateLimited,
    SendFailed,
    VerifyFailed,
    Server(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDispatch {
    pub session: u64,
    /// Digits only, leading `+` already stripped.
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyDispatch {
    pub session: u64,
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitDispatch {
    pub session: u64,
}

/// What `advance` did. When the wizard lands on step 4 with no pending or
/// unexpired code, it auto-requests one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceEffect {
    pub otp_request: Option<OtpDispatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Schedule the next one-second tick.
    Continue,
    /// Countdown finished or no longer applies; stop the loop.
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationEngine {
    session: u64,
    otp_epoch: u64,
    pub step: Step,
    pub phase: Phase,
    pub otp: OtpState,
    pub otp_code: String,
    pub form_error: Option<FormIssue>,
    pub otp_error: Option<OtpIssue>,
    pub submit_error: Option<RemoteFailure>,
}

impl Default for RegistrationEngine {
    fn default() -> Self {
        Self {
            session: 1,
            otp_epoch: 0,
            step: Step::Personal,
            phase: Phase::InProgress,
            otp: OtpState::Idle,
            otp_code: String::new(),
            form_error: None,
            otp_error: None,
            submit_error: None,
        }
    }
}

impl RegistrationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Epoch of the currently ticking countdown, used to tag tick events.
    pub fn otp_epoch(&self) -> u64 {
        self.otp_epoch
    }

    pub fn is_verified(&self) -> bool {
        matches!(self.otp, OtpState::Verified)
    }

    /// Abandon the current session. In-flight completions and ticks tagged
    /// with the old session id will be ignored from here on.
    pub fn reset(&mut self) {
        let session = self.session + 1;
        let epoch = self.otp_epoch + 1;
        *self = Self::default();
        self.session = session;
        self.otp_epoch = epoch;
    }

    /// Move forward one step if the current step validates. Entering the
    /// verification step may auto-issue an OTP request.
    pub fn advance(&mut self, draft: &RegistrationDraft) -> Option<AdvanceEffect> {
        if self.phase != Phase::InProgress {
            return None;
        }
        if let Err(err) = validate::validate_step(self.step, draft) {
            self.form_error = Some(FormIssue::Validation(err));
            return None;
        }
        let next = self.step.next()?;
        self.step = next;
        self.form_error = None;
        let otp_request = if next == Step::Verification {
            self.try_begin_otp(draft, false)
        } else {
            None
        };
        Some(AdvanceEffect { otp_request })
    }

    /// Move back one step. Never validates and never touches the
    /// verification state.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            self.form_error = None;
        }
    }

    /// Keep the entered code digits-only and capped at six characters.
    pub fn input_code(&mut self, raw: &str) {
        self.otp_code = sanitize_otp_code(raw);
    }

    /// Explicit (re)send request from the user.
    pub fn request_otp(&mut self, draft: &RegistrationDraft) -> Option<OtpDispatch> {
        self.try_begin_otp(draft, true)
    }

    fn try_begin_otp(&mut self, draft: &RegistrationDraft, manual: bool) -> Option<OtpDispatch> {
        match self.otp {
            OtpState::Requesting | OtpState::Verified => return None,
            OtpState::Sent { remaining, .. } if remaining > 0 => {
                if manual {
                    self.otp_error = Some(OtpIssue::WaitBeforeResend);
                }
                return None;
            }
            _ => {}
        }
        if !phone_is_valid(&draft.phone) {
            self.otp_error = Some(OtpIssue::InvalidPhone);
            return None;
        }
        self.otp = OtpState::Requesting;
        self.otp_error = None;
        Some(OtpDispatch {
            session: self.session,
            phone: draft.phone_digits(),
        })
    }

    /// Completion of the OTP-issue call. Returns true when a fresh
    /// countdown started and the view should begin the tick loop.
    pub fn otp_request_resolved(
        &mut self,
        session: u64,
        result: Result<(), RemoteFailure>,
    ) -> bool {
        if session != self.session || self.otp != OtpState::Requesting {
            return false;
        }
        match result {
            Ok(()) => {
                self.otp_epoch += 1;
                self.otp = OtpState::Sent {
                    remaining: OTP_TTL_SECS,
                    verifying: false,
                };
                self.otp_error = None;
                true
            }
            Err(failure) => {
                self.otp = OtpState::Idle;
                self.otp_error = Some(otp_issue(failure, OtpIssue::SendFailed));
                false
            }
        }
    }

    /// One-second countdown tick. Stale sessions/epochs are ignored so a
    /// superseded loop dies on its next wakeup.
    pub fn tick(&mut self, session: u64, epoch: u64) -> TickOutcome {
        if session != self.session || epoch != self.otp_epoch {
            return TickOutcome::Stop;
        }
        match &mut self.otp {
            OtpState::Sent { remaining, .. } => {
                *remaining -= 1;
                if *remaining == 0 {
                    self.otp = OtpState::Expired;
                    TickOutcome::Stop
                } else {
                    TickOutcome::Continue
                }
            }
            _ => TickOutcome::Stop,
        }
    }

    /// Start a verification call for the entered code.
    pub fn begin_verify(&mut self, draft: &RegistrationDraft) -> Option<VerifyDispatch> {
        let OtpState::Sent {
            remaining,
            verifying: false,
        } = self.otp
        else {
            return None;
        };
        if remaining == 0 {
            return None;
        }
        if self.otp_code.len() != OTP_CODE_LEN {
            self.otp_error = Some(OtpIssue::CodeLength);
            return None;
        }
        self.otp = OtpState::Sent {
            remaining,
            verifying: true,
        };
        self.otp_error = None;
        Some(VerifyDispatch {
            session: self.session,
            phone: draft.phone_digits(),
            code: self.otp_code.clone(),
        })
    }

    /// Completion of the verify call. Failure keeps the current countdown
    /// window so the user can retry with a corrected code.
    pub fn verify_resolved(&mut self, session: u64, result: Result<(), RemoteFailure>) {
        if session != self.session {
            return;
        }
        match result {
            Ok(()) => {
                self.otp = OtpState::Verified;
                self.otp_error = None;
            }
            Err(failure) => {
                if let OtpState::Sent { remaining, .. } = self.otp {
                    self.otp = OtpState::Sent {
                        remaining,
                        verifying: false,
                    };
                }
                self.otp_error = Some(otp_issue(failure, OtpIssue::VerifyFailed));
            }
        }
    }

    /// Gate submission on verification and a fully valid draft.
    pub fn begin_submit(&mut self, draft: &RegistrationDraft) -> Option<SubmitDispatch> {
        if !matches!(self.phase, Phase::InProgress | Phase::Failed) {
            return None;
        }
        if !self.is_verified() {
            self.form_error = Some(FormIssue::PhoneUnverified);
            return None;
        }
        if let Err(err) = validate::validate_draft(draft) {
            self.form_error = Some(FormIssue::Validation(err));
            return None;
        }
        self.phase = Phase::Submitting;
        self.form_error = None;
        self.submit_error = None;
        Some(SubmitDispatch {
            session: self.session,
        })
    }

    /// Completion of the registration call. Failure keeps the draft and the
    /// verified phone so the user can resubmit.
    pub fn submit_resolved(&mut self, session: u64, result: Result<(), RemoteFailure>) {
        if session != self.session || self.phase != Phase::Submitting {
            return;
        }
        match result {
            Ok(()) => self.phase = Phase::Submitted,
            Err(failure) => {
                self.phase = Phase::Failed;
                self.submit_error = Some(failure);
            }
        }
    }
}

fn otp_issue(failure: RemoteFailure, transport_fallback: OtpIssue) -> OtpIssue {
    match failure {
        RemoteFailure::RateLimited => OtpIssue::RateLimited,
        RemoteFailure::Message(message) => OtpIssue::Server(message),
        RemoteFailure::Transport => transport_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::FilePayload;

    fn complete_draft() -> RegistrationDraft {
        let mut draft = RegistrationDraft::for_course(9);
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
            bytes: vec![1],
        });
        draft
    }

    /// Drive a fresh engine to step 4 and return the auto-issued dispatch.
    fn reach_verification(engine: &mut RegistrationEngine, draft: &RegistrationDraft) -> OtpDispatch {
        assert!(engine.advance(draft).is_some());
        assert!(engine.advance(draft).is_some());
        let effect = engine.advance(draft).expect("step 3 validates");
        assert_eq!(engine.step, Step::Verification);
        effect.otp_request.expect("entering step 4 auto-requests")
    }

    #[test]
    fn advance_is_blocked_by_invalid_step() {
        let mut engine = RegistrationEngine::new();
        let draft = RegistrationDraft::for_course(9);
        assert!(engine.advance(&draft).is_none());
        assert_eq!(engine.step, Step::Personal);
        assert_eq!(
            engine.form_error,
            Some(FormIssue::Validation(ValidationError::RequiredFields))
        );
    }

    #[test]
    fn entering_step_four_requests_exactly_one_otp() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert_eq!(dispatch.phone, "998901234567");
        assert_eq!(engine.otp, OtpState::Requesting);

        // Going back and forward again while a request is pending must not
        // issue a second one.
        engine.retreat();
        let effect = engine.advance(&draft).expect("re-entering step 4");
        assert_eq!(effect.otp_request, None);
    }

    #[test]
    fn resend_is_rejected_locally_while_countdown_runs() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));

        assert_eq!(engine.request_otp(&draft), None);
        assert_eq!(engine.otp_error, Some(OtpIssue::WaitBeforeResend));
    }

    #[test]
    fn countdown_decrements_to_expiry_then_allows_a_new_request() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));
        let epoch = engine.otp_epoch();

        let mut last = OTP_TTL_SECS;
        for _ in 0..OTP_TTL_SECS - 1 {
            assert_eq!(engine.tick(dispatch.session, epoch), TickOutcome::Continue);
            let OtpState::Sent { remaining, .. } = engine.otp else {
                panic!("countdown must stay in Sent until zero");
            };
            assert_eq!(remaining, last - 1);
            last = remaining;
        }
        assert_eq!(engine.tick(dispatch.session, epoch), TickOutcome::Stop);
        assert_eq!(engine.otp, OtpState::Expired);

        // Expired: verification is gated off, a new request is allowed.
        engine.input_code("123456");
        assert!(engine.begin_verify(&draft).is_none());
        assert!(engine.request_otp(&draft).is_some());
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));
        let epoch = engine.otp_epoch();

        assert_eq!(engine.tick(dispatch.session, epoch - 1), TickOutcome::Stop);
        assert_eq!(engine.tick(dispatch.session + 1, epoch), TickOutcome::Stop);
        assert_eq!(
            engine.otp,
            OtpState::Sent {
                remaining: OTP_TTL_SECS,
                verifying: false
            }
        );
    }

    #[test]
    fn failed_verify_keeps_the_window_and_allows_retry() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));
        let epoch = engine.otp_epoch();
        for _ in 0..10 {
            engine.tick(dispatch.session, epoch);
        }

        engine.input_code("000000");
        let verify = engine.begin_verify(&draft).expect("verify starts");
        engine.verify_resolved(verify.session, Err(RemoteFailure::Transport));

        assert!(!engine.is_verified());
        assert_eq!(engine.otp_error, Some(OtpIssue::VerifyFailed));
        assert_eq!(
            engine.otp,
            OtpState::Sent {
                remaining: OTP_TTL_SECS - 10,
                verifying: false
            }
        );
        engine.input_code("123456");
        assert!(engine.begin_verify(&draft).is_some());
    }

    #[test]
    fn throttled_verify_uses_the_canonical_issue() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));

        engine.input_code("123456");
        let verify = engine.begin_verify(&draft).expect("verify starts");
        engine.verify_resolved(verify.session, Err(RemoteFailure::RateLimited));
        assert_eq!(engine.otp_error, Some(OtpIssue::RateLimited));
    }

    #[test]
    fn short_code_never_reaches_the_network() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));

        engine.input_code("123");
        assert!(engine.begin_verify(&draft).is_none());
        assert_eq!(engine.otp_error, Some(OtpIssue::CodeLength));
    }

    #[test]
    fn submit_is_a_no_op_until_verified() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));

        assert!(engine.begin_submit(&draft).is_none());
        assert_eq!(engine.form_error, Some(FormIssue::PhoneUnverified));
        assert_eq!(engine.phase, Phase::InProgress);
    }

    #[test]
    fn happy_path_reaches_submitted() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));

        engine.input_code("123456");
        let verify = engine.begin_verify(&draft).expect("verify starts");
        engine.verify_resolved(verify.session, Ok(()));
        assert!(engine.is_verified());

        let submit = engine.begin_submit(&draft).expect("submit allowed");
        assert_eq!(engine.phase, Phase::Submitting);
        engine.submit_resolved(submit.session, Ok(()));
        assert_eq!(engine.phase, Phase::Submitted);
    }

    #[test]
    fn failed_submission_keeps_verification_and_is_retryable() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);
        assert!(engine.otp_request_resolved(dispatch.session, Ok(())));
        engine.input_code("123456");
        let verify = engine.begin_verify(&draft).expect("verify starts");
        engine.verify_resolved(verify.session, Ok(()));

        let submit = engine.begin_submit(&draft).expect("first submit");
        engine.submit_resolved(
            submit.session,
            Err(RemoteFailure::Message("PINFL already registered".into())),
        );
        assert_eq!(engine.phase, Phase::Failed);
        assert!(engine.is_verified());
        assert_eq!(
            engine.submit_error,
            Some(RemoteFailure::Message("PINFL already registered".into()))
        );

        assert!(engine.begin_submit(&draft).is_some());
    }

    #[test]
    fn reset_invalidates_in_flight_completions() {
        let mut engine = RegistrationEngine::new();
        let draft = complete_draft();
        let dispatch = reach_verification(&mut engine, &draft);

        engine.reset();
        assert!(!engine.otp_request_resolved(dispatch.session, Ok(())));
        assert_eq!(engine.otp, OtpState::Idle);
        assert_eq!(engine.step, Step::Personal);
    }
}
