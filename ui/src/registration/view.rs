//! Dioxus view for the registration wizard.
//!
//! The component owns the draft and the engine as signals and drives all
//! side effects through a coroutine event loop: user actions and async
//! completions arrive as `WizardEvent`s, the engine decides what happens,
//! and returned dispatch values are turned into spawned network calls or
//! countdown ticks. The view itself never touches the network directly.

use std::cell::RefCell;
use std::rc::Rc;

use api::{ApiClient, FilePayload};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;

use crate::core::language::Language;
use crate::core::{format, platform, timing};
use crate::t;

use super::draft::{mime_for_file, RegistrationDraft};
use super::engine::{
    OtpDispatch, OtpState, Phase, RegistrationEngine, RemoteFailure, Step, SubmitDispatch,
    TickOutcome, VerifyDispatch,
};
use super::messages;
use super::success::RegistrationSuccess;

#[derive(Debug)]
enum WizardEvent {
    Advance,
    Retreat,
    RequestOtp,
    OtpRequestResolved {
        session: u64,
        result: Result<(), RemoteFailure>,
    },
    Tick {
        session: u64,
        epoch: u64,
    },
    Verify,
    VerifyResolved {
        session: u64,
        result: Result<(), RemoteFailure>,
    },
    Submit,
    SubmitResolved {
        session: u64,
        result: Result<(), RemoteFailure>,
    },
}

type SenderSlot = Rc<RefCell<Option<UnboundedSender<WizardEvent>>>>;

#[component]
pub fn RegistrationWizard(course_id: u32, on_done: EventHandler<()>) -> Element {
    let mut draft = use_signal(|| RegistrationDraft::for_course(course_id));
    let engine = use_signal(RegistrationEngine::new);

    let client = use_context::<ApiClient>();
    let lang_ctx: Option<Signal<Language>> = try_use_context::<Signal<Language>>();

    let sender_slot: SenderSlot = Rc::new(RefCell::new(None));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = {
        let client = client.clone();

        use_coroutine(move |mut rx: UnboundedReceiver<WizardEvent>| {
            let slot = sender_slot_for_loop.clone();
            let client = client.clone();
            let mut engine = engine.clone();
            let draft = draft.clone();

            async move {
                while let Some(event) = rx.next().await {
                    let lang = lang_ctx.map(|s| s()).unwrap_or_default().code();
                    match event {
                        WizardEvent::Advance => {
                            let effect = engine.with_mut(|eng| eng.advance(&draft()));
                            if let Some(dispatch) = effect.and_then(|e| e.otp_request) {
                                launch_otp_request(&slot, client.clone(), lang, dispatch);
                            }
                        }
                        WizardEvent::Retreat => {
                            engine.with_mut(|eng| eng.retreat());
                        }
                        WizardEvent::RequestOtp => {
                            let dispatch = engine.with_mut(|eng| eng.request_otp(&draft()));
                            if let Some(dispatch) = dispatch {
                                launch_otp_request(&slot, client.clone(), lang, dispatch);
                            }
                        }
                        WizardEvent::OtpRequestResolved { session, result } => {
                            let started =
                                engine.with_mut(|eng| eng.otp_request_resolved(session, result));
                            if started {
                                let epoch = engine.with(|eng| eng.otp_epoch());
                                queue_tick(&slot, session, epoch);
                            }
                        }
                        WizardEvent::Tick { session, epoch } => {
                            let outcome = engine.with_mut(|eng| eng.tick(session, epoch));
                            if outcome == TickOutcome::Continue {
                                queue_tick(&slot, session, epoch);
                            }
                        }
                        WizardEvent::Verify => {
                            let dispatch = engine.with_mut(|eng| eng.begin_verify(&draft()));
                            if let Some(dispatch) = dispatch {
                                launch_verify(&slot, client.clone(), lang, dispatch);
                            }
                        }
                        WizardEvent::VerifyResolved { session, result } => {
                            engine.with_mut(|eng| eng.verify_resolved(session, result));
                        }
                        WizardEvent::Submit => {
                            let dispatch = engine.with_mut(|eng| eng.begin_submit(&draft()));
                            if let Some(dispatch) = dispatch {
                                match draft().to_submission() {
                                    Some(form) => launch_submit(
                                        &slot,
                                        client.clone(),
                                        lang,
                                        dispatch,
                                        Box::new(form),
                                    ),
                                    // Gated by begin_submit, so only reachable
                                    // if the image vanished mid-flight.
                                    None => engine.with_mut(|eng| {
                                        eng.submit_resolved(
                                            dispatch.session,
                                            Err(RemoteFailure::Transport),
                                        )
                                    }),
                                }
                            }
                        }
                        WizardEvent::SubmitResolved { session, result } => {
                            engine.with_mut(|eng| eng.submit_resolved(session, result));
                        }
                    }
                }
            }
        })
    };

    sender_slot.borrow_mut().replace(coroutine.tx());

    let snapshot = engine();
    let current = draft();

    if snapshot.phase == Phase::Submitted {
        return rsx! {
            RegistrationSuccess {
                first_name: current.first_name.clone(),
                last_name: current.last_name.clone(),
                email: current.email.clone(),
                phone: current.phone.clone(),
                on_close: move |_| on_done.call(()),
            }
        };
    }

    let submitting = snapshot.phase == Phase::Submitting;
    let form_error = snapshot.form_error.as_ref().map(messages::form_issue_text);
    let otp_error = snapshot.otp_error.as_ref().map(messages::otp_issue_text);
    let submit_error = snapshot.submit_error.as_ref().map(messages::submit_failure_text);

    rsx! {
        form {
            class: "wizard",
            onsubmit: move |evt| evt.prevent_default(),

            if let Some(message) = form_error {
                div { class: "wizard__banner wizard__banner--error", "{message}" }
            }

            div { class: "wizard__progress",
                for index in 1..=Step::COUNT {
                    div {
                        key: "{index}",
                        class: if snapshot.step.index() >= index {
                            "wizard__progress-bar wizard__progress-bar--done"
                        } else {
                            "wizard__progress-bar"
                        },
                    }
                }
            }

            match snapshot.step {
                Step::Personal => rsx! {
                    div { class: "wizard__step",
                        h3 { {t!("reg-step1-title")} }
                        label { r#for: "first_name", {t!("reg-first-name")} }
                        input {
                            id: "first_name",
                            r#type: "text",
                            value: "{current.first_name}",
                            maxlength: 50,
                            oninput: move |evt| draft.with_mut(|d| d.set_first_name(&evt.value())),
                        }
                        label { r#for: "last_name", {t!("reg-last-name")} }
                        input {
                            id: "last_name",
                            r#type: "text",
                            value: "{current.last_name}",
                            maxlength: 50,
                            oninput: move |evt| draft.with_mut(|d| d.set_last_name(&evt.value())),
                        }
                        label { r#for: "middle_name", {t!("reg-middle-name")} }
                        input {
                            id: "middle_name",
                            r#type: "text",
                            value: "{current.middle_name}",
                            maxlength: 50,
                            oninput: move |evt| draft.with_mut(|d| d.set_middle_name(&evt.value())),
                        }
                        label { r#for: "birth_date", {t!("reg-birth-date")} }
                        input {
                            id: "birth_date",
                            r#type: "date",
                            value: "{current.birth_date}",
                            oninput: move |evt| draft.with_mut(|d| d.set_birth_date(&evt.value())),
                        }
                    }
                },
                Step::Contact => rsx! {
                    div { class: "wizard__step",
                        h3 { {t!("reg-step2-title")} }
                        label { r#for: "phone", {t!("reg-phone")} }
                        input {
                            id: "phone",
                            r#type: "tel",
                            value: "{current.phone}",
                            maxlength: 13,
                            placeholder: "+998XXXXXXXXX",
                            oninput: move |evt| draft.with_mut(|d| d.set_phone(&evt.value())),
                        }
                        label { r#for: "email", {t!("reg-email")} }
                        input {
                            id: "email",
                            r#type: "email",
                            value: "{current.email}",
                            maxlength: 100,
                            oninput: move |evt| draft.with_mut(|d| d.set_email(&evt.value())),
                        }
                        label { r#for: "telegram_username", {t!("reg-telegram")} }
                        input {
                            id: "telegram_username",
                            r#type: "text",
                            value: "{current.telegram_username}",
                            maxlength: 32,
                            placeholder: "@username",
                            oninput: move |evt| draft.with_mut(|d| d.set_telegram_username(&evt.value())),
                        }
                    }
                },
                Step::Documents => rsx! {
                    div { class: "wizard__step",
                        h3 { {t!("reg-step3-title")} }
                        label { r#for: "passport_series", {t!("reg-passport-series")} }
                        input {
                            id: "passport_series",
                            r#type: "text",
                            value: "{current.passport_series}",
                            maxlength: 2,
                            oninput: move |evt| draft.with_mut(|d| d.set_passport_series(&evt.value())),
                        }
                        label { r#for: "passport_number", {t!("reg-passport-number")} }
                        input {
                            id: "passport_number",
                            r#type: "text",
                            value: "{current.passport_number}",
                            maxlength: 7,
                            oninput: move |evt| draft.with_mut(|d| d.set_passport_number(&evt.value())),
                        }
                        label { r#for: "passport_image", {t!("reg-passport-image")} }
                        input {
                            id: "passport_image",
                            r#type: "file",
                            accept: "image/*,.pdf",
                            onchange: move |evt| {
                                if let Some(file_engine) = evt.files() {
                                    spawn(async move {
                                        for name in file_engine.files() {
                                            if let Some(bytes) = file_engine.read_file(&name).await {
                                                draft.with_mut(|d| {
                                                    d.attach_passport_image(FilePayload {
                                                        mime_type: mime_for_file(&name).to_string(),
                                                        file_name: name.clone(),
                                                        bytes,
                                                    })
                                                });
                                            }
                                        }
                                    });
                                }
                            },
                        }
                        if let Some(file) = current.passport_image.as_ref() {
                            span { class: "wizard__file-name", "{file.file_name}" }
                        }
                        label { r#for: "pinfl", {t!("reg-pinfl")} }
                        input {
                            id: "pinfl",
                            r#type: "text",
                            value: "{current.pinfl}",
                            maxlength: 14,
                            oninput: move |evt| draft.with_mut(|d| d.set_pinfl(&evt.value())),
                        }
                    }
                },
                Step::Verification => {
                    let (countdown, verifying) = match snapshot.otp {
                        OtpState::Sent { remaining, verifying } => (Some(remaining), verifying),
                        _ => (None, false),
                    };
                    let requesting = snapshot.otp == OtpState::Requesting;
                    let verified = snapshot.otp == OtpState::Verified;
                    let can_verify = countdown.is_some_and(|left| left > 0)
                        && !verifying
                        && snapshot.otp_code.len() == 6;
                    let mut engine_for_code = engine.clone();

                    rsx! {
                        div { class: "wizard__step",
                            h3 { {t!("reg-step4-title")} }
                            label { {t!("reg-phone")} }
                            input { r#type: "tel", value: "{current.phone}", disabled: true }

                            label { r#for: "otp", {t!("reg-otp-label")} }
                            div { class: "wizard__otp-row",
                                input {
                                    id: "otp",
                                    r#type: "text",
                                    inputmode: "numeric",
                                    value: "{snapshot.otp_code}",
                                    maxlength: 6,
                                    disabled: verified,
                                    oninput: move |evt| {
                                        engine_for_code.with_mut(|eng| eng.input_code(&evt.value()))
                                    },
                                }
                                button {
                                    r#type: "button",
                                    class: "wizard__verify",
                                    disabled: !can_verify || verified,
                                    onclick: move |_| coroutine.send(WizardEvent::Verify),
                                    if verifying { {t!("reg-verifying")} } else { {t!("reg-verify")} }
                                }
                            }

                            if let Some(left) = countdown {
                                div { class: "wizard__countdown",
                                    {t!("reg-otp-valid-for")}
                                    " {format::format_countdown(left)}"
                                }
                            }

                            if verified {
                                div { class: "wizard__verified", "✓ " {t!("reg-phone-verified")} }
                            } else {
                                button {
                                    r#type: "button",
                                    class: "wizard__resend",
                                    disabled: requesting || countdown.is_some_and(|left| left > 0),
                                    onclick: move |_| coroutine.send(WizardEvent::RequestOtp),
                                    if requesting {
                                        {t!("reg-sending")}
                                    } else if let Some(left) = countdown.filter(|left| *left > 0) {
                                        {t!("reg-wait-resend")}
                                        " {format::format_countdown(left)}"
                                    } else {
                                        {t!("reg-resend")}
                                    }
                                }
                            }

                            if let Some(message) = otp_error {
                                div { class: "wizard__otp-error", "{message}" }
                            }
                            if let Some(message) = submit_error {
                                div { class: "wizard__banner wizard__banner--error", "{message}" }
                            }
                        }
                    }
                }
            }

            div { class: "wizard__nav",
                if snapshot.step != Step::Personal {
                    button {
                        r#type: "button",
                        class: "wizard__back",
                        onclick: move |_| coroutine.send(WizardEvent::Retreat),
                        {t!("reg-back")}
                    }
                } else {
                    div {}
                }
                if snapshot.step != Step::Verification {
                    button {
                        r#type: "button",
                        class: "wizard__next",
                        onclick: move |_| coroutine.send(WizardEvent::Advance),
                        {t!("reg-next")}
                    }
                } else {
                    button {
                        r#type: "button",
                        class: "wizard__submit",
                        disabled: submitting || snapshot.otp != OtpState::Verified,
                        onclick: move |_| coroutine.send(WizardEvent::Submit),
                        if submitting { {t!("reg-sending")} } else { {t!("reg-submit")} }
                    }
                }
            }
        }
    }
}

fn launch_otp_request(slot: &SenderSlot, client: ApiClient, lang: &'static str, dispatch: OtpDispatch) {
    if let Some(sender) = slot.borrow().as_ref().cloned() {
        platform::spawn_future(async move {
            let result = client
                .request_otp(lang, &dispatch.phone)
                .await
                .map_err(messages::remote_failure);
            let _ = sender.unbounded_send(WizardEvent::OtpRequestResolved {
                session: dispatch.session,
                result,
            });
        });
    }
}

fn launch_verify(slot: &SenderSlot, client: ApiClient, lang: &'static str, dispatch: VerifyDispatch) {
    if let Some(sender) = slot.borrow().as_ref().cloned() {
        platform::spawn_future(async move {
            let result = client
                .verify_otp(lang, &dispatch.phone, &dispatch.code)
                .await
                .map_err(messages::remote_failure);
            let _ = sender.unbounded_send(WizardEvent::VerifyResolved {
                session: dispatch.session,
                result,
            });
        });
    }
}

fn launch_submit(
    slot: &SenderSlot,
    client: ApiClient,
    lang: &'static str,
    dispatch: SubmitDispatch,
    form: Box<api::RegistrationForm>,
) {
    if let Some(sender) = slot.borrow().as_ref().cloned() {
        platform::spawn_future(async move {
            let result = client
                .register(lang, &form)
                .await
                .map_err(messages::remote_failure);
            let _ = sender.unbounded_send(WizardEvent::SubmitResolved {
                session: dispatch.session,
                result,
            });
        });
    }
}

fn queue_tick(slot: &SenderSlot, session: u64, epoch: u64) {
    if let Some(sender) = slot.borrow().as_ref().cloned() {
        platform::spawn_future(async move {
            timing::sleep_ms(1000).await;
            let _ = sender.unbounded_send(WizardEvent::Tick { session, epoch });
        });
    }
}
