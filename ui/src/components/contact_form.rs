use api::{ApiClient, ContactMessage};
use dioxus::prelude::*;

use crate::core::language::Language;
use crate::registration::draft::normalize_phone;
use crate::registration::validate::{email_is_valid, phone_is_valid};
use crate::t;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormState {
    Editing,
    Sending,
    Sent,
    Failed,
}

/// Callback-request form on the contact page. Shares the phone coercion
/// rules with the registration wizard so both surfaces accept input the
/// same way.
#[component]
pub fn ContactForm() -> Element {
    let client = use_context::<ApiClient>();
    let lang_ctx: Option<Signal<Language>> = try_use_context::<Signal<Language>>();

    let mut name = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut state = use_signal(|| FormState::Editing);
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if state() == FormState::Sending {
            return;
        }
        let payload = ContactMessage {
            name: name().trim().to_string(),
            phone: phone(),
            email: email().trim().to_string(),
            message: message().trim().to_string(),
        };
        if payload.name.is_empty() || payload.phone.is_empty() || payload.email.is_empty() {
            error.set(Some(t!("error-required-fields")));
            return;
        }
        if !email_is_valid(&payload.email) {
            error.set(Some(t!("error-invalid-email")));
            return;
        }
        if !phone_is_valid(&payload.phone) {
            error.set(Some(t!("error-invalid-phone")));
            return;
        }
        error.set(None);
        state.set(FormState::Sending);
        let client = client.clone();
        let lang = lang_ctx.map(|s| s()).unwrap_or_default().code();
        spawn(async move {
            match client.submit_contact(lang, &payload).await {
                Ok(()) => state.set(FormState::Sent),
                Err(_) => state.set(FormState::Failed),
            }
        });
    };

    if state() == FormState::Sent {
        return rsx! {
            div { class: "contact-form contact-form--sent",
                p { {t!("contact-sent")} }
            }
        };
    }

    rsx! {
        form { class: "contact-form", onsubmit: on_submit,
            if let Some(message) = error() {
                div { class: "contact-form__error", "{message}" }
            }
            if state() == FormState::Failed {
                div { class: "contact-form__error", {t!("contact-failed")} }
            }

            label { r#for: "contact_name", {t!("contact-name")} }
            input {
                id: "contact_name",
                r#type: "text",
                value: "{name}",
                maxlength: 100,
                oninput: move |evt| name.set(evt.value()),
            }

            label { r#for: "contact_phone", {t!("contact-phone")} }
            input {
                id: "contact_phone",
                r#type: "tel",
                value: "{phone}",
                maxlength: 13,
                placeholder: "+998XXXXXXXXX",
                oninput: move |evt| phone.set(normalize_phone(&evt.value())),
            }

            label { r#for: "contact_email", {t!("contact-email")} }
            input {
                id: "contact_email",
                r#type: "email",
                value: "{email}",
                maxlength: 100,
                oninput: move |evt| email.set(evt.value()),
            }

            label { r#for: "contact_message", {t!("contact-message")} }
            textarea {
                id: "contact_message",
                rows: 4,
                value: "{message}",
                oninput: move |evt| message.set(evt.value()),
            }

            button {
                r#type: "submit",
                disabled: state() == FormState::Sending,
                if state() == FormState::Sending {
                    {t!("contact-sending")}
                } else {
                    {t!("contact-send")}
                }
            }
        }
    }
}
