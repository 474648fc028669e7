use api::ApiClient;
use dioxus::prelude::*;

use crate::core::language::Language;
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubscribeState {
    Idle,
    Sending,
    Done,
    Failed,
}

/// Site footer with the newsletter subscription form.
#[component]
pub fn AppFooter() -> Element {
    let client = use_context::<ApiClient>();
    let lang_ctx: Option<Signal<Language>> = try_use_context::<Signal<Language>>();

    let mut email = use_signal(String::new);
    let mut state = use_signal(|| SubscribeState::Idle);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let address = email().trim().to_string();
        if address.is_empty() || state() == SubscribeState::Sending {
            return;
        }
        state.set(SubscribeState::Sending);
        let client = client.clone();
        let lang = lang_ctx.map(|s| s()).unwrap_or_default().code();
        spawn(async move {
            match client.subscribe(lang, &address).await {
                Ok(()) => {
                    state.set(SubscribeState::Done);
                    email.set(String::new());
                }
                Err(_) => state.set(SubscribeState::Failed),
            }
        });
    };

    rsx! {
        footer { class: "footer",
            div { class: "footer__inner",
                p { class: "footer__about", {t!("footer-about")} }

                form { class: "footer__subscribe", onsubmit: on_submit,
                    h4 { {t!("subscribe-title")} }
                    div { class: "footer__subscribe-row",
                        input {
                            r#type: "email",
                            placeholder: t!("subscribe-placeholder"),
                            value: "{email}",
                            oninput: move |evt| {
                                email.set(evt.value());
                                if state() != SubscribeState::Sending {
                                    state.set(SubscribeState::Idle);
                                }
                            },
                        }
                        button {
                            r#type: "submit",
                            disabled: state() == SubscribeState::Sending,
                            {t!("subscribe-button")}
                        }
                    }
                    match state() {
                        SubscribeState::Done => rsx! {
                            span { class: "footer__subscribe-ok", {t!("subscribe-done")} }
                        },
                        SubscribeState::Failed => rsx! {
                            span { class: "footer__subscribe-err", {t!("subscribe-failed")} }
                        },
                        _ => rsx! {},
                    }
                }
            }
        }
    }
}
