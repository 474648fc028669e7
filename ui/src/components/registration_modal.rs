use dioxus::prelude::*;

use crate::registration::RegistrationWizard;
use crate::t;

/// Overlay hosting the registration wizard for one course. The wizard and
/// its engine are dropped with the modal, so reopening always starts a
/// fresh session and any in-flight responses land on a dead channel.
#[component]
pub fn RegistrationModal(course_id: u32, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "modal__header",
                    h2 { {t!("reg-title")} }
                    button {
                        r#type: "button",
                        class: "modal__close",
                        aria_label: t!("reg-close"),
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                RegistrationWizard {
                    course_id,
                    on_done: move |_| on_close.call(()),
                }
            }
        }
    }
}
