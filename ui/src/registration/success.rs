use dioxus::prelude::*;

use crate::t;

/// Confirmation screen shown once the registration call succeeds. Echoes
/// the submitted contact details so the user can spot a typo before the
/// academy calls back.
#[component]
pub fn RegistrationSuccess(
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "wizard-success",
            div { class: "wizard-success__icon", "✓" }
            h3 { {t!("reg-success-title")} }
            p { {t!("reg-success-text")} }
            dl { class: "wizard-success__details",
                dt { {t!("reg-first-name")} }
                dd { "{first_name} {last_name}" }
                dt { {t!("reg-email")} }
                dd { "{email}" }
                dt { {t!("reg-phone")} }
                dd { "{phone}" }
            }
            button {
                r#type: "button",
                class: "wizard-success__close",
                onclick: move |_| on_close.call(()),
                {t!("reg-close")}
            }
        }
    }
}
