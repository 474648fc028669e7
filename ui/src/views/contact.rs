use dioxus::prelude::*;

use crate::components::ContactForm;
use crate::core::language::Language;
use crate::t;

#[component]
pub fn ContactPage() -> Element {
    let lang_ctx: Option<Signal<Language>> = try_use_context::<Signal<Language>>();
    let _lang = lang_ctx.map(|s| s()).unwrap_or_default();

    rsx! {
        section { class: "page page-contact",
            h1 { {t!("contact-title")} }
            p { class: "page-contact__intro", {t!("contact-intro")} }
            ContactForm {}
        }
    }
}
