use dioxus::prelude::*;

use crate::core::language::Language;
use crate::t;

#[component]
pub fn HomePage(on_browse: EventHandler<()>) -> Element {
    // Subscribe to the global language so the page re-renders on switch.
    let lang_ctx: Option<Signal<Language>> = try_use_context::<Signal<Language>>();
    let _lang = lang_ctx.map(|s| s()).unwrap_or_default();

    rsx! {
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { class: "page-home__intro", {t!("home-intro")} }

            ul { class: "page-home__features",
                li { {t!("home-feature-academy")} }
                li { {t!("home-feature-mentors")} }
                li { {t!("home-feature-jobs")} }
            }

            button {
                r#type: "button",
                class: "page-home__cta",
                onclick: move |_| on_browse.call(()),
                {t!("home-cta")}
            }
        }
    }
}
