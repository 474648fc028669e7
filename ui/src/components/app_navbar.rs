use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::core::language::{self, Language};
use crate::t;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so this crate never needs to know the platform's `Route` enum.
/// Each closure receives the localized label and returns a link that already
/// contains it. Without a registered builder the navbar falls back to raw
/// `children`.
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub courses: fn(label: &str) -> Element,
    pub contact: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    crate::i18n::init();

    // Global language signal, provided by the platform crate. Reading it
    // here makes the navbar re-render with fresh labels on every switch.
    let lang_ctx: Option<Signal<Language>> = try_use_context::<Signal<Language>>();
    let current = lang_ctx.map(|s| s()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        if let Some(picked) = Language::from_code(&evt.value()) {
            language::activate(picked);
            if let Some(mut signal) = lang_ctx {
                signal.set(picked);
            }
        }
    };

    let internal_nav: Option<VNode> = NAV_BUILDER.get().map(|b| {
        let home = (b.home)(&t!("nav-home"));
        let courses = (b.courses)(&t!("nav-courses"));
        let contact = (b.contact)(&t!("nav-contact"));

        rsx! {
            nav { class: "navbar__links",
                {home}
                {courses}
                {contact}
            }
        }
        .expect("AppNavbar: rsx render failed")
    });

    let tagline = t!("tagline");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Skillwave" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                div { class: "navbar__locale",
                    label {
                        class: "visually-hidden",
                        r#for: "locale-select",
                        {t!("nav-language-label")}
                    }
                    select {
                        id: "locale-select",
                        value: "{current.code()}",
                        oninput: on_change,
                        { Language::ALL.iter().map(|lang| {
                            let code = lang.code();
                            rsx! {
                                option { key: "{code}", value: "{code}", "{lang.native_name()}" }
                            }
                        })}
                    }
                }
            }
        }
    }
}
