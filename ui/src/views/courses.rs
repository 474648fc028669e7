use api::ApiClient;
use dioxus::prelude::*;

use crate::catalog::{CourseCard, FilterTabs};
use crate::core::language::Language;
use crate::t;

/// Course catalog page: category tabs plus the filtered course grid. Both
/// resources re-fetch when the language or the selected category changes.
#[component]
pub fn CoursesPage(on_open_course: EventHandler<String>) -> Element {
    let client = use_context::<ApiClient>();
    let lang_ctx: Option<Signal<Language>> = try_use_context::<Signal<Language>>();

    let mut selected = use_signal(|| None::<String>);

    let categories = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            let lang = lang_ctx.map(|s| s()).unwrap_or_default().code();
            async move { client.categories(lang).await }
        }
    });

    let courses = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            let lang = lang_ctx.map(|s| s()).unwrap_or_default().code();
            let category = selected();
            async move { client.courses(lang, category.as_deref()).await }
        }
    });

    rsx! {
        section { class: "page page-courses",
            h1 { {t!("courses-title")} }

            match &*categories.read_unchecked() {
                Some(Ok(list)) => rsx! {
                    FilterTabs {
                        categories: list.clone(),
                        selected: selected(),
                        on_select: move |slug| selected.set(slug),
                    }
                },
                // The grid is still usable without tabs.
                Some(Err(_)) | None => rsx! {},
            }

            match &*courses.read_unchecked() {
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "page-courses__empty", {t!("courses-empty")} }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "page-courses__grid",
                        for course in list.clone() {
                            CourseCard {
                                key: "{course.id}",
                                course,
                                on_open: move |slug| on_open_course.call(slug),
                            }
                        }
                    }
                },
                Some(Err(_)) => rsx! {
                    p { class: "page-courses__error", {t!("courses-load-failed")} }
                },
                None => rsx! {
                    p { class: "page-courses__loading", {t!("courses-loading")} }
                },
            }
        }
    }
}
