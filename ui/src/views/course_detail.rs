use api::{ApiClient, CourseDetail};
use dioxus::prelude::*;

use crate::catalog::level_label;
use crate::components::RegistrationModal;
use crate::core::language::Language;
use crate::t;

#[component]
pub fn CourseDetailPage(slug: String) -> Element {
    let client = use_context::<ApiClient>();
    let lang_ctx: Option<Signal<Language>> = try_use_context::<Signal<Language>>();

    let mut show_registration = use_signal(|| false);

    let detail = use_resource({
        let client = client.clone();
        let slug = slug.clone();
        move || {
            let client = client.clone();
            let slug = slug.clone();
            let lang = lang_ctx.map(|s| s()).unwrap_or_default().code();
            async move { client.course_detail(lang, &slug).await }
        }
    });

    match &*detail.read_unchecked() {
        Some(Ok(course)) => rsx! {
            {course_body(course.clone(), show_registration)}
            if show_registration() {
                RegistrationModal {
                    course_id: course.id,
                    on_close: move |_| show_registration.set(false),
                }
            }
        },
        Some(Err(_)) => rsx! {
            section { class: "page page-course",
                p { class: "page-course__error", {t!("course-detail-failed")} }
            }
        },
        None => rsx! {
            section { class: "page page-course",
                p { class: "page-course__loading", {t!("course-detail-loading")} }
            }
        },
    }
}

fn course_body(course: CourseDetail, mut show_registration: Signal<bool>) -> Element {
    let level = level_label(&course.level);
    let mut outcomes = course.outcomes.clone();
    outcomes.sort_by_key(|o| o.order);

    rsx! {
        section { class: "page page-course",
            header { class: "page-course__header",
                h1 { "{course.title}" }
                div { class: "page-course__meta",
                    span { "{level}" }
                    span { "{course.duration}" }
                    if let Some(category) = course.category_name.as_ref() {
                        span { "{category}" }
                    }
                }
                button {
                    r#type: "button",
                    class: "page-course__enroll",
                    onclick: move |_| show_registration.set(true),
                    {t!("course-enroll")}
                }
            }

            div { class: "page-course__about",
                h2 { {t!("course-about-title")} }
                p { "{course.description}" }
            }

            if !outcomes.is_empty() || !course.what_will_learn.is_empty() {
                div { class: "page-course__program",
                    h2 { {t!("course-program-title")} }
                    if !course.what_will_learn.is_empty() {
                        p { "{course.what_will_learn}" }
                    }
                    if !outcomes.is_empty() {
                        ul {
                            for outcome in outcomes {
                                li { key: "{outcome.id}", "{outcome.text}" }
                            }
                        }
                    }
                }
            }

            ul { class: "page-course__stats",
                if course.video_hours > 0 {
                    li { {t!("course-video-hours", count = course.video_hours)} }
                }
                if course.coding_exercises > 0 {
                    li { {t!("course-exercises", count = course.coding_exercises)} }
                }
                if course.articles > 0 {
                    li { {t!("course-articles", count = course.articles)} }
                }
                if course.has_certificate {
                    li { {t!("course-certificate")} }
                }
            }
        }
    }
}
