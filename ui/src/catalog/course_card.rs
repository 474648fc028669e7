use api::Course;
use dioxus::prelude::*;

use super::level_label;
use crate::t;

/// One card in the course grid. The whole card is a link to the detail
/// page; the platform supplies the navigation through `on_open` so this
/// crate stays routing-agnostic.
#[component]
pub fn CourseCard(course: Course, on_open: EventHandler<String>) -> Element {
    let slug = course.slug.clone();
    let level = level_label(&course.level);
    let card_class = if course.featured {
        "course-card course-card--featured"
    } else {
        "course-card"
    };

    rsx! {
        article {
            class: card_class,
            onclick: move |_| on_open.call(slug.clone()),
            div { class: "course-card__top",
                if let Some(icon) = course.icon.as_ref() {
                    if course.icon_type.as_deref() == Some("image") {
                        img { class: "course-card__icon", src: "{icon}", alt: "" }
                    } else {
                        span { class: "course-card__icon", "{icon}" }
                    }
                }
                if course.is_new {
                    span { class: "course-card__badge", {t!("course-new-badge")} }
                }
            }
            h3 { class: "course-card__title", "{course.title}" }
            p { class: "course-card__description", "{course.description}" }
            div { class: "course-card__meta",
                span { class: "course-card__level", "{level}" }
                span { class: "course-card__duration", "{course.duration}" }
                if let Some(category) = course.category_name.as_ref() {
                    span { class: "course-card__category", "{category}" }
                }
            }
        }
    }
}
