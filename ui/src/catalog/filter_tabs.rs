use api::Category;
use dioxus::prelude::*;

use crate::t;

/// Category tab strip above the course grid. `selected` is the slug of the
/// active category, or `None` for the implicit "all" tab.
#[component]
pub fn FilterTabs(
    categories: Vec<Category>,
    selected: Option<String>,
    on_select: EventHandler<Option<String>>,
) -> Element {
    rsx! {
        div { class: "filter-tabs", role: "tablist",
            button {
                r#type: "button",
                role: "tab",
                class: if selected.is_none() {
                    "filter-tabs__tab filter-tabs__tab--active"
                } else {
                    "filter-tabs__tab"
                },
                onclick: move |_| on_select.call(None),
                {t!("courses-all")}
            }
            for category in categories {
                {
                    let slug = category.slug.clone();
                    let active = selected.as_deref() == Some(slug.as_str());
                    rsx! {
                        button {
                            key: "{category.id}",
                            r#type: "button",
                            role: "tab",
                            class: if active {
                                "filter-tabs__tab filter-tabs__tab--active"
                            } else {
                                "filter-tabs__tab"
                            },
                            onclick: move |_| on_select.call(Some(slug.clone())),
                            "{category.name}"
                        }
                    }
                }
            }
        }
    }
}
