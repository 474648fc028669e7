use dioxus::prelude::*;

use api::ApiClient;
use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::{AppFooter, AppNavbar};
use ui::core::language::{self, Language};
use ui::views::{ContactPage, CourseDetailPage, CoursesPage, HomePage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    Home {},
    #[route("/courses")]
    Courses {},
    #[route("/courses/:slug")]
    CourseDetail { slug: String },
    #[route("/contact")]
    Contact {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_courses(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Courses {},
        "{label}"
    })
}
fn nav_contact(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Contact {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        register_nav(NavBuilder {
            home: nav_home,
            courses: nav_courses,
            contact: nav_contact,
        });
    }

    // Shared language signal: components read it to re-render on switch,
    // the navbar writes it.
    let initial = language::initial();
    use_context_provider(|| Signal::<Language>::new(initial));
    language::activate(initial);

    // One HTTP client for the whole tree.
    use_context_provider(|| ApiClient::new_or_default(api::DEFAULT_BASE_URL));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Web shell: navbar on top, footer below the routed page.
#[component]
fn WebShell() -> Element {
    rsx! {
        AppNavbar {}
        main { class: "site-main",
            Outlet::<Route> {}
        }
        AppFooter {}
    }
}

#[component]
fn Home() -> Element {
    let nav = use_navigator();
    rsx! {
        HomePage {
            on_browse: move |_| {
                nav.push(Route::Courses {});
            },
        }
    }
}

#[component]
fn Courses() -> Element {
    let nav = use_navigator();
    rsx! {
        CoursesPage {
            on_open_course: move |slug| {
                nav.push(Route::CourseDetail { slug });
            },
        }
    }
}

#[component]
fn CourseDetail(slug: String) -> Element {
    rsx! {
        CourseDetailPage { slug }
    }
}

#[component]
fn Contact() -> Element {
    rsx! {
        ContactPage {}
    }
}
