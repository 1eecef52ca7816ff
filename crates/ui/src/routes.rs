use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{HomeView, QuizView};

/// Quiz filters travel as query strings. An empty value means "use the
/// configured default" and `any` clears the filter.
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz?:category&:difficulty&:kind", QuizView)]
        Quiz { category: String, difficulty: String, kind: String },
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "app",
            header { class: "topbar",
                Link { class: "topbar__title", to: Route::Home {}, "Trivia Quiz" }
                if ctx.fixture_mode() {
                    span { class: "topbar__badge", "Offline questions" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
