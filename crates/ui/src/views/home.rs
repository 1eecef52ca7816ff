use dioxus::prelude::*;
use dioxus_router::use_navigator;

use trivia_core::model::Category;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ANY_FILTER, difficulty_options, filter_value, kind_options};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let defaults = ctx.default_query();

    let mut category = use_signal(|| filter_value(defaults.category()));
    let mut difficulty = use_signal(|| filter_value(defaults.difficulty()));
    let mut kind = use_signal(|| filter_value(defaults.kind()));

    let quiz_loop = ctx.quiz_loop();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        async move {
            quiz_loop
                .categories()
                .await
                .map_err(|err| ViewError::from_trivia(&err))
        }
    });
    let state = view_state_from_resource(&resource);

    let (categories, category_note): (Vec<Category>, Option<&'static str>) = match &state {
        ViewState::Ready(items) => (items.clone(), None),
        ViewState::Error(err) => (Vec::new(), Some(err.message())),
        ViewState::Idle | ViewState::Loading => (Vec::new(), Some("Loading categories...")),
    };
    let category_failed = matches!(state, ViewState::Error(_));
    let amount = defaults.amount();

    rsx! {
        div { class: "page setup-page",
            h2 { "New quiz" }
            p { class: "setup-page__lead", "{amount} questions per round." }

            div { class: "setup-field",
                label { r#for: "setup-category", "Category" }
                select {
                    id: "setup-category",
                    value: "{category}",
                    onchange: move |evt| category.set(evt.value()),
                    option { value: ANY_FILTER, "Any category" }
                    for item in categories {
                        option { key: "{item.id}", value: "{item.id}", "{item.name}" }
                    }
                }
                if let Some(note) = category_note {
                    p { class: "setup-field__note", "{note}" }
                }
                if category_failed {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                }
            }

            div { class: "setup-field",
                label { r#for: "setup-difficulty", "Difficulty" }
                select {
                    id: "setup-difficulty",
                    value: "{difficulty}",
                    onchange: move |evt| difficulty.set(evt.value()),
                    for (value, label) in difficulty_options() {
                        option { key: "{value}", value: "{value}", "{label}" }
                    }
                }
            }

            div { class: "setup-field",
                label { r#for: "setup-kind", "Question type" }
                select {
                    id: "setup-kind",
                    value: "{kind}",
                    onchange: move |evt| kind.set(evt.value()),
                    for (value, label) in kind_options() {
                        option { key: "{value}", value: "{value}", "{label}" }
                    }
                }
            }

            button {
                class: "btn btn-primary",
                id: "setup-start",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Quiz {
                        category: category(),
                        difficulty: difficulty(),
                        kind: kind(),
                    });
                },
                "Start quiz"
            }
        }
    }
}
