use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::{QuizController, QuizError, QuizStatus, SelectOutcome};
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{
    AnswerButtonVm, AnswerState, CompletionVm, QuestionVm, QuizIntent, completion_vm, question_vm,
    resolve_query, shortcut_index,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView(category: String, difficulty: String, kind: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let query = resolve_query(ctx.default_query(), &category, &difficulty, &kind);
    let quiz_loop = ctx.quiz_loop();

    let controller = use_signal(QuizController::new);

    // Runs on mount and on every restart. `begin_fetch` drops re-entrant triggers.
    let loader = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let mut controller = controller;
        async move {
            if !controller.write().begin_fetch() {
                return;
            }
            let result = quiz_loop.fetch_questions(&query).await;
            controller.write().complete_fetch(result);
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut controller = controller;
        let mut loader = loader;
        match intent {
            QuizIntent::Select(index) => {
                apply_select(&mut controller.write(), index);
            }
            QuizIntent::Next => {
                controller.write().advance();
            }
            QuizIntent::Retry => {
                if controller.write().retry() {
                    loader.restart();
                }
            }
            QuizIntent::PlayAgain => {
                if controller.write().play_again() {
                    loader.restart();
                }
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, controller);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let guard = controller.read();
        let Some(session) = guard.session() else {
            return;
        };
        if guard.status() != QuizStatus::Ready {
            return;
        }
        let answer_count = session.current_question().answers().len();
        let can_advance = session.selected().is_some();
        drop(guard);

        match evt.data.key() {
            Key::Enter if can_advance => {
                evt.prevent_default();
                dispatch.call(QuizIntent::Next);
            }
            Key::Character(value) => {
                if let Some(index) = shortcut_index(&value, answer_count) {
                    evt.prevent_default();
                    dispatch.call(QuizIntent::Select(index));
                }
            }
            _ => {}
        }
    });

    let guard = controller.read();
    let status = guard.status();
    let question = guard
        .session()
        .filter(|_| status == QuizStatus::Ready)
        .map(question_vm);
    let completion = guard
        .session()
        .filter(|_| status == QuizStatus::Completed)
        .map(completion_vm);
    let error_message = guard
        .error()
        .map_or(ViewError::Unknown, ViewError::from)
        .message();
    drop(guard);

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            header { class: "quiz-page__header",
                h2 { "Quiz" }
                button {
                    class: "btn btn-ghost",
                    id: "quiz-quit",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Home {});
                    },
                    "Change settings"
                }
            }
            match status {
                QuizStatus::Loading => rsx! {
                    p { class: "quiz-loading", "Loading questions..." }
                },
                QuizStatus::Error => rsx! {
                    div { class: "quiz-error",
                        p { "{error_message}" }
                        button {
                            class: "btn btn-secondary",
                            id: "quiz-retry",
                            r#type: "button",
                            onclick: move |_| dispatch.call(QuizIntent::Retry),
                            "Retry"
                        }
                    }
                },
                QuizStatus::Ready => rsx! {
                    if let Some(vm) = question {
                        QuestionPanel { vm, on_intent: dispatch }
                    }
                },
                QuizStatus::Completed => rsx! {
                    if let Some(vm) = completion {
                        CompletionPanel { vm, on_intent: dispatch }
                    }
                },
            }
        }
    }
}

/// Picks arriving while no question is shown are dropped; anything else
/// rejected is logged.
fn apply_select(controller: &mut QuizController, index: usize) -> Option<SelectOutcome> {
    match controller.select_answer(index) {
        Ok(outcome) => Some(outcome),
        Err(QuizError::NotReady) => None,
        Err(err) => {
            warn!(index, %err, "answer selection rejected");
            None
        }
    }
}

#[component]
fn QuestionPanel(vm: QuestionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-question",
            div { class: "quiz-question__meta",
                span { class: "quiz-progress", "{vm.progress_label}" }
                span { class: "quiz-score", "{vm.score_label}" }
            }
            p { class: "quiz-question__category", "{vm.meta_label}" }
            h3 { class: "quiz-question__text", "{vm.text}" }
            div { class: "quiz-answers",
                for answer in vm.answers.clone() {
                    AnswerButton { key: "{answer.index}", answer: answer.clone(), on_intent }
                }
            }
            if let Some(feedback) = vm.feedback {
                p { class: "quiz-feedback", "{feedback}" }
            }
            if vm.can_advance {
                button {
                    class: "btn btn-primary",
                    id: "quiz-next",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "Next question"
                }
            }
        }
    }
}

#[component]
fn AnswerButton(answer: AnswerButtonVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let index = answer.index;
    let locked = answer.state != AnswerState::Open;
    rsx! {
        button {
            class: "{answer.state.class()}",
            id: "quiz-answer-{index}",
            r#type: "button",
            disabled: locked,
            onclick: move |_| on_intent.call(QuizIntent::Select(index)),
            if let Some(key) = answer.shortcut {
                span { class: "answer__key", "{key}" }
            }
            span { class: "answer__label", "{answer.label}" }
        }
    }
}

#[component]
fn CompletionPanel(vm: CompletionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let navigator = use_navigator();
    rsx! {
        div { class: "quiz-complete",
            h3 { class: "quiz-complete__score", "{vm.score_label}" }
            p { class: "quiz-complete__verdict", "{vm.verdict}" }
            ol { class: "quiz-review",
                for (position, entry) in vm.review.iter().enumerate() {
                    li { key: "{position}", class: entry.class,
                        p { class: "quiz-review__question", "{entry.question}" }
                        if let Some(chosen) = &entry.chosen_label {
                            p { class: "quiz-review__chosen", "{chosen}" }
                        }
                        p { class: "quiz-review__answer", "{entry.answer_label}" }
                    }
                }
            }
            div { class: "quiz-complete__actions",
                button {
                    class: "btn btn-primary",
                    id: "quiz-play-again",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::PlayAgain),
                    "Play again"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Home {});
                    },
                    "Change settings"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    controller: Rc<RefCell<Option<Signal<QuizController>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, controller: Signal<QuizController>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.controller.borrow_mut() = Some(controller);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn controller(&self) -> Signal<QuizController> {
        (*self.controller.borrow()).expect("quiz controller registered")
    }
}
