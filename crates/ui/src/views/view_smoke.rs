use std::sync::Arc;

use dioxus::prelude::ReadableExt;

use services::QuizStatus;
use services::trivia::fixture_questions;

use super::test_harness::{
    OfflineSource, ViewHarness, ViewKind, drive_dom, setup_fixture_harness, setup_view_harness,
};
use crate::vm::QuizIntent;

async fn loaded(view: ViewKind) -> ViewHarness {
    let mut harness = setup_fixture_harness(view);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    harness
}

fn correct_index(harness: &ViewHarness) -> Option<usize> {
    let controller = harness.quiz_handles.controller();
    harness.dom.in_runtime(|| {
        controller
            .peek()
            .session()
            .and_then(|session| session.current_question().correct_index())
    })
}

fn status(harness: &ViewHarness) -> QuizStatus {
    let controller = harness.quiz_handles.controller();
    harness.dom.in_runtime(|| controller.peek().status())
}

fn dispatch(harness: &mut ViewHarness, intent: QuizIntent) {
    let callback = harness.quiz_handles.dispatch();
    harness.dom.in_runtime(|| callback.call(intent));
    drive_dom(&mut harness.dom);
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_categories() {
    let harness = loaded(ViewKind::Home).await;
    let html = harness.render();
    assert!(html.contains("Geography"), "missing category in {html}");
    assert!(html.contains("Any category"), "missing any option in {html}");
    assert!(html.contains("Start quiz"), "missing start in {html}");
    assert!(html.contains("10 questions per round"), "missing amount in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_category_error() {
    let mut harness = setup_view_harness(ViewKind::Home, Arc::new(OfflineSource));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Could not reach"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains("Start quiz"), "start should stay available in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let harness = loaded(ViewKind::Quiz).await;
    let html = harness.render();
    let total = fixture_questions().len();
    let progress = format!("Question 1 of {total}");
    assert!(html.contains(&progress), "missing {progress} in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
    assert!(!html.contains("Next question"), "next shown before answering in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Arc::new(OfflineSource));
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    assert_eq!(status(&harness), QuizStatus::Error);
    let html = harness.render();
    assert!(html.contains("Could not reach"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_plays_through_and_restarts() {
    let mut harness = loaded(ViewKind::Quiz).await;
    assert_eq!(status(&harness), QuizStatus::Ready);
    let total = fixture_questions().len();

    for position in 0..total {
        let correct = correct_index(&harness).expect("question loaded");
        dispatch(&mut harness, QuizIntent::Select(correct));
        if position + 1 < total {
            let html = harness.render();
            assert!(html.contains("Correct!"), "missing feedback in {html}");
            dispatch(&mut harness, QuizIntent::Next);
        }
    }

    assert_eq!(status(&harness), QuizStatus::Completed);
    let html = harness.render();
    let score = format!("You scored {total} / {total}");
    assert!(html.contains(&score), "missing {score} in {html}");
    assert!(html.contains("Play again"), "missing play again in {html}");

    dispatch(&mut harness, QuizIntent::PlayAgain);
    harness.drive_async().await;
    harness.drive_async().await;
    assert_eq!(status(&harness), QuizStatus::Ready);
    let html = harness.render();
    assert!(html.contains("Score: 0"), "score not reset in {html}");
}
