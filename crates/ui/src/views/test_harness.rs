use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{FixtureSource, QuestionSource, QuizLoopService, TransportError, TriviaError};
use trivia_core::model::{Category, Question, QuestionQuery};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{HomeView, QuizView};

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
    fixture_mode: bool,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn fixture_mode(&self) -> bool {
        self.fixture_mode
    }
}

/// Source whose every call fails like an unreachable host.
pub struct OfflineSource;

#[async_trait]
impl QuestionSource for OfflineSource {
    async fn fetch_questions(&self, _query: &QuestionQuery) -> Result<Vec<Question>, TriviaError> {
        Err(TransportError::Connection("offline".to_string()).into())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, TriviaError> {
        Err(TransportError::Connection("offline".to_string()).into())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.quiz_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! {
            QuizView {
                category: String::new(),
                difficulty: String::new(),
                kind: String::new(),
            }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, source: Arc<dyn QuestionSource>) -> ViewHarness {
    let quiz_loop = Arc::new(
        QuizLoopService::new(source).with_default_query(QuestionQuery::default()),
    );
    let app = Arc::new(TestApp {
        quiz_loop,
        fixture_mode: true,
    });
    let quiz_handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness { dom, quiz_handles }
}

pub fn setup_fixture_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness(view, Arc::new(FixtureSource::new()))
}
