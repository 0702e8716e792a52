use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{AuthProvider, Session};
use quiz_core::time::fixed_clock;
use services::trivia::BatchRequest;
use services::{
    AppServices, AuthService, IdentityClient, IdentityError, LocalIdentityClient, LocalProfile,
    QuizService, RawQuestion, StaticTriviaSource, TriviaError, TriviaSource,
};
use tokio::sync::Notify;

use crate::context::{UiApp, build_app_context};
use crate::routes::Route;
use crate::views::landing::LandingTestHandles;
use crate::views::quiz::QuizTestHandles;
use crate::views::{LandingView, QuizView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }
}

// ─── FAKES ──────────────────────────────────────────────────────────────────

/// Local identity that can be made to fail or to wait for a release.
pub struct TestIdentity {
    inner: LocalIdentityClient,
    gate: Option<Arc<Notify>>,
    failing: bool,
    sign_ins: AtomicUsize,
}

impl TestIdentity {
    pub fn new(profile: LocalProfile) -> Self {
        Self {
            inner: LocalIdentityClient::new(fixed_clock(), profile),
            gate: None,
            failing: false,
            sign_ins: AtomicUsize::new(0),
        }
    }

    pub fn failing(profile: LocalProfile) -> Self {
        Self {
            failing: true,
            ..Self::new(profile)
        }
    }

    pub fn gated(profile: LocalProfile, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(profile)
        }
    }

    pub fn sign_in_count(&self) -> usize {
        self.sign_ins.load(Ordering::Acquire)
    }
}

#[async_trait]
impl IdentityClient for TestIdentity {
    async fn sign_in_with_popup(&self, provider: AuthProvider) -> Result<Session, IdentityError> {
        self.sign_ins.fetch_add(1, Ordering::AcqRel);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.failing {
            return Err(IdentityError::PopupClosed);
        }
        self.inner.sign_in_with_popup(provider).await
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.inner.sign_out().await
    }

    fn current_session(&self) -> Option<Session> {
        self.inner.current_session()
    }
}

/// Holds every fetch open until `release` is called.
pub struct GatedTriviaSource {
    inner: StaticTriviaSource,
    gate: Notify,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl GatedTriviaSource {
    pub fn new(inner: StaticTriviaSource) -> Self {
        Self {
            inner,
            gate: Notify::new(),
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::Acquire)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl TriviaSource for GatedTriviaSource {
    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<RawQuestion>, TriviaError> {
        self.started.fetch_add(1, Ordering::AcqRel);
        self.gate.notified().await;
        let result = self.inner.fetch_batch(request).await;
        self.completed.fetch_add(1, Ordering::AcqRel);
        result
    }
}

// ─── HARNESS ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Quiz,
    /// The real app router, starting on the landing route.
    App,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    landing_handles: LandingTestHandles,
    quiz_handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.landing_handles.clone());
    use_context_provider(|| props.quiz_handles.clone());
    match props.view {
        ViewKind::App => rsx! { Router::<Route> {} },
        ViewKind::Landing | ViewKind::Quiz => rsx! { Router::<TestRoute> {} },
    }
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
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Landing | ViewKind::App => rsx! { LandingView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub trivia: StaticTriviaSource,
    pub identity: Arc<TestIdentity>,
    pub landing_handles: LandingTestHandles,
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

    /// Several async turns: enough for a spawned call, a route change and
    /// the fetch of the screen it lands on.
    pub async fn drive_many(&mut self, turns: usize) {
        for _ in 0..turns {
            self.drive_async().await;
        }
    }

    pub fn settle(&mut self) {
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn click_sign_in(&mut self) {
        let sign_in = self.landing_handles.sign_in();
        self.dom.in_runtime(|| sign_in.call(()));
        self.settle();
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_batch(count: usize) -> Vec<RawQuestion> {
    (0..count)
        .map(|n| {
            RawQuestion::new(
                format!("Question &quot;{n}&quot;"),
                format!("right {n}"),
                [format!("wrong {n}a"), format!("wrong {n}b"), format!("wrong {n}c")],
            )
        })
        .collect()
}

pub fn ada_profile() -> LocalProfile {
    LocalProfile {
        display_name: Some("Ada".to_string()),
        email: Some("ada@example.com".to_string()),
    }
}

pub fn setup_view_harness(
    view: ViewKind,
    trivia: StaticTriviaSource,
    profile: LocalProfile,
) -> ViewHarness {
    let source: Arc<dyn TriviaSource> = Arc::new(trivia.clone());
    setup_view_harness_with(view, trivia, source, Arc::new(TestIdentity::new(profile)))
}

pub fn setup_view_harness_with(
    view: ViewKind,
    trivia: StaticTriviaSource,
    source: Arc<dyn TriviaSource>,
    identity: Arc<TestIdentity>,
) -> ViewHarness {
    let identity_client: Arc<dyn IdentityClient> = identity.clone();
    let services = AppServices::from_parts(identity_client, source, 10);
    let landing_handles = LandingTestHandles::default();
    let quiz_handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            landing_handles: landing_handles.clone(),
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        trivia,
        identity,
        landing_handles,
        quiz_handles,
    }
}
