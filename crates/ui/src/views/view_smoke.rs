use std::sync::Arc;
use dioxus::prelude::ReadableExt;

use quiz_core::QuizPhase;
use quiz_core::model::AuthProvider;
use services::{IdentityClient, LocalProfile, StaticTriviaSource};
use tokio::sync::Notify;

use super::test_harness::{
    GatedTriviaSource, TestIdentity, ViewHarness, ViewKind, ada_profile, sample_batch,
    setup_view_harness, setup_view_harness_with,
};
use crate::vm::QuizIntent;

async fn loaded_quiz(trivia: StaticTriviaSource, profile: LocalProfile) -> ViewHarness {
    let mut harness = setup_view_harness(ViewKind::Quiz, trivia, profile);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    harness
}

fn dispatch(harness: &mut ViewHarness, intent: QuizIntent) {
    let handles = harness.quiz_handles.clone();
    harness.dom.in_runtime(|| handles.dispatch().call(intent));
    harness.settle();
}

fn correct_index(harness: &ViewHarness) -> usize {
    let handles = harness.quiz_handles.clone();
    harness.dom.in_runtime(|| {
        handles
            .vm()
            .read()
            .state()
            .current_question()
            .expect("question presented")
            .correct_index()
    })
}

fn phase(harness: &ViewHarness) -> QuizPhase {
    let handles = harness.quiz_handles.clone();
    harness.dom.in_runtime(|| handles.vm().read().phase())
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_renders_call_to_action() {
    let mut harness = setup_view_harness(
        ViewKind::Landing,
        StaticTriviaSource::new(sample_batch(10)),
        ada_profile(),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Quiz App"), "missing title in {html}");
    assert!(html.contains("Login With Google"), "missing sign-in in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_loading_before_fetch_resolves() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz,
        StaticTriviaSource::new(sample_batch(10)),
        ada_profile(),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Loading quiz questions, please wait..."),
        "missing loading text in {html}"
    );
    assert!(!html.contains("Question 1/"), "question rendered early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question_and_identity() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz,
        StaticTriviaSource::new(sample_batch(10)),
        ada_profile(),
    );
    harness
        .identity
        .sign_in_with_popup(AuthProvider::Google)
        .await
        .expect("local sign-in");
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Signed in as Ada"), "missing identity in {html}");
    assert!(html.contains("ada@example.com"), "missing email in {html}");
    assert!(html.contains("Question 1/10"), "missing progress in {html}");
    assert!(html.contains("Question \"0\""), "missing sanitized prompt in {html}");
    assert!(html.contains("right 0"), "missing answer in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
    assert!(html.contains("Sign Out"), "missing sign-out in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_absent_identity_without_session() {
    let harness = loaded_quiz(StaticTriviaSource::new(sample_batch(10)), ada_profile()).await;
    let html = harness.render();
    assert!(html.contains("Not signed in"), "missing absent identity in {html}");
    assert!(!html.contains("ada@example.com"), "unexpected email in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_plays_to_results_and_restarts_without_refetch() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz,
        StaticTriviaSource::new(sample_batch(10)),
        ada_profile(),
    );
    harness
        .identity
        .sign_in_with_popup(AuthProvider::Google)
        .await
        .expect("local sign-in");
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    assert_eq!(phase(&harness), QuizPhase::Presenting(0));

    let first = correct_index(&harness);
    dispatch(&mut harness, QuizIntent::SelectAnswer(first));
    for _ in 1..10 {
        let wrong = (correct_index(&harness) + 1) % 4;
        dispatch(&mut harness, QuizIntent::SelectAnswer(wrong));
    }

    assert_eq!(phase(&harness), QuizPhase::Results);
    let html = harness.render();
    assert!(html.contains("Quiz Completed Successfully!"), "missing banner in {html}");
    assert!(
        html.contains("ada@example.com scored 1 out of 10"),
        "missing score line in {html}"
    );
    assert!(html.contains("Try Again"), "missing restart in {html}");

    dispatch(&mut harness, QuizIntent::Restart);
    let html = harness.render();
    assert!(html.contains("Question 1/10"), "restart did not rewind in {html}");
    assert!(html.contains("Score: 0"), "restart did not reset score in {html}");
    assert_eq!(harness.trivia.request_count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_retry_after_failed_fetch() {
    let trivia = StaticTriviaSource::failing("network down");
    let mut harness = loaded_quiz(trivia.clone(), ada_profile()).await;

    assert_eq!(phase(&harness), QuizPhase::LoadFailed);
    let html = harness.render();
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(!html.contains("Question 1/"), "unexpected question in {html}");

    trivia.set_failure(None);
    trivia.set_batch(sample_batch(3));
    dispatch(&mut harness, QuizIntent::Retry);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Question 1/3"), "retry did not load in {html}");
    assert_eq!(trivia.request_count(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_empty_message() {
    let harness = loaded_quiz(StaticTriviaSource::new(Vec::new()), ada_profile()).await;
    let html = harness.render();
    assert!(html.contains("No questions available."), "missing empty text in {html}");
}

// ─── LANDING ────────────────────────────────────────────────────────────────

fn app_harness(identity: TestIdentity) -> ViewHarness {
    let trivia = StaticTriviaSource::new(sample_batch(10));
    let source = Arc::new(trivia.clone());
    setup_view_harness_with(ViewKind::App, trivia, source, Arc::new(identity))
}

#[tokio::test(flavor = "current_thread")]
async fn landing_sign_in_success_navigates_to_quiz() {
    let mut harness = app_harness(TestIdentity::new(ada_profile()));
    harness.rebuild();
    assert!(harness.render().contains("Login With Google"));

    harness.click_sign_in();
    harness.drive_many(4).await;

    let html = harness.render();
    assert!(html.contains("Question 1/10"), "quiz not shown in {html}");
    assert!(html.contains("Signed in as Ada"), "missing identity in {html}");
    assert!(!html.contains("Login With Google"), "still on landing in {html}");
    assert_eq!(harness.identity.sign_in_count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn landing_sign_in_failure_stays_and_shows_error() {
    let mut harness = app_harness(TestIdentity::failing(ada_profile()));
    harness.rebuild();

    harness.click_sign_in();
    harness.drive_many(3).await;

    let html = harness.render();
    assert!(html.contains("Login With Google"), "left landing in {html}");
    assert!(
        html.contains("Sign-in did not complete. Please try again."),
        "missing error in {html}"
    );
    assert!(!html.contains("Loading quiz questions"), "navigated in {html}");
    assert!(harness.identity.current_session().is_none());
    assert_eq!(harness.trivia.request_count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn landing_ignores_second_click_while_sign_in_pending() {
    let gate = Arc::new(Notify::new());
    let mut harness = app_harness(TestIdentity::gated(ada_profile(), gate.clone()));
    harness.rebuild();

    harness.click_sign_in();
    harness.click_sign_in();
    harness.drive_async().await;

    assert_eq!(harness.identity.sign_in_count(), 1);
    assert!(harness.render().contains("Login With Google"));

    gate.notify_one();
    harness.drive_many(4).await;

    let html = harness.render();
    assert!(html.contains("Question 1/10"), "quiz not shown in {html}");
    assert_eq!(harness.identity.sign_in_count(), 1);
}

// ─── SIGN-OUT AND UNMOUNT ───────────────────────────────────────────────────

#[tokio::test(flavor = "current_thread")]
async fn quiz_sign_out_clears_session_and_returns_to_landing() {
    let mut harness = app_harness(TestIdentity::new(ada_profile()));
    harness.rebuild();
    harness.click_sign_in();
    harness.drive_many(4).await;
    assert!(harness.identity.current_session().is_some());
    assert!(harness.render().contains("Question 1/10"));

    dispatch(&mut harness, QuizIntent::SignOut);
    harness.drive_many(3).await;

    assert!(harness.identity.current_session().is_none());
    let html = harness.render();
    assert!(html.contains("Login With Google"), "not back on landing in {html}");
    assert!(!html.contains("Question 1/"), "quiz still shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gated_fetch_resolves_once_released() {
    let trivia = StaticTriviaSource::new(sample_batch(10));
    let gated = Arc::new(GatedTriviaSource::new(trivia.clone()));
    let identity = Arc::new(TestIdentity::new(ada_profile()));
    let mut harness = setup_view_harness_with(ViewKind::Quiz, trivia, gated.clone(), identity);
    harness.rebuild();
    harness.drive_async().await;

    assert_eq!(gated.started(), 1);
    assert_eq!(phase(&harness), QuizPhase::Loading);

    gated.release();
    harness.drive_many(2).await;
    assert_eq!(gated.completed(), 1);
    assert_eq!(phase(&harness), QuizPhase::Presenting(0));
}

#[tokio::test(flavor = "current_thread")]
async fn unmounting_quiz_before_fetch_resolves_drops_the_load() {
    let trivia = StaticTriviaSource::new(sample_batch(10));
    let gated = Arc::new(GatedTriviaSource::new(trivia.clone()));
    let identity = Arc::new(TestIdentity::new(ada_profile()));
    let mut harness = setup_view_harness_with(ViewKind::Quiz, trivia, gated.clone(), identity);
    harness.rebuild();
    harness.drive_async().await;
    assert_eq!(gated.started(), 1);
    assert!(harness.render().contains("Loading quiz questions, please wait..."));

    drop(harness);
    gated.release();
    tokio::task::yield_now().await;

    assert_eq!(gated.started(), 1);
    assert_eq!(gated.completed(), 0);
}
