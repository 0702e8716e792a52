use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::QuizPhase;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{
    AnswerButtonVm, IdentityVm, QuestionCardVm, QuizIntent, QuizVm, ResultsVm,
    answer_index_for_key, load_questions, map_identity,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let quiz = ctx.quiz();

    // Read once per mount; the identity is static for the screen's lifetime.
    let identity = use_hook(|| map_identity(auth.current_session().as_ref()));
    let vm = use_signal(QuizVm::new);

    // Owned by this scope: dropping the screen drops the in-flight fetch, and
    // the ticket discards results from a superseded load.
    let resource = use_resource(move || {
        let quiz = quiz.clone();
        let mut vm = vm;
        async move {
            let ticket = vm.write().begin_load();
            let result = load_questions(&quiz).await;
            vm.write().apply_load(ticket, result);
        }
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut resource = resource;
        match intent {
            QuizIntent::SelectAnswer(index) => {
                vm.write().select_answer(index);
            }
            QuizIntent::Restart => {
                vm.write().restart();
            }
            QuizIntent::Retry => {
                if vm.read().phase() == QuizPhase::LoadFailed {
                    resource.restart();
                }
            }
            QuizIntent::SignOut => {
                let auth = auth.clone();
                spawn(async move {
                    // A failed sign-out is logged by the service; leave anyway.
                    let _ = auth.sign_out().await;
                    navigator.push(Route::Landing {});
                });
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let phase = vm.read().phase();
        match (phase, evt.data.key()) {
            (QuizPhase::Presenting(_), Key::Character(value)) => {
                let count = vm.read().answer_count();
                if let Some(index) = answer_index_for_key(&value, count) {
                    evt.prevent_default();
                    dispatch_intent.call(QuizIntent::SelectAnswer(index));
                }
            }
            (QuizPhase::Results, Key::Enter) => {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::Restart);
            }
            (QuizPhase::LoadFailed, Key::Character(value)) if value.eq_ignore_ascii_case("r") => {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::Retry);
            }
            _ => {}
        }
    });

    let (phase, card, results) = {
        let guard = vm.read();
        (guard.phase(), guard.question_card(), guard.results(&identity))
    };

    rsx! {
        div {
            class: "page quiz",
            tabindex: "0",
            onkeydown: move |evt| on_key.call(evt),
            match phase {
                QuizPhase::Loading => rsx! {
                    div { class: "quiz-loading",
                        div { class: "spinner" }
                        p { "Loading quiz questions, please wait..." }
                    }
                },
                QuizPhase::Empty => rsx! {
                    p { class: "quiz-empty", "No questions available." }
                    SignOutButton { on_intent: dispatch_intent }
                },
                QuizPhase::LoadFailed => rsx! {
                    div { class: "quiz-card quiz-failed",
                        p { {ViewError::LoadFailed.message()} }
                        button {
                            class: "quiz-button",
                            id: "quiz-retry",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(QuizIntent::Retry),
                            "Retry"
                        }
                    }
                    SignOutButton { on_intent: dispatch_intent }
                },
                QuizPhase::Presenting(_) => rsx! {
                    IdentityHeader { identity: identity.clone() }
                    if let Some(card) = card {
                        QuestionPanel { card, on_intent: dispatch_intent }
                    }
                    SignOutButton { on_intent: dispatch_intent }
                },
                QuizPhase::Results => rsx! {
                    div { class: "quiz-banner", "Quiz Completed Successfully!" }
                    IdentityHeader { identity: identity.clone() }
                    if let Some(results) = results {
                        ResultsPanel { results, on_intent: dispatch_intent }
                    }
                    SignOutButton { on_intent: dispatch_intent }
                },
            }
        }
    }
}

#[component]
fn IdentityHeader(identity: IdentityVm) -> Element {
    rsx! {
        header { class: "quiz-identity",
            div { class: "quiz-identity__name", "{identity.signed_in_label}" }
            if let Some(email) = identity.email {
                div { class: "quiz-identity__email", "{email}" }
            }
        }
    }
}

#[component]
fn QuestionPanel(card: QuestionCardVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "quiz-card",
            h2 { class: "quiz-card__heading", "{card.heading}" }
            p { class: "quiz-card__prompt", dangerous_inner_html: "{card.prompt_html}" }
            div { class: "quiz-card__answers",
                for (position, answer) in card.answers.into_iter().enumerate() {
                    AnswerButton { key: "{position}", answer, on_intent }
                }
            }
            div { class: "quiz-card__score", "{card.score_label}" }
        }
    }
}

#[component]
fn AnswerButton(answer: AnswerButtonVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let index = answer.index;
    rsx! {
        button {
            class: "quiz-button",
            id: "{answer.id}",
            r#type: "button",
            dangerous_inner_html: "{answer.label_html}",
            onclick: move |_| on_intent.call(QuizIntent::SelectAnswer(index)),
        }
    }
}

#[component]
fn ResultsPanel(results: ResultsVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "quiz-card quiz-results",
            h2 { class: "quiz-card__heading", "Results" }
            p { class: "quiz-results__score", "{results.score_line}" }
            button {
                class: "quiz-button",
                id: "quiz-restart",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Try Again"
            }
        }
    }
}

#[component]
fn SignOutButton(on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        button {
            class: "quiz-sign-out",
            id: "quiz-sign-out",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::SignOut),
            "Sign Out"
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<QuizVm>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<QuizVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<QuizVm> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
