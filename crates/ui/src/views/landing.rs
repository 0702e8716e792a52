use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::AuthProvider;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let pending = use_signal(|| false);
    let error = use_signal(|| None::<ViewError>);
    let provider_label = AuthProvider::Google.label();

    let on_sign_in = use_callback(move |()| {
        let mut pending = pending;
        let mut error = error;
        // One popup at a time.
        if pending() {
            return;
        }
        pending.set(true);
        error.set(None);
        let auth = auth.clone();
        spawn(async move {
            let result = auth.sign_in(AuthProvider::Google).await;
            pending.set(false);
            // Failures are logged by the service; the user stays here.
            match result {
                Ok(_) => {
                    navigator.push(Route::Quiz {});
                }
                Err(_) => error.set(Some(ViewError::SignInFailed)),
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<LandingTestHandles>() {
                handles.register(on_sign_in);
            }
        }
    }

    rsx! {
        div { class: "landing",
            div { class: "landing-card",
                h1 { class: "landing-title", "Quiz App" }
                p { class: "landing-tagline",
                    "Ready to challenge your knowledge? Let's dive into the quiz!"
                }
                button {
                    class: "landing-cta",
                    id: "landing-sign-in",
                    r#type: "button",
                    disabled: pending(),
                    onclick: move |_| on_sign_in.call(()),
                    "Login With {provider_label} →"
                }
                if let Some(err) = error() {
                    p { class: "landing-error", {err.message()} }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LandingTestHandles {
    sign_in: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl LandingTestHandles {
    pub(crate) fn register(&self, sign_in: Callback<()>) {
        *self.sign_in.borrow_mut() = Some(sign_in);
    }

    pub(crate) fn sign_in(&self) -> Callback<()> {
        (*self.sign_in.borrow()).expect("landing sign-in registered")
    }
}
