//! Delegated sign-in.
//!
//! An `IdentityClient` performs the provider flow and owns the current
//! `Session`. The rest of the app only reads it through `AuthService`.

mod firebase;
mod local;

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use quiz_core::model::{AuthProvider, Session};

use crate::error::IdentityError;

pub use firebase::{
    CredentialPopup, FirebaseConfig, FirebaseIdentityClient, IdpCredential, StaticCredentialPopup,
};
pub use local::{LocalIdentityClient, LocalProfile};

#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Run the popup sign-in flow for `provider` and remember the session.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` when the popup is dismissed or the provider
    /// rejects the credential. The current session is left untouched.
    async fn sign_in_with_popup(&self, provider: AuthProvider) -> Result<Session, IdentityError>;

    /// Forget the current session.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the provider could not be reached.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Session held right now, read at call time.
    fn current_session(&self) -> Option<Session>;
}

/// Shared slot holding the signed-in session, if any.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, session: Session) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn clear(&self) -> Option<Session> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
