use std::sync::Arc;

use quiz_core::model::{AuthProvider, Session};

use crate::error::IdentityError;
use crate::identity::IdentityClient;

/// App-facing wrapper around the injected identity client.
#[derive(Clone)]
pub struct AuthService {
    client: Arc<dyn IdentityClient>,
}

impl AuthService {
    #[must_use]
    pub fn new(client: Arc<dyn IdentityClient>) -> Self {
        Self { client }
    }

    /// Sign in through the provider popup.
    ///
    /// # Errors
    ///
    /// Returns the client's `IdentityError`; the failure is logged here so
    /// callers can simply stay where they are.
    pub async fn sign_in(&self, provider: AuthProvider) -> Result<Session, IdentityError> {
        match self.client.sign_in_with_popup(provider).await {
            Ok(session) => {
                tracing::info!(provider = provider.label(), uid = session.uid(), "signed in");
                Ok(session)
            }
            Err(err) => {
                tracing::error!(provider = provider.label(), error = %err, "error signing in");
                Err(err)
            }
        }
    }

    /// # Errors
    ///
    /// Returns the client's `IdentityError`, logged at warn level.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        self.client.sign_out().await.inspect_err(|err| {
            tracing::warn!(error = %err, "error signing out");
        })
    }

    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.client.current_session()
    }
}
