use std::env;

use async_trait::async_trait;
use quiz_core::Clock;
use quiz_core::model::{AuthProvider, Session};
use uuid::Uuid;

use super::{IdentityClient, SessionStore};
use crate::error::IdentityError;

/// Profile handed out by `LocalIdentityClient`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalProfile {
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl LocalProfile {
    /// Read `QUIZ_DISPLAY_NAME` and `QUIZ_EMAIL`; unset values stay absent.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            display_name: env::var("QUIZ_DISPLAY_NAME").ok(),
            email: env::var("QUIZ_EMAIL").ok(),
        }
    }
}

/// Identity client that signs in a configured local profile without a
/// remote provider. Useful for development and tests.
#[derive(Clone)]
pub struct LocalIdentityClient {
    clock: Clock,
    profile: LocalProfile,
    store: SessionStore,
}

impl LocalIdentityClient {
    #[must_use]
    pub fn new(clock: Clock, profile: LocalProfile) -> Self {
        Self {
            clock,
            profile,
            store: SessionStore::new(),
        }
    }

    #[must_use]
    pub fn from_env(clock: Clock) -> Self {
        Self::new(clock, LocalProfile::from_env())
    }
}

#[async_trait]
impl IdentityClient for LocalIdentityClient {
    async fn sign_in_with_popup(&self, provider: AuthProvider) -> Result<Session, IdentityError> {
        let session = Session::new(
            Uuid::new_v4().to_string(),
            self.profile.display_name.clone(),
            self.profile.email.clone(),
            provider,
            self.clock.now(),
        );
        self.store.set(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.store.clear();
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.store.get()
    }
}
