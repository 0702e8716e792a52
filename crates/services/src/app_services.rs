use std::sync::Arc;

use quiz_core::Clock;

use crate::auth_service::AuthService;
use crate::config::{AppConfig, IdentityBackend};
use crate::error::ConfigError;
use crate::identity::{
    FirebaseConfig, FirebaseIdentityClient, IdentityClient, LocalIdentityClient,
    StaticCredentialPopup,
};
use crate::quiz_service::QuizService;
use crate::trivia::{OpenTdbClient, TriviaSource};

/// Assembles the app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services talking to the configured remote endpoints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the selected identity backend lacks its
    /// settings.
    pub fn new(config: &AppConfig, clock: Clock) -> Result<Self, ConfigError> {
        let identity: Arc<dyn IdentityClient> = match config.identity {
            IdentityBackend::Local => Arc::new(LocalIdentityClient::from_env(clock)),
            IdentityBackend::Firebase => Arc::new(FirebaseIdentityClient::new(
                FirebaseConfig::from_env()?,
                Arc::new(StaticCredentialPopup::from_env()),
                clock,
            )),
        };
        let trivia: Arc<dyn TriviaSource> = Arc::new(OpenTdbClient::new(config.trivia.clone()));
        Ok(Self::from_parts(identity, trivia, config.batch_size))
    }

    #[must_use]
    pub fn from_parts(
        identity: Arc<dyn IdentityClient>,
        trivia: Arc<dyn TriviaSource>,
        batch_size: u8,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(identity)),
            quiz: Arc::new(QuizService::new(trivia).with_batch_size(batch_size)),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
