use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::Clock;
use quiz_core::model::{AuthProvider, Session};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{IdentityClient, SessionStore};
use crate::error::{ConfigError, IdentityError};

pub const DEFAULT_FIREBASE_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1/";

/// Credential returned by the provider popup, to be exchanged for a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdpCredential {
    IdToken(String),
    AccessToken(String),
}

impl IdpCredential {
    fn post_body(&self, provider: AuthProvider) -> String {
        let (key, value) = match self {
            IdpCredential::IdToken(token) => ("id_token", token),
            IdpCredential::AccessToken(token) => ("access_token", token),
        };
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .append_pair("providerId", provider.provider_id())
            .finish()
    }
}

/// The interactive half of a popup sign-in: obtains a provider credential.
#[async_trait]
pub trait CredentialPopup: Send + Sync {
    /// # Errors
    ///
    /// Returns `IdentityError::PopupClosed` when the user dismisses the popup.
    async fn authorize(&self, provider: AuthProvider) -> Result<IdpCredential, IdentityError>;
}

/// Popup stand-in that hands out a credential obtained outside the app.
#[derive(Clone, Debug, Default)]
pub struct StaticCredentialPopup {
    credential: Option<IdpCredential>,
}

impl StaticCredentialPopup {
    #[must_use]
    pub fn new(credential: Option<IdpCredential>) -> Self {
        Self { credential }
    }

    /// Read `QUIZ_IDP_ID_TOKEN`. Without it every sign-in counts as dismissed.
    #[must_use]
    pub fn from_env() -> Self {
        let credential = env::var("QUIZ_IDP_ID_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(IdpCredential::IdToken);
        Self { credential }
    }
}

#[async_trait]
impl CredentialPopup for StaticCredentialPopup {
    async fn authorize(&self, _provider: AuthProvider) -> Result<IdpCredential, IdentityError> {
        self.credential.clone().ok_or(IdentityError::PopupClosed)
    }
}

#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub endpoint: Url,
    pub request_uri: String,
}

impl FirebaseConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for an empty api key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing("QUIZ_FIREBASE_API_KEY"));
        }
        let endpoint = parse_url(DEFAULT_FIREBASE_AUTH_URL)?;
        Ok(Self {
            api_key,
            endpoint,
            request_uri: "http://localhost".to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` for a malformed endpoint.
    pub fn with_endpoint(mut self, raw: &str) -> Result<Self, ConfigError> {
        let mut endpoint = parse_url(raw)?;
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        self.endpoint = endpoint;
        Ok(self)
    }

    /// Read `QUIZ_FIREBASE_API_KEY` and the optional `QUIZ_FIREBASE_AUTH_URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the key is missing or the url is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("QUIZ_FIREBASE_API_KEY")
            .map_err(|_| ConfigError::Missing("QUIZ_FIREBASE_API_KEY"))?;
        let config = Self::new(api_key)?;
        match env::var("QUIZ_FIREBASE_AUTH_URL") {
            Ok(raw) if !raw.trim().is_empty() => config.with_endpoint(&raw),
            _ => Ok(config),
        }
    }

    fn sign_in_url(&self) -> Result<Url, IdentityError> {
        let mut url = self
            .endpoint
            .join("./accounts:signInWithIdp")
            .map_err(|_| IdentityError::NotConfigured("firebase endpoint"))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        raw: raw.to_string(),
        source,
    })
}

/// Exchanges popup credentials at the Firebase Identity Toolkit REST api.
#[derive(Clone)]
pub struct FirebaseIdentityClient {
    client: Client,
    config: FirebaseConfig,
    popup: Arc<dyn CredentialPopup>,
    clock: Clock,
    store: SessionStore,
}

impl FirebaseIdentityClient {
    #[must_use]
    pub fn new(config: FirebaseConfig, popup: Arc<dyn CredentialPopup>, clock: Clock) -> Self {
        Self {
            client: Client::new(),
            config,
            popup,
            clock,
            store: SessionStore::new(),
        }
    }
}

#[async_trait]
impl IdentityClient for FirebaseIdentityClient {
    async fn sign_in_with_popup(&self, provider: AuthProvider) -> Result<Session, IdentityError> {
        let credential = self.popup.authorize(provider).await?;
        let payload = SignInWithIdpRequest {
            post_body: credential.post_body(provider),
            request_uri: self.config.request_uri.clone(),
            return_secure_token: true,
            return_idp_credential: true,
        };

        let response = self
            .client
            .post(self.config.sign_in_url()?)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(provider_error(&body).unwrap_or(IdentityError::HttpStatus(status)));
        }

        let parsed: SignInWithIdpResponse = serde_json::from_str(&body)
            .map_err(|err| IdentityError::Provider(format!("unreadable response: {err}")))?;
        let session = parsed.into_session(provider, &self.clock);
        self.store.set(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        // Firebase sessions are client-held tokens; dropping them is the sign-out.
        self.store.clear();
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.store.get()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest {
    post_body: String,
    request_uri: String,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    full_name: Option<String>,
}

impl SignInWithIdpResponse {
    fn into_session(self, provider: AuthProvider, clock: &Clock) -> Session {
        Session::new(
            self.local_id,
            self.display_name.or(self.full_name),
            self.email,
            provider,
            clock.now(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn provider_error(body: &str) -> Option<IdentityError> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| IdentityError::Provider(envelope.error.message))
}
