use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity providers the sign-in popup can be opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AuthProvider {
    Google,
}

impl AuthProvider {
    /// Provider id as understood by the identity service.
    #[must_use]
    pub fn provider_id(self) -> &'static str {
        match self {
            AuthProvider::Google => "google.com",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AuthProvider::Google => "Google",
        }
    }
}

/// The signed-in identity as exposed by the identity client.
///
/// Read-only to the rest of the application; created on sign-in and dropped
/// on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    uid: String,
    display_name: Option<String>,
    email: Option<String>,
    provider: AuthProvider,
    signed_in_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(
        uid: impl Into<String>,
        display_name: Option<String>,
        email: Option<String>,
        provider: AuthProvider,
        signed_in_at: DateTime<Utc>,
    ) -> Self {
        Self {
            uid: uid.into(),
            display_name: display_name.filter(|value| !value.trim().is_empty()),
            email: email.filter(|value| !value.trim().is_empty()),
            provider,
            signed_in_at,
        }
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    #[must_use]
    pub fn signed_in_at(&self) -> DateTime<Utc> {
        self.signed_in_at
    }
}
