//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionError;

/// Errors emitted by trivia sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriviaError {
    #[error("trivia request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia service answered with response code {0}")]
    Api(u8),
    #[error("trivia response could not be decoded: {0}")]
    Decode(String),
    #[error("trivia source unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while loading a quiz batch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoadError {
    #[error(transparent)]
    Trivia(#[from] TriviaError),
    #[error("malformed question at position {position}: {source}")]
    Question {
        position: usize,
        #[source]
        source: QuestionError,
    },
}

/// Errors emitted by identity clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("sign-in popup was closed before completing")]
    PopupClosed,
    #[error("identity provider is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("identity provider rejected the sign-in: {0}")]
    Provider(String),
    #[error("identity request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while reading configuration or assembling services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid trivia url {raw}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("batch size must be between 1 and {max}, got {raw}")]
    InvalidBatchSize { raw: String, max: u8 },
    #[error("unknown identity backend: {0}")]
    UnknownIdentity(String),
    #[error("missing required setting {0}")]
    Missing(&'static str),
}
