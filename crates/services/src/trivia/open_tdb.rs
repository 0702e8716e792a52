use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{BatchRequest, RawQuestion, TriviaSource};
use crate::error::{ConfigError, TriviaError};

pub const DEFAULT_TRIVIA_URL: &str = "https://opentdb.com/api.php";

#[derive(Clone, Debug)]
pub struct OpenTdbConfig {
    pub endpoint: Url,
}

impl OpenTdbConfig {
    /// Parse an endpoint url.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` when `raw` is not an absolute url.
    pub fn from_url(raw: &str) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
            raw: raw.to_string(),
            source,
        })?;
        Ok(Self { endpoint })
    }

    /// Read `QUIZ_TRIVIA_URL`, falling back to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` when the variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("QUIZ_TRIVIA_URL") {
            Ok(raw) if !raw.trim().is_empty() => Self::from_url(&raw),
            _ => Self::from_url(DEFAULT_TRIVIA_URL),
        }
    }

    #[must_use]
    pub fn request_url(&self, request: BatchRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("amount", &request.amount.to_string())
            .append_pair("type", "multiple");
        url
    }
}

/// HTTP client for the Open Trivia Database API.
#[derive(Clone)]
pub struct OpenTdbClient {
    client: Client,
    config: OpenTdbConfig,
}

impl OpenTdbClient {
    #[must_use]
    pub fn new(config: OpenTdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TriviaSource for OpenTdbClient {
    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<RawQuestion>, TriviaError> {
        let url = self.config.request_url(request);
        tracing::debug!(%url, "requesting trivia batch");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TriviaError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        decode_batch(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OpenTdbResponse {
    #[serde(default)]
    response_code: u8,
    results: Vec<RawQuestion>,
}

/// Decode a response body into raw questions.
///
/// A missing `response_code` is treated as success; any other non-zero code
/// (no results, invalid parameter, rate limited) is an error.
pub(crate) fn decode_batch(body: &str) -> Result<Vec<RawQuestion>, TriviaError> {
    let parsed: OpenTdbResponse =
        serde_json::from_str(body).map_err(|err| TriviaError::Decode(err.to_string()))?;
    if parsed.response_code != 0 {
        return Err(TriviaError::Api(parsed.response_code));
    }
    Ok(parsed.results)
}
