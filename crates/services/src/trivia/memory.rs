use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use super::{BatchRequest, RawQuestion, TriviaSource};
use crate::error::TriviaError;

/// In-memory trivia source for tests and prototyping.
///
/// Serves a fixed batch (truncated to the requested amount) or fails every
/// request while `failing` is set.
#[derive(Clone, Default)]
pub struct StaticTriviaSource {
    batch: Arc<Mutex<Vec<RawQuestion>>>,
    failing: Arc<Mutex<Option<String>>>,
    requests: Arc<AtomicUsize>,
}

impl StaticTriviaSource {
    #[must_use]
    pub fn new(batch: Vec<RawQuestion>) -> Self {
        Self {
            batch: Arc::new(Mutex::new(batch)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        let source = Self::default();
        source.set_failure(Some(message.into()));
        source
    }

    pub fn set_failure(&self, message: Option<String>) {
        let mut guard = self
            .failing
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = message;
    }

    pub fn set_batch(&self, batch: Vec<RawQuestion>) {
        let mut guard = self
            .batch
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = batch;
    }

    /// Number of `fetch_batch` calls served so far, failed ones included.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Acquire)
    }
}

#[async_trait]
impl TriviaSource for StaticTriviaSource {
    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<RawQuestion>, TriviaError> {
        self.requests.fetch_add(1, Ordering::AcqRel);

        let failure = self
            .failing
            .lock()
            .map_err(|e| TriviaError::Unavailable(e.to_string()))?
            .clone();
        if let Some(message) = failure {
            return Err(TriviaError::Unavailable(message));
        }

        let guard = self
            .batch
            .lock()
            .map_err(|e| TriviaError::Unavailable(e.to_string()))?;
        Ok(guard
            .iter()
            .take(usize::from(request.amount))
            .cloned()
            .collect())
    }
}
