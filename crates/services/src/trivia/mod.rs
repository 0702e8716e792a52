//! Remote trivia questions.
//!
//! A `TriviaSource` returns raw items exactly as the remote service shaped
//! them. Tagging and shuffling answers happens in `QuizService`.

mod memory;
mod open_tdb;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::TriviaError;

pub use memory::StaticTriviaSource;
pub use open_tdb::{DEFAULT_TRIVIA_URL, OpenTdbClient, OpenTdbConfig};

/// Number of questions fetched per quiz attempt.
pub const BATCH_SIZE: u8 = 10;

/// Upper bound accepted by the remote service for a single request.
pub const MAX_BATCH_SIZE: u8 = 50;

/// Parameters of one batch request. Questions are always multiple choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    pub amount: u8,
}

impl Default for BatchRequest {
    fn default() -> Self {
        Self { amount: BATCH_SIZE }
    }
}

/// One item of the remote response, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl RawQuestion {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            question: question.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers: incorrect_answers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Contract for anything that can hand out a batch of trivia questions.
#[async_trait]
pub trait TriviaSource: Send + Sync {
    /// Fetch one batch.
    ///
    /// # Errors
    ///
    /// Returns `TriviaError` on transport failure or malformed data.
    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<RawQuestion>, TriviaError>;
}
