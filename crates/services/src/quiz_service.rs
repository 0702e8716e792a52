use std::sync::Arc;

use quiz_core::model::{Answer, Question};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::QuizLoadError;
use crate::trivia::{BATCH_SIZE, BatchRequest, RawQuestion, TriviaSource};

/// Loads quiz batches and turns raw trivia items into shuffled questions.
#[derive(Clone)]
pub struct QuizService {
    source: Arc<dyn TriviaSource>,
    batch_size: u8,
}

impl QuizService {
    #[must_use]
    pub fn new(source: Arc<dyn TriviaSource>) -> Self {
        Self {
            source,
            batch_size: BATCH_SIZE,
        }
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: u8) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Fetch one batch of multiple-choice questions with shuffled answers.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoadError::Trivia` when the source fails and
    /// `QuizLoadError::Question` when an item cannot form a valid question.
    pub async fn load_batch(&self) -> Result<Vec<Question>, QuizLoadError> {
        let request = BatchRequest {
            amount: self.batch_size,
        };
        let raw = self.source.fetch_batch(request).await?;

        let mut rng = rand::rng();
        let questions = build_questions(raw, &mut rng)?;
        tracing::info!(count = questions.len(), "loaded quiz batch");
        Ok(questions)
    }
}

/// Tag and shuffle every item of a batch, keeping batch order.
///
/// # Errors
///
/// Returns `QuizLoadError::Question` naming the first invalid item.
pub fn build_questions<R: Rng + ?Sized>(
    raw: Vec<RawQuestion>,
    rng: &mut R,
) -> Result<Vec<Question>, QuizLoadError> {
    raw.into_iter()
        .enumerate()
        .map(|(position, item)| {
            build_question(item, rng)
                .map_err(|source| QuizLoadError::Question { position, source })
        })
        .collect()
}

/// Tag incorrect answers `false`, the correct one `true`, then shuffle them
/// into a uniform random permutation.
///
/// # Errors
///
/// Returns `QuestionError` if the item does not yield exactly one correct
/// answer (for instance when the correct answer is repeated as incorrect).
pub fn build_question<R: Rng + ?Sized>(
    raw: RawQuestion,
    rng: &mut R,
) -> Result<Question, quiz_core::model::QuestionError> {
    let mut answers: Vec<Answer> = raw
        .incorrect_answers
        .into_iter()
        .map(Answer::incorrect)
        .collect();
    answers.push(Answer::correct(raw.correct_answer));
    answers.shuffle(rng);
    Question::new(raw.question, answers)
}
