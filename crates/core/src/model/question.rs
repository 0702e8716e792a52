use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while assembling a question from its parts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question has no answers")]
    NoAnswers,
    #[error("question must have exactly one correct answer, found {0}")]
    CorrectAnswerCount(usize),
}

//
// ─── ANSWER ───────────────────────────────────────────────────────────────────
//

/// A single selectable option of a multiple-choice question.
///
/// The text is kept exactly as delivered by the trivia source, which may
/// include HTML entities. Rendering is responsible for sanitizing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    text: String,
    is_correct: bool,
}

impl Answer {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn correct(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    #[must_use]
    pub fn incorrect(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with exactly one correct answer.
///
/// Answer order is fixed at construction; callers shuffle before building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    answers: Vec<Answer>,
}

impl Question {
    /// Build a question from an already ordered list of answers.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoAnswers` for an empty list and
    /// `QuestionError::CorrectAnswerCount` unless exactly one answer is correct.
    pub fn new(prompt: impl Into<String>, answers: Vec<Answer>) -> Result<Self, QuestionError> {
        if answers.is_empty() {
            return Err(QuestionError::NoAnswers);
        }
        let correct = answers.iter().filter(|answer| answer.is_correct()).count();
        if correct != 1 {
            return Err(QuestionError::CorrectAnswerCount(correct));
        }
        Ok(Self {
            prompt: prompt.into(),
            answers,
        })
    }

    /// Question text as delivered by the source. May contain markup.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index)
    }

    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Position of the correct answer in the current order.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        // Construction guarantees exactly one correct answer.
        self.answers
            .iter()
            .position(Answer::is_correct)
            .unwrap_or_default()
    }
}
