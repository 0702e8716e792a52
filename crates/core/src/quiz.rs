//! Quiz progression for a single screen instance.
//!
//! `QuizState` starts in `Loading`, accepts exactly one batch of questions per
//! load ticket, then walks `Presenting(0..N)` until `Results`. Restart replays
//! the same questions with the same answer order.

use thiserror::Error;

use crate::model::Question;

/// Errors returned when an action does not fit the current phase.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuizError {
    #[error("no question is being presented")]
    NotPresenting,
    #[error("answer index {index} out of range for {count} answers")]
    AnswerOutOfRange { index: usize, count: usize },
    #[error("quiz can only restart from the results")]
    NothingToRestart,
}

/// Observable phase of the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    LoadFailed,
    Empty,
    Presenting(usize),
    Results,
}

/// Generation token handed out when a load starts.
///
/// Only the ticket from the most recent `begin_load` may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Result of selecting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub next: QuizPhase,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    current_question: usize,
    score: u32,
    show_results: bool,
    questions: Vec<Question>,
    is_loading: bool,
    load_failed: bool,
    generation: u64,
}

impl Default for QuizState {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizState {
    /// Fresh state as created on screen mount: loading, no questions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_question: 0,
            score: 0,
            show_results: false,
            questions: Vec::new(),
            is_loading: true,
            load_failed: false,
            generation: 0,
        }
    }

    /// Start (or restart) a load and invalidate any ticket issued before.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.is_loading = true;
        self.load_failed = false;
        LoadTicket(self.generation)
    }

    /// Apply a loaded batch. Returns `false` if the ticket is stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, questions: Vec<Question>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.questions = questions;
        self.current_question = 0;
        self.score = 0;
        self.show_results = false;
        self.is_loading = false;
        self.load_failed = false;
        true
    }

    /// Record a failed load. Returns `false` if the ticket is stale.
    pub fn fail_load(&mut self, ticket: LoadTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.is_loading = false;
        self.load_failed = true;
        true
    }

    fn accepts(&self, ticket: LoadTicket) -> bool {
        self.is_loading && ticket.0 == self.generation
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.is_loading {
            QuizPhase::Loading
        } else if self.load_failed {
            QuizPhase::LoadFailed
        } else if self.questions.is_empty() {
            QuizPhase::Empty
        } else if self.show_results {
            QuizPhase::Results
        } else {
            QuizPhase::Presenting(self.current_question)
        }
    }

    /// Select the answer at `index` for the question being presented.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotPresenting` outside `Presenting(_)` and
    /// `QuizError::AnswerOutOfRange` for an index past the answer list.
    /// The state is unchanged on error.
    pub fn select_answer(&mut self, index: usize) -> Result<AnswerOutcome, QuizError> {
        let QuizPhase::Presenting(current) = self.phase() else {
            return Err(QuizError::NotPresenting);
        };
        let question = &self.questions[current];
        let answer = question
            .answer(index)
            .ok_or(QuizError::AnswerOutOfRange {
                index,
                count: question.answer_count(),
            })?;
        let correct = answer.is_correct();

        if correct {
            self.score += 1;
        }
        let next = current + 1;
        if next < self.questions.len() {
            self.current_question = next;
        } else {
            self.show_results = true;
        }

        Ok(AnswerOutcome {
            correct,
            next: self.phase(),
        })
    }

    /// Replay the loaded questions from the start with a zero score.
    ///
    /// Only valid from the results card.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NothingToRestart` in any phase other than
    /// `QuizPhase::Results`.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        if self.phase() != QuizPhase::Results {
            return Err(QuizError::NothingToRestart);
        }
        self.current_question = 0;
        self.score = 0;
        self.show_results = false;
        Ok(())
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase() {
            QuizPhase::Presenting(index) => self.questions.get(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn show_results(&self) -> bool {
        self.show_results
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
