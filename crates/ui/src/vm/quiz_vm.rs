use quiz_core::model::Question;
use quiz_core::{AnswerOutcome, LoadTicket, QuizPhase, QuizState};
use services::QuizService;

use super::html_vm::sanitize_html;
use super::identity_vm::IdentityVm;
use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectAnswer(usize),
    Restart,
    Retry,
    SignOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerButtonVm {
    pub index: usize,
    pub label_html: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub heading: String,
    pub prompt_html: String,
    pub answers: Vec<AnswerButtonVm>,
    pub score_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_line: String,
}

/// Screen-scoped quiz state plus the mapping to what the view shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizVm {
    state: QuizState,
}

impl QuizVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.state.phase()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.state.begin_load()
    }

    /// Apply the outcome of a load started with `ticket`.
    ///
    /// Returns `false` when a newer load superseded it.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Question>, ViewError>,
    ) -> bool {
        let applied = match result {
            Ok(questions) => self.state.finish_load(ticket, questions),
            Err(_) => self.state.fail_load(ticket),
        };
        if !applied {
            tracing::debug!("ignoring stale quiz load");
        }
        applied
    }

    pub fn select_answer(&mut self, index: usize) -> Option<AnswerOutcome> {
        self.state
            .select_answer(index)
            .inspect_err(|err| tracing::debug!(error = %err, "answer ignored"))
            .ok()
    }

    pub fn restart(&mut self) -> bool {
        self.state
            .restart()
            .inspect_err(|err| tracing::debug!(error = %err, "restart ignored"))
            .is_ok()
    }

    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.state
            .current_question()
            .map_or(0, Question::answer_count)
    }

    #[must_use]
    pub fn question_card(&self) -> Option<QuestionCardVm> {
        let question = self.state.current_question()?;
        let answers = question
            .answers()
            .iter()
            .enumerate()
            .map(|(index, answer)| AnswerButtonVm {
                index,
                label_html: sanitize_html(answer.text()),
                id: format!("quiz-answer-{index}"),
            })
            .collect();

        Some(QuestionCardVm {
            heading: format!(
                "Question {}/{}",
                self.state.current_question_index() + 1,
                self.state.total()
            ),
            prompt_html: sanitize_html(question.prompt()),
            answers,
            score_label: format!("Score: {}", self.state.score()),
        })
    }

    #[must_use]
    pub fn results(&self, identity: &IdentityVm) -> Option<ResultsVm> {
        if self.state.phase() != QuizPhase::Results {
            return None;
        }
        Some(ResultsVm {
            score_line: format!(
                "{} scored {} out of {}",
                identity.subject,
                self.state.score(),
                self.state.total()
            ),
        })
    }
}

/// Fetch a batch through the quiz service, logging failures.
///
/// # Errors
///
/// Returns `ViewError::LoadFailed` for any service error.
pub async fn load_questions(quiz: &QuizService) -> Result<Vec<Question>, ViewError> {
    quiz.load_batch().await.map_err(|err| {
        tracing::error!(error = %err, "failed to fetch questions");
        ViewError::LoadFailed
    })
}

/// Map a digit key (`1`-based) to an answer index.
#[must_use]
pub fn answer_index_for_key(key: &str, answer_count: usize) -> Option<usize> {
    let digit = key.parse::<usize>().ok()?;
    (1..=answer_count).contains(&digit).then(|| digit - 1)
}
