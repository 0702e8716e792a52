#![forbid(unsafe_code)]

pub mod model;
pub mod quiz;
pub mod time;

pub use quiz::{AnswerOutcome, LoadTicket, QuizError, QuizPhase, QuizState};
pub use time::Clock;
