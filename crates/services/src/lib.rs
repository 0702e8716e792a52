#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod config;
pub mod error;
pub mod identity;
pub mod quiz_service;
pub mod trivia;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use config::{AppConfig, IdentityBackend, parse_batch_size};
pub use error::{ConfigError, IdentityError, QuizLoadError, TriviaError};
pub use identity::{IdentityClient, LocalIdentityClient, LocalProfile, SessionStore};
pub use quiz_service::{QuizService, build_question, build_questions};
pub use trivia::{BATCH_SIZE, RawQuestion, StaticTriviaSource, TriviaSource};
