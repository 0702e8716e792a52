mod question;
mod session;

pub use question::{Answer, Question, QuestionError};
pub use session::{AuthProvider, Session};
