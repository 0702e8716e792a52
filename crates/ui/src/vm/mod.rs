mod html_vm;
mod identity_vm;
mod quiz_vm;

pub use html_vm::sanitize_html;
pub use identity_vm::{IdentityVm, map_identity};
pub use quiz_vm::{
    AnswerButtonVm, QuestionCardVm, QuizIntent, QuizVm, ResultsVm, answer_index_for_key,
    load_questions,
};
