pub mod attempt_repository;
pub mod question_bank;

pub use attempt_repository::{AttemptMutator, AttemptRepository, JsonFileAttemptRepository};
pub use question_bank::{InMemoryQuestionBank, QuestionBank};
