pub mod attempt;
pub mod exam;
pub mod question;
pub use attempt::{Attempt, AttemptItem, AttemptStatus, QuestionResult, SubmitResult};
pub use exam::{Exam, ExamCategory, ExamInfo};
pub use question::{KnowledgePoint, Question, QuestionSnapshot, QuestionType};
