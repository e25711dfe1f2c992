pub mod attempt_service;
pub mod exam_service;
pub mod grading;

pub use attempt_service::AttemptService;
pub use exam_service::ExamService;
pub use grading::GradingEngine;
