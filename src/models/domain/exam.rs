use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub category: ExamCategory,
    pub duration_minutes: i32,
    pub question_ids: Vec<i64>, // Presentation order
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamCategory {
    Diagnostic,
    Practice,
    Mock,
}

/// Exam fields an attempt keeps for display and history filtering.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct ExamInfo {
    pub id: i64,
    pub title: String,
    pub category: ExamCategory,
    pub duration_minutes: i32,
}

impl From<&Exam> for ExamInfo {
    fn from(exam: &Exam) -> Self {
        ExamInfo {
            id: exam.id,
            title: exam.title.clone(),
            category: exam.category,
            duration_minutes: exam.duration_minutes,
        }
    }
}
