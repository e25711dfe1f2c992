use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Attempt, Exam, ExamCategory};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AckResponse {
    pub message: String,
}

impl AckResponse {
    pub fn saved() -> Self {
        AckResponse {
            message: "saved".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AttemptHistoryItem {
    pub attempt_id: String,
    pub exam_id: i64,
    pub exam_title: String,
    pub category: ExamCategory,
    pub total_score: Option<f64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub duration_minutes: i32,
}

impl From<Attempt> for AttemptHistoryItem {
    fn from(attempt: Attempt) -> Self {
        AttemptHistoryItem {
            attempt_id: attempt.attempt_id,
            exam_id: attempt.exam_id,
            exam_title: attempt.exam.title,
            category: attempt.exam.category,
            total_score: attempt.total_score,
            submitted_at: attempt.submitted_at,
            duration_minutes: attempt.exam.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AttemptHistoryResponse {
    pub items: Vec<AttemptHistoryItem>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ExamListResponse {
    pub items: Vec<Exam>,
}
