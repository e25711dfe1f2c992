use std::collections::HashSet;

use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::exam::{Exam, ExamInfo};
use crate::models::domain::question::{Question, QuestionSnapshot};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct Attempt {
    pub attempt_id: String,
    pub exam_id: i64,
    pub exam: ExamInfo,
    pub status: AttemptStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>, // Set once, on submit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>, // Set once, on submit
    pub items: Vec<AttemptItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<SubmitResult>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct AttemptItem {
    pub order_no: u32,
    pub question: QuestionSnapshot,
    pub saved_answer: Option<Vec<String>>,
    #[serde(default)]
    pub time_spent_seconds: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    Doing,
    Submitted,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct SubmitResult {
    pub attempt_id: String,
    #[serde(default)]
    pub exam_title: String,
    pub total_score: f64,
    pub correct_count: u32,
    pub total_questions: u32,
    pub submitted_at: DateTime<Utc>,
    pub results: Vec<QuestionResult>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionResult {
    pub question_id: i64,
    #[serde(default)]
    pub question_stem: String,
    pub is_correct: bool,
    pub score_awarded: f64,
    pub correct_answer: Vec<String>,
    pub user_answer: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default)]
    pub time_spent_seconds: u32,
}

impl Attempt {
    /// Starts a new attempt with one unanswered item per question, in the
    /// order given. Items are addressed by question id, so ids must be unique.
    pub fn start(exam: &Exam, questions: &[Question]) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Exam '{}' has no questions to attempt",
                exam.id
            )));
        }

        let mut seen = HashSet::with_capacity(questions.len());
        if let Some(dup) = questions.iter().find(|q| !seen.insert(q.id)) {
            return Err(AppError::ValidationError(format!(
                "Question '{}' appears more than once in the attempt",
                dup.id
            )));
        }

        let items = questions
            .iter()
            .enumerate()
            .map(|(idx, question)| AttemptItem {
                order_no: idx as u32 + 1,
                question: QuestionSnapshot::from(question),
                saved_answer: None,
                time_spent_seconds: 0,
            })
            .collect();

        Ok(Attempt {
            attempt_id: Uuid::new_v4().to_string(),
            exam_id: exam.id,
            exam: ExamInfo::from(exam),
            status: AttemptStatus::Doing,
            started_at: Utc::now(),
            submitted_at: None,
            total_score: None,
            items,
            result: None,
        })
    }

    pub fn is_submitted(&self) -> bool {
        self.status == AttemptStatus::Submitted
    }

    pub fn item_mut(&mut self, question_id: i64) -> Option<&mut AttemptItem> {
        self.items
            .iter_mut()
            .find(|item| item.question.id == question_id)
    }

    /// Records the graded result and moves the attempt to SUBMITTED.
    pub fn complete(&mut self, result: SubmitResult) -> AppResult<()> {
        if self.is_submitted() {
            return Err(AppError::InvalidState(format!(
                "Attempt '{}' is already submitted",
                self.attempt_id
            )));
        }

        self.status = AttemptStatus::Submitted;
        self.submitted_at = Some(result.submitted_at);
        self.total_score = Some(result.total_score);
        self.result = Some(result);
        Ok(())
    }
}
