use serde::Deserialize;
use validator::Validate;

use crate::models::domain::ExamCategory;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttemptRequest {
    pub exam_id: i64,

    #[validate(length(min = 1, max = 500, message = "question_ids must not be empty"))]
    pub question_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveAnswerRequest {
    pub question_id: i64,
    #[serde(default)]
    pub answer: Option<AnswerPayload>,

    #[validate(range(max = 86_400))]
    #[serde(default)]
    pub time_spent_seconds: Option<u32>,
}

/// Clients send either a single token or a list of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnswerPayload {
    One(String),
    Many(Vec<String>),
}

impl AnswerPayload {
    /// A blank scalar means "no answer" and yields no tokens.
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            AnswerPayload::One(token) if token.trim().is_empty() => vec![],
            AnswerPayload::One(token) => vec![token],
            AnswerPayload::Many(tokens) => tokens,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExamListParams {
    pub category: Option<ExamCategory>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HistoryParams {
    pub category: Option<ExamCategory>,

    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl HistoryParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit_or(&self, default_limit: i64) -> i64 {
        self.limit.unwrap_or(default_limit)
    }
}
