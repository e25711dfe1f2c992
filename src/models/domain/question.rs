use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

/// A question bank entry, including its answer key.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub stem: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: Vec<String>,
    #[serde(default)]
    pub knowledge_points: Vec<KnowledgePoint>,
    pub difficulty: u8, // 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct KnowledgePoint {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Single, // Exactly one correct option
    Multi,  // One or more correct options, all must be picked
    Judge,  // True/false
    Fill,   // Fill in the blank, not auto-graded
    Short,  // Free text, not auto-graded
    #[serde(other)]
    Other,
}

/// The test-facing part of a question, copied into an attempt when it starts.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionSnapshot {
    pub id: i64,
    #[serde(rename = "type")]
    #[graphql(name = "type")]
    pub question_type: QuestionType,
    pub stem: String,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionSnapshot {
    fn from(question: &Question) -> Self {
        QuestionSnapshot {
            id: question.id,
            question_type: question.question_type,
            stem: question.stem.clone(),
            options: question.options.clone(),
        }
    }
}
