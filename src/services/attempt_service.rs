use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Attempt, Exam, ExamCategory, Question, SubmitResult},
        dto::response::{AckResponse, AttemptHistoryItem, AttemptHistoryResponse},
    },
    repositories::AttemptRepository,
    services::{exam_service::ExamService, grading::GradingEngine},
};

pub const MAX_ANSWER_TOKENS: usize = 64;
pub const MAX_TOKEN_CHARS: usize = 1000;

/// Owns the attempt lifecycle: creation, answer saving, submission and
/// result reads. Every change goes through the attempt repository.
pub struct AttemptService {
    attempts: Arc<dyn AttemptRepository>,
    exams: Arc<ExamService>,
    grading: GradingEngine,
}

impl AttemptService {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        exams: Arc<ExamService>,
        grading: GradingEngine,
    ) -> Self {
        Self {
            attempts,
            exams,
            grading,
        }
    }

    /// Creates a DOING attempt over `questions`, kept in the given order.
    pub async fn create_attempt(&self, exam: &Exam, questions: Vec<Question>) -> AppResult<Attempt> {
        let attempt = Attempt::start(exam, &questions)?;
        let attempt = self.attempts.create(attempt).await?;

        log::info!(
            "Attempt {} started for exam {} with {} question(s)",
            attempt.attempt_id,
            attempt.exam_id,
            attempt.items.len()
        );
        Ok(attempt)
    }

    /// Starts an attempt over the exam's own question list.
    pub async fn start_exam(&self, exam_id: i64) -> AppResult<Attempt> {
        let exam = self.exams.get_exam(exam_id).await?;
        let questions = self.exams.resolve_questions(&exam.question_ids).await?;
        self.create_attempt(&exam, questions).await
    }

    /// Starts an attempt for `exam_id` over an explicit question list.
    pub async fn start_with_questions(
        &self,
        exam_id: i64,
        question_ids: &[i64],
    ) -> AppResult<Attempt> {
        if question_ids.is_empty() {
            return Err(AppError::ValidationError(
                "question_ids must not be empty".to_string(),
            ));
        }
        let exam = self.exams.get_exam(exam_id).await?;
        let questions = self.exams.resolve_questions(question_ids).await?;
        self.create_attempt(&exam, questions).await
    }

    pub async fn get_attempt(&self, attempt_id: &str) -> AppResult<Attempt> {
        self.attempts
            .find_by_id(attempt_id)
            .await?
            .ok_or_else(|| not_found(attempt_id))
    }

    /// Replaces the saved answer of one item. `None` and an empty list both
    /// clear it. `time_spent_seconds` overwrites the recorded time when given.
    pub async fn save_answer(
        &self,
        attempt_id: &str,
        question_id: i64,
        answer: Option<Vec<String>>,
        time_spent_seconds: Option<u32>,
    ) -> AppResult<AckResponse> {
        self.attempts
            .update(
                attempt_id,
                Box::new(move |attempt: &mut Attempt| -> AppResult<()> {
                    if attempt.is_submitted() {
                        return Err(AppError::InvalidState(format!(
                            "Attempt '{}' is already submitted, answers can no longer change",
                            attempt.attempt_id
                        )));
                    }
                    let attempt_id = attempt.attempt_id.clone();
                    let item = attempt.item_mut(question_id).ok_or_else(|| {
                        AppError::NotFound(format!(
                            "Question '{}' is not part of attempt '{}'",
                            question_id, attempt_id
                        ))
                    })?;
                    item.saved_answer = normalize_answer(answer)?;
                    if let Some(seconds) = time_spent_seconds {
                        item.time_spent_seconds = seconds;
                    }
                    Ok(())
                }),
            )
            .await?;

        log::debug!("Saved answer for question {} in attempt {}", question_id, attempt_id);
        Ok(AckResponse::saved())
    }

    /// Grades and closes the attempt. Submitting an already submitted attempt
    /// returns the stored result without grading again.
    pub async fn submit(&self, attempt_id: &str) -> AppResult<SubmitResult> {
        let attempt = self.get_attempt(attempt_id).await?;
        if attempt.is_submitted() {
            log::info!("Attempt {} already submitted, replaying result", attempt_id);
            return stored_result(&attempt);
        }

        let question_ids: Vec<i64> = attempt.items.iter().map(|i| i.question.id).collect();
        let answer_keys = self.exams.answer_keys(&question_ids).await?;
        let grading = self.grading;

        let updated = self
            .attempts
            .update(
                attempt_id,
                Box::new(move |attempt: &mut Attempt| -> AppResult<()> {
                    if attempt.is_submitted() {
                        return Err(AppError::InvalidState(format!(
                            "Attempt '{}' is already submitted",
                            attempt.attempt_id
                        )));
                    }
                    let result = grading.grade(attempt, &answer_keys, Utc::now());
                    attempt.complete(result)
                }),
            )
            .await;

        let updated = match updated {
            Ok(updated) => updated,
            // Lost a race with another submit of the same attempt.
            Err(AppError::InvalidState(_)) => return self.get_result(attempt_id).await,
            Err(err) => return Err(err),
        };

        let result = stored_result(&updated)?;
        log::info!(
            "Attempt {} submitted: score {} ({}/{} correct)",
            attempt_id,
            result.total_score,
            result.correct_count,
            result.total_questions
        );
        Ok(result)
    }

    /// The result stored at submission time.
    pub async fn get_result(&self, attempt_id: &str) -> AppResult<SubmitResult> {
        let attempt = self.get_attempt(attempt_id).await?;
        if !attempt.is_submitted() {
            return Err(AppError::InvalidState(format!(
                "Attempt '{}' has not been submitted yet",
                attempt_id
            )));
        }
        stored_result(&attempt)
    }

    pub async fn history(
        &self,
        category: Option<ExamCategory>,
        offset: i64,
        limit: i64,
    ) -> AppResult<AttemptHistoryResponse> {
        let (attempts, total) = self.attempts.list_submitted(category, offset, limit).await?;
        Ok(AttemptHistoryResponse {
            items: attempts.into_iter().map(AttemptHistoryItem::from).collect(),
            total,
        })
    }
}

fn not_found(attempt_id: &str) -> AppError {
    AppError::NotFound(format!("Attempt with id '{}' not found", attempt_id))
}

fn stored_result(attempt: &Attempt) -> AppResult<SubmitResult> {
    attempt.result.clone().ok_or_else(|| {
        AppError::InternalError(format!(
            "Attempt '{}' is submitted but has no stored result",
            attempt.attempt_id
        ))
    })
}

fn normalize_answer(answer: Option<Vec<String>>) -> AppResult<Option<Vec<String>>> {
    let Some(tokens) = answer else {
        return Ok(None);
    };

    if tokens.len() > MAX_ANSWER_TOKENS {
        return Err(AppError::ValidationError(format!(
            "An answer may hold at most {} tokens, got {}",
            MAX_ANSWER_TOKENS,
            tokens.len()
        )));
    }
    if tokens.iter().any(|t| t.trim().is_empty()) {
        return Err(AppError::ValidationError(
            "Answer tokens must not be blank".to_string(),
        ));
    }
    if tokens.iter().any(|t| t.chars().count() > MAX_TOKEN_CHARS) {
        return Err(AppError::ValidationError(format!(
            "Answer tokens may be at most {} characters",
            MAX_TOKEN_CHARS
        )));
    }

    Ok(if tokens.is_empty() { None } else { Some(tokens) })
}
