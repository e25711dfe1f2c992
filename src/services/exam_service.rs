use std::{collections::HashMap, sync::Arc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Exam, ExamCategory, Question},
        dto::response::ExamListResponse,
    },
    repositories::QuestionBank,
};

pub struct ExamService {
    question_bank: Arc<dyn QuestionBank>,
}

impl ExamService {
    pub fn new(question_bank: Arc<dyn QuestionBank>) -> Self {
        Self { question_bank }
    }

    pub async fn list_exams(&self, category: Option<ExamCategory>) -> AppResult<ExamListResponse> {
        let items = self.question_bank.list_exams(category).await?;
        Ok(ExamListResponse { items })
    }

    pub async fn get_exam(&self, id: i64) -> AppResult<Exam> {
        self.question_bank
            .find_exam(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Exam with id '{}' not found", id)))
    }

    /// Looks up each id in order; any unknown id fails the whole call.
    pub async fn resolve_questions(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        let mut questions = Vec::with_capacity(ids.len());
        for id in ids {
            let question = self
                .question_bank
                .find_question(*id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))?;
            questions.push(question);
        }
        Ok(questions)
    }

    /// Answer keys for the given ids. Ids the bank no longer knows are left out.
    pub async fn answer_keys(&self, ids: &[i64]) -> AppResult<HashMap<i64, Question>> {
        let mut keys = HashMap::with_capacity(ids.len());
        for id in ids {
            if let Some(question) = self.question_bank.find_question(*id).await? {
                keys.insert(*id, question);
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::question_bank::MockQuestionBank;
    use crate::test_utils::fixtures::{demo_exam, demo_questions};

    fn bank_with_demo_questions() -> MockQuestionBank {
        let mut bank = MockQuestionBank::new();
        bank.expect_find_question()
            .returning(|id| Ok(demo_questions().into_iter().find(|q| q.id == id)));
        bank
    }

    #[tokio::test]
    async fn get_exam_reports_unknown_exam() {
        let mut bank = MockQuestionBank::new();
        bank.expect_find_exam().returning(|_| Ok(None));
        let service = ExamService::new(Arc::new(bank));

        let result = service.get_exam(404).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_exams_passes_category_through() {
        let mut bank = MockQuestionBank::new();
        bank.expect_list_exams()
            .withf(|category| *category == Some(ExamCategory::Diagnostic))
            .times(1)
            .returning(|_| Ok(vec![demo_exam()]));
        let service = ExamService::new(Arc::new(bank));

        let response = service
            .list_exams(Some(ExamCategory::Diagnostic))
            .await
            .unwrap();
        assert_eq!(response.items.len(), 1);
    }

    #[tokio::test]
    async fn resolve_questions_keeps_requested_order() {
        let service = ExamService::new(Arc::new(bank_with_demo_questions()));

        let questions = service.resolve_questions(&[3, 1, 2]).await.unwrap();
        let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn resolve_questions_fails_on_unknown_id() {
        let service = ExamService::new(Arc::new(bank_with_demo_questions()));

        let result = service.resolve_questions(&[1, 99]).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn answer_keys_skip_unknown_ids() {
        let service = ExamService::new(Arc::new(bank_with_demo_questions()));

        let keys = service.answer_keys(&[1, 99]).await.unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys.contains_key(&1));
    }
}
