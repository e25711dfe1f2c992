use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{AttemptRepository, InMemoryQuestionBank, JsonFileAttemptRepository, QuestionBank},
    services::{AttemptService, ExamService, GradingEngine},
};

#[derive(Clone)]
pub struct AppState {
    pub attempt_service: Arc<AttemptService>,
    pub exam_service: Arc<ExamService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let question_bank: Arc<dyn QuestionBank> = match &config.question_bank_path {
            Some(path) => Arc::new(InMemoryQuestionBank::from_file(path).await?),
            None => {
                log::info!("QUESTION_BANK_PATH not set, using the demo question bank");
                Arc::new(InMemoryQuestionBank::demo())
            }
        };

        let attempts = Arc::new(JsonFileAttemptRepository::open(&config.attempt_store_path).await);

        Ok(Self::from_parts(config, question_bank, attempts))
    }

    /// Wires the services over already constructed stores.
    pub fn from_parts(
        config: Config,
        question_bank: Arc<dyn QuestionBank>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        let grading = GradingEngine::new(config.score_per_question);
        log::debug!("Scoring {} point(s) per correct answer", grading.score_per_question());

        let exam_service = Arc::new(ExamService::new(question_bank));
        let attempt_service = Arc::new(AttemptService::new(attempts, exam_service.clone(), grading));

        Self {
            attempt_service,
            exam_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_new_uses_demo_bank_without_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::test_config();
        config.attempt_store_path = dir.path().join("attempts.json").display().to_string();

        let state = AppState::new(config).await.expect("state should build");
        let exams = state.exam_service.list_exams(None).await.unwrap();

        assert_eq!(exams.items.len(), 1);
        assert_eq!(exams.items[0].id, 1001);
    }

    #[tokio::test]
    async fn test_new_fails_on_missing_bank_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::test_config();
        config.attempt_store_path = dir.path().join("attempts.json").display().to_string();
        config.question_bank_path = Some(dir.path().join("nope.json").display().to_string());

        assert!(AppState::new(config).await.is_err());
    }
}
