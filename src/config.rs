use std::env;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub attempt_store_path: String,
    pub question_bank_path: Option<String>,
    pub score_per_question: f64,
    pub cors_allowed_origin: String,
    pub history_default_limit: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            attempt_store_path: env::var("ATTEMPT_STORE_PATH")
                .unwrap_or_else(|_| "data/demo_attempts_v1.json".to_string()),
            question_bank_path: env::var("QUESTION_BANK_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            score_per_question: env::var("SCORE_PER_QUESTION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2.0),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            history_default_limit: env::var("HISTORY_DEFAULT_LIMIT")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(20),
        }
    }

    /// Rejects settings the grading engine cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if !self.score_per_question.is_finite() || self.score_per_question <= 0.0 {
            return Err(AppError::ValidationError(format!(
                "SCORE_PER_QUESTION must be a positive number, got {}",
                self.score_per_question
            )));
        }

        if self.history_default_limit <= 0 {
            return Err(AppError::ValidationError(format!(
                "HISTORY_DEFAULT_LIMIT must be positive, got {}",
                self.history_default_limit
            )));
        }

        if self.attempt_store_path.trim().is_empty() {
            return Err(AppError::ValidationError(
                "ATTEMPT_STORE_PATH must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            attempt_store_path: "data/test_attempts.json".to_string(),
            question_bank_path: None,
            score_per_question: 2.0,
            cors_allowed_origin: "http://localhost:5173".to_string(),
            history_default_limit: 20,
        }
    }
}
