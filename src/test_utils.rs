#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;

    use crate::models::domain::{Attempt, Exam, ExamCategory, Question, QuestionType, SubmitResult};

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn question(id: i64, question_type: QuestionType, options: &[&str], answer: &[&str]) -> Question {
        Question {
            id,
            question_type,
            stem: format!("Question {}", id),
            options: tokens(options),
            answer: tokens(answer),
            knowledge_points: vec![],
            difficulty: 2,
            analysis: None,
        }
    }

    /// One question of each type, ids 1 to 5.
    pub fn demo_questions() -> Vec<Question> {
        vec![
            question(1, QuestionType::Single, &["A", "B", "C", "D"], &["A"]),
            question(2, QuestionType::Multi, &["A", "B", "C", "D"], &["A", "C"]),
            question(3, QuestionType::Judge, &[], &["T"]),
            question(4, QuestionType::Fill, &[], &["Beijing"]),
            question(5, QuestionType::Short, &[], &[]),
        ]
    }

    pub fn demo_exam() -> Exam {
        Exam {
            id: 1001,
            title: "Demo diagnostic paper".to_string(),
            category: ExamCategory::Diagnostic,
            duration_minutes: 30,
            question_ids: vec![1, 2, 3, 4, 5],
        }
    }

    /// A fresh DOING attempt over [`demo_questions`].
    pub fn demo_attempt() -> Attempt {
        Attempt::start(&demo_exam(), &demo_questions()).expect("demo attempt should start")
    }

    pub fn submitted_result(attempt_id: &str) -> SubmitResult {
        SubmitResult {
            attempt_id: attempt_id.to_string(),
            exam_title: "Demo diagnostic paper".to_string(),
            total_score: 2.0,
            correct_count: 1,
            total_questions: 5,
            submitted_at: Utc::now(),
            results: vec![],
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_demo_attempt() {
        let attempt = demo_attempt();
        assert_eq!(attempt.items.len(), 5);
        assert_eq!(attempt.exam_id, 1001);
        assert!(!attempt.is_submitted());
    }

    #[test]
    fn test_fixtures_demo_questions_match_exam() {
        let ids: Vec<i64> = demo_questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, demo_exam().question_ids);
    }
}
