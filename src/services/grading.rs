use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::models::domain::{Attempt, Question, QuestionResult, QuestionType, SubmitResult};

pub const DEFAULT_SCORE_PER_QUESTION: f64 = 2.0;

/// Scores attempts against answer keys. Holds no state besides the weight, so
/// the same inputs always give the same result.
#[derive(Debug, Clone, Copy)]
pub struct GradingEngine {
    score_per_question: f64,
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_PER_QUESTION)
    }
}

impl GradingEngine {
    pub fn new(score_per_question: f64) -> Self {
        Self { score_per_question }
    }

    pub fn score_per_question(&self) -> f64 {
        self.score_per_question
    }

    /// Grade every item of `attempt` in order. Items whose question is not in
    /// `answer_keys` are scored as incorrect.
    pub fn grade(
        &self,
        attempt: &Attempt,
        answer_keys: &HashMap<i64, Question>,
        submitted_at: DateTime<Utc>,
    ) -> SubmitResult {
        let mut total_score = 0.0;
        let mut correct_count = 0;
        let mut results = Vec::with_capacity(attempt.items.len());

        for item in &attempt.items {
            let question_id = item.question.id;
            let user_answer = item.saved_answer.clone().unwrap_or_default();

            let key = answer_keys.get(&question_id);
            let is_correct = match key {
                Some(key) => Self::is_correct(key.question_type, &user_answer, &key.answer),
                None => {
                    log::warn!(
                        "No answer key for question {} in attempt {}, scoring as incorrect",
                        question_id,
                        attempt.attempt_id
                    );
                    false
                }
            };

            let score_awarded = if is_correct {
                correct_count += 1;
                self.score_per_question
            } else {
                0.0
            };
            total_score += score_awarded;

            results.push(QuestionResult {
                question_id,
                question_stem: key.map_or_else(|| item.question.stem.clone(), |k| k.stem.clone()),
                is_correct,
                score_awarded,
                correct_answer: key.map(|k| k.answer.clone()).unwrap_or_default(),
                user_answer,
                analysis: key.and_then(|k| k.analysis.clone()),
                time_spent_seconds: item.time_spent_seconds,
            });
        }

        SubmitResult {
            attempt_id: attempt.attempt_id.clone(),
            exam_title: attempt.exam.title.clone(),
            total_score,
            correct_count,
            total_questions: attempt.items.len() as u32,
            submitted_at,
            results,
        }
    }

    /// Type-specific comparison of a user answer against the answer key.
    pub fn is_correct(question_type: QuestionType, user: &[String], correct: &[String]) -> bool {
        match question_type {
            // Only the first token counts; JUDGE keys are true/false tokens.
            QuestionType::Single | QuestionType::Judge => match (user.first(), correct.first()) {
                (Some(u), Some(c)) => normalize(u) == normalize(c),
                _ => false,
            },
            // All correct options and nothing else, order and repeats ignored.
            QuestionType::Multi => {
                let correct_set: HashSet<String> = correct.iter().map(|t| normalize(t)).collect();
                if correct_set.is_empty() {
                    return false;
                }
                let user_set: HashSet<String> = user.iter().map(|t| normalize(t)).collect();
                user_set == correct_set
            }
            QuestionType::Fill | QuestionType::Short | QuestionType::Other => false,
        }
    }
}

fn normalize(token: &str) -> String {
    token.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{demo_attempt, demo_questions};

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn keys() -> HashMap<i64, Question> {
        demo_questions().into_iter().map(|q| (q.id, q)).collect()
    }

    #[test]
    fn single_and_judge_ignore_case() {
        for question_type in [QuestionType::Single, QuestionType::Judge] {
            assert!(GradingEngine::is_correct(question_type, &tokens(&["a"]), &tokens(&["A"])));
            assert!(GradingEngine::is_correct(question_type, &tokens(&["A"]), &tokens(&["A"])));
            assert!(!GradingEngine::is_correct(question_type, &tokens(&["B"]), &tokens(&["A"])));
        }
    }

    #[test]
    fn single_only_looks_at_first_token() {
        assert!(GradingEngine::is_correct(
            QuestionType::Single,
            &tokens(&["A", "B"]),
            &tokens(&["A"])
        ));
        assert!(!GradingEngine::is_correct(
            QuestionType::Single,
            &tokens(&["B", "A"]),
            &tokens(&["A"])
        ));
    }

    #[test]
    fn single_without_user_answer_is_incorrect() {
        assert!(!GradingEngine::is_correct(QuestionType::Single, &[], &tokens(&["A"])));
        assert!(!GradingEngine::is_correct(QuestionType::Judge, &[], &[]));
    }

    #[test]
    fn multi_uses_set_equality() {
        let correct = tokens(&["A", "C"]);
        assert!(GradingEngine::is_correct(QuestionType::Multi, &tokens(&["C", "A", "A"]), &correct));
        assert!(GradingEngine::is_correct(QuestionType::Multi, &tokens(&["c", "a"]), &correct));
        assert!(!GradingEngine::is_correct(QuestionType::Multi, &tokens(&["A"]), &correct));
        assert!(!GradingEngine::is_correct(
            QuestionType::Multi,
            &tokens(&["A", "B", "C"]),
            &correct
        ));
    }

    #[test]
    fn multi_with_empty_key_is_incorrect() {
        assert!(!GradingEngine::is_correct(QuestionType::Multi, &[], &[]));
    }

    #[test]
    fn free_text_types_are_never_correct() {
        for question_type in [QuestionType::Fill, QuestionType::Short, QuestionType::Other] {
            assert!(!GradingEngine::is_correct(
                question_type,
                &tokens(&["Beijing"]),
                &tokens(&["Beijing"])
            ));
        }
    }

    #[test]
    fn grade_scores_items_in_order() {
        let mut attempt = demo_attempt();
        attempt.items[0].saved_answer = Some(tokens(&["a"]));
        attempt.items[1].saved_answer = Some(tokens(&["C", "A"]));
        attempt.items[2].saved_answer = Some(tokens(&["t"]));
        attempt.items[3].saved_answer = Some(tokens(&["Beijing"]));
        attempt.items[0].time_spent_seconds = 42;
        let mut keys = keys();
        if let Some(key) = keys.get_mut(&1) {
            key.analysis = Some("A is the only correct option.".to_string());
        }

        let now = Utc::now();
        let result = GradingEngine::default().grade(&attempt, &keys, now);

        assert_eq!(result.total_score, 6.0);
        assert_eq!(result.correct_count, 3);
        assert_eq!(result.total_questions, 5);
        assert_eq!(result.submitted_at, now);
        let ids: Vec<i64> = result.results.iter().map(|r| r.question_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(!result.results[3].is_correct);
        assert_eq!(result.results[4].user_answer, Vec::<String>::new());
        assert_eq!(result.results[1].correct_answer, tokens(&["A", "C"]));
        assert_eq!(result.exam_title, "Demo diagnostic paper");
        assert_eq!(result.results[0].question_stem, "Question 1");
        assert_eq!(
            result.results[0].analysis.as_deref(),
            Some("A is the only correct option.")
        );
        assert!(result.results[1].analysis.is_none());
        assert_eq!(result.results[0].time_spent_seconds, 42);
        assert_eq!(result.results[1].time_spent_seconds, 0);
    }

    #[test]
    fn grade_treats_missing_keys_as_incorrect() {
        let mut attempt = demo_attempt();
        attempt.items[0].saved_answer = Some(tokens(&["A"]));

        let result = GradingEngine::default().grade(&attempt, &HashMap::new(), Utc::now());

        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.correct_count, 0);
        assert!(result.results[0].correct_answer.is_empty());
        assert_eq!(result.results[0].question_stem, attempt.items[0].question.stem);
        assert!(result.results[0].analysis.is_none());
    }

    #[test]
    fn grade_uses_configured_weight() {
        let mut attempt = demo_attempt();
        attempt.items[0].saved_answer = Some(tokens(&["A"]));

        let result = GradingEngine::new(5.0).grade(&attempt, &keys(), Utc::now());

        assert_eq!(result.total_score, 5.0);
        assert_eq!(result.results[0].score_awarded, 5.0);
    }

    #[test]
    fn grade_is_deterministic() {
        let mut attempt = demo_attempt();
        attempt.items[1].saved_answer = Some(tokens(&["A", "C"]));
        let now = Utc::now();
        let engine = GradingEngine::default();

        assert_eq!(engine.grade(&attempt, &keys(), now), engine.grade(&attempt, &keys(), now));
    }
}
