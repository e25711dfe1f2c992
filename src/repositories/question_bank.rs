use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Exam, ExamCategory, KnowledgePoint, Question, QuestionType},
};

/// Read-only lookups into the question and exam catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionBank: Send + Sync {
    async fn find_question(&self, id: i64) -> AppResult<Option<Question>>;
    async fn find_exam(&self, id: i64) -> AppResult<Option<Exam>>;
    async fn list_exams(&self, category: Option<ExamCategory>) -> AppResult<Vec<Exam>>;
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    questions: Vec<Question>,
    #[serde(default)]
    exams: Vec<Exam>,
}

/// Question bank held entirely in memory, built once at startup.
pub struct InMemoryQuestionBank {
    questions: HashMap<i64, Question>,
    exams: Vec<Exam>,
}

impl InMemoryQuestionBank {
    pub fn new(questions: Vec<Question>, exams: Vec<Exam>) -> AppResult<Self> {
        let mut by_id = HashMap::with_capacity(questions.len());
        for question in questions {
            if by_id.contains_key(&question.id) {
                return Err(AppError::ValidationError(format!(
                    "Question id '{}' appears more than once",
                    question.id
                )));
            }
            by_id.insert(question.id, question);
        }

        for exam in &exams {
            let mut seen = HashSet::with_capacity(exam.question_ids.len());
            if let Some(dup) = exam.question_ids.iter().find(|id| !seen.insert(**id)) {
                return Err(AppError::ValidationError(format!(
                    "Exam '{}' lists question '{}' more than once",
                    exam.id, dup
                )));
            }
            if let Some(missing) = exam.question_ids.iter().find(|id| !by_id.contains_key(id)) {
                return Err(AppError::ValidationError(format!(
                    "Exam '{}' references unknown question '{}'",
                    exam.id, missing
                )));
            }
        }

        Ok(Self {
            questions: by_id,
            exams,
        })
    }

    /// Reads a `{ "questions": [...], "exams": [...] }` catalog file.
    pub async fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            AppError::PersistenceError(format!(
                "Could not read question bank {}: {}",
                path.display(),
                err
            ))
        })?;
        let catalog: CatalogFile = serde_json::from_slice(&bytes).map_err(|err| {
            AppError::ValidationError(format!(
                "Question bank {} is malformed: {}",
                path.display(),
                err
            ))
        })?;

        let bank = Self::new(catalog.questions, catalog.exams)?;
        log::info!(
            "Loaded {} question(s) and {} exam(s) from {}",
            bank.questions.len(),
            bank.exams.len(),
            path.display()
        );
        Ok(bank)
    }

    /// A small catalog with one question of each type and a diagnostic exam
    /// over all of them.
    pub fn demo() -> Self {
        let point = |id: i64, name: &str| KnowledgePoint {
            id,
            name: name.to_string(),
        };
        let labels = |labels: &[&str]| labels.iter().map(|l| l.to_string()).collect::<Vec<_>>();

        let questions = vec![
            Question {
                id: 1,
                question_type: QuestionType::Single,
                stem: "Which of the following options is correct?".to_string(),
                options: labels(&["A. Option one", "B. Option two", "C. Option three", "D. Option four"]),
                answer: labels(&["A"]),
                knowledge_points: vec![point(101, "General knowledge")],
                difficulty: 2,
                analysis: Some("A is correct.".to_string()),
            },
            Question {
                id: 2,
                question_type: QuestionType::Multi,
                stem: "Select every correct option.".to_string(),
                options: labels(&["A. First", "B. Second", "C. Third", "D. Fourth"]),
                answer: labels(&["A", "C"]),
                knowledge_points: vec![point(102, "Verbal comprehension")],
                difficulty: 3,
                analysis: Some("A and C are both correct.".to_string()),
            },
            Question {
                id: 3,
                question_type: QuestionType::Judge,
                stem: "The statement above is true.".to_string(),
                options: vec![],
                answer: labels(&["T"]),
                knowledge_points: vec![point(103, "Logical reasoning")],
                difficulty: 1,
                analysis: Some("The statement holds.".to_string()),
            },
            Question {
                id: 4,
                question_type: QuestionType::Fill,
                stem: "Fill in the blank: the capital is ____.".to_string(),
                options: vec![],
                answer: labels(&["Beijing"]),
                knowledge_points: vec![point(104, "Data analysis")],
                difficulty: 2,
                analysis: None,
            },
            Question {
                id: 5,
                question_type: QuestionType::Short,
                stem: "Summarise the key points of exam preparation.".to_string(),
                options: vec![],
                answer: vec![],
                knowledge_points: vec![point(105, "Essay writing")],
                difficulty: 4,
                analysis: None,
            },
        ];

        let exams = vec![Exam {
            id: 1001,
            title: "Demo diagnostic paper".to_string(),
            category: ExamCategory::Diagnostic,
            duration_minutes: 30,
            question_ids: questions.iter().map(|q| q.id).collect(),
        }];

        Self {
            questions: questions.into_iter().map(|q| (q.id, q)).collect(),
            exams,
        }
    }
}

#[async_trait]
impl QuestionBank for InMemoryQuestionBank {
    async fn find_question(&self, id: i64) -> AppResult<Option<Question>> {
        Ok(self.questions.get(&id).cloned())
    }

    async fn find_exam(&self, id: i64) -> AppResult<Option<Exam>> {
        Ok(self.exams.iter().find(|e| e.id == id).cloned())
    }

    async fn list_exams(&self, category: Option<ExamCategory>) -> AppResult<Vec<Exam>> {
        Ok(self
            .exams
            .iter()
            .filter(|e| category.map(|c| e.category == c).unwrap_or(true))
            .cloned()
            .collect())
    }
}
