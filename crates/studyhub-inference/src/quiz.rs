//! Quiz generation adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, instrument};

use studyhub_core::{
    defaults, timestamp_id, Error, GenerationBackend, Question, Quiz, QuizLevel, QuizProvider,
    Result, SearchTopic,
};

use crate::parse::parse_json_lenient;
use crate::prompts::{quiz_prompt, JSON_ONLY_SYSTEM};

/// Question as the model writes it, before shape validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(alias = "text")]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(alias = "correctAnswerIndex", alias = "correct_answer")]
    pub correct_answer: i64,
    #[serde(default)]
    pub explanation: String,
}

/// Check the model's questions against the quiz shape and convert them.
///
/// The count must match exactly, each question needs non-empty text and
/// exactly four non-empty options, and the answer index must be in range.
pub fn validate_questions(raw: Vec<RawQuestion>, expected: usize) -> Result<Vec<Question>> {
    if raw.len() != expected {
        return Err(Error::Validation(format!(
            "expected {} questions, got {}",
            expected,
            raw.len()
        )));
    }

    raw.into_iter()
        .enumerate()
        .map(|(i, q)| {
            let n = i + 1;
            if q.question.trim().is_empty() {
                return Err(Error::Validation(format!("question {} has no text", n)));
            }
            if q.options.iter().any(|o| o.trim().is_empty()) {
                return Err(Error::Validation(format!("question {} has an empty option", n)));
            }
            let option_count = q.options.len();
            let options: [String; defaults::QUIZ_OPTION_COUNT] =
                q.options.try_into().map_err(|_| {
                    Error::Validation(format!(
                        "question {} has {} options, expected {}",
                        n,
                        option_count,
                        defaults::QUIZ_OPTION_COUNT
                    ))
                })?;
            let correct_answer_index = usize::try_from(q.correct_answer)
                .ok()
                .filter(|&idx| idx < defaults::QUIZ_OPTION_COUNT)
                .ok_or_else(|| {
                    Error::Validation(format!(
                        "question {} answer index {} out of range",
                        n, q.correct_answer
                    ))
                })?;

            Ok(Question {
                id: format!("q{}", n),
                text: q.question.trim().to_string(),
                options,
                correct_answer_index,
                explanation: q.explanation.trim().to_string(),
            })
        })
        .collect()
}

/// Title given to every quiz about `topic`.
pub fn quiz_title(topic: &SearchTopic) -> String {
    format!("{} Knowledge Check", topic)
}

/// Generates quizzes through a [`GenerationBackend`].
pub struct QuizGenerator {
    backend: Arc<dyn GenerationBackend>,
}

impl QuizGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl QuizProvider for QuizGenerator {
    #[instrument(skip(self, topic), fields(subsystem = "inference", component = "quiz", op = "generate_quiz", topic = %topic, model = %self.backend.model_name()))]
    async fn generate_quiz(
        &self,
        topic: &SearchTopic,
        level: QuizLevel,
        question_count: usize,
    ) -> Result<Quiz> {
        let question_count = question_count.max(1);
        let prompt = quiz_prompt(topic, level, question_count);
        let raw = self
            .backend
            .generate_with_system(JSON_ONLY_SYSTEM, &prompt)
            .await?;

        let parsed: Vec<RawQuestion> = parse_json_lenient(&raw)?;
        let questions = validate_questions(parsed, question_count)?;
        debug!(result_count = questions.len(), "Quiz validated");

        Ok(Quiz {
            id: timestamp_id("quiz", Utc::now()),
            title: quiz_title(topic),
            questions,
            completed: false,
            score: None,
        })
    }

    fn name(&self) -> &str {
        "llm-quiz"
    }
}
