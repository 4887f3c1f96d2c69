//! Orchestrator configuration.

use studyhub_core::{defaults, QuizLevel};

use crate::retry::RetryPolicy;

/// Tunables for one [`SearchOrchestrator`](crate::SearchOrchestrator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Results requested from each search provider.
    pub max_results: usize,
    /// Level passed to the quiz adapter.
    pub quiz_level: QuizLevel,
    /// Exact question count for live and placeholder quizzes.
    pub question_count: usize,
    /// Exact card count for live and placeholder decks.
    pub flashcard_count: usize,
    /// Backoff applied to the generation adapters.
    pub retry: RetryPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: defaults::MAX_RESULTS,
            quiz_level: QuizLevel::Intermediate,
            question_count: defaults::QUIZ_QUESTION_COUNT,
            flashcard_count: defaults::FLASHCARD_COUNT,
            retry: RetryPolicy::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self {
            max_results: defaults::env_or("STUDYHUB_MAX_RESULTS", defaults::MAX_RESULTS),
            quiz_level: QuizLevel::Intermediate,
            question_count: defaults::env_or(
                "STUDYHUB_QUIZ_QUESTIONS",
                defaults::QUIZ_QUESTION_COUNT,
            )
            .max(1),
            flashcard_count: defaults::env_or("STUDYHUB_FLASHCARDS", defaults::FLASHCARD_COUNT)
                .max(1),
            retry: RetryPolicy::from_env(),
        }
    }
}
