//! Live generation against the configured backend.
//!
//! Run with `--features integration` and `GEMINI_API_KEY` or
//! `STUDYHUB_GEN_PROVIDER=openai` plus `OPENAI_API_KEY` set.

#![cfg(feature = "integration")]

use studyhub_core::{QuizLevel, QuizProvider, SearchTopic};
use studyhub_inference::{backend_from_env, QuizGenerator};

#[tokio::test]
async fn test_live_quiz_generation() {
    let backend = backend_from_env().unwrap();
    let generator = QuizGenerator::new(backend);
    let topic = SearchTopic::parse("Photosynthesis").unwrap();

    let quiz = generator
        .generate_quiz(&topic, QuizLevel::Beginner, 8)
        .await
        .unwrap();

    assert_eq!(quiz.questions.len(), 8);
    assert!(quiz.questions.iter().all(|q| q.correct_answer_index < 4));
}
