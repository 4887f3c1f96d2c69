//! Flashcard generation adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use studyhub_core::{
    Difficulty, Error, Flashcard, FlashcardProvider, GenerationBackend, Result,
    SearchTopic,
};

use crate::parse::parse_json_lenient;
use crate::prompts::{flashcard_prompt, JSON_ONLY_SYSTEM};

/// Flashcard as the model writes it.
#[derive(Debug, Deserialize)]
pub struct RawFlashcard {
    #[serde(alias = "question", alias = "term")]
    pub front: String,
    #[serde(alias = "answer", alias = "definition")]
    pub back: String,
    #[serde(default)]
    pub difficulty: String,
}

/// Check the model's cards against the flashcard shape.
pub fn validate_flashcards(raw: Vec<RawFlashcard>, expected: usize) -> Result<Vec<Flashcard>> {
    if raw.len() != expected {
        return Err(Error::Validation(format!(
            "expected {} flashcards, got {}",
            expected,
            raw.len()
        )));
    }

    raw.into_iter()
        .enumerate()
        .map(|(i, card)| {
            let n = i + 1;
            if card.front.trim().is_empty() || card.back.trim().is_empty() {
                return Err(Error::Validation(format!("flashcard {} has an empty side", n)));
            }
            let difficulty: Difficulty = card
                .difficulty
                .parse()
                .map_err(|e: String| Error::Validation(format!("flashcard {}: {}", n, e)))?;
            Ok(Flashcard {
                id: format!("fc-{}", n),
                front: card.front.trim().to_string(),
                back: card.back.trim().to_string(),
                difficulty,
            })
        })
        .collect()
}

/// Generates flashcards through a [`GenerationBackend`].
pub struct FlashcardGenerator {
    backend: Arc<dyn GenerationBackend>,
}

impl FlashcardGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl FlashcardProvider for FlashcardGenerator {
    #[instrument(skip(self, topic), fields(subsystem = "inference", component = "flashcards", op = "generate_flashcards", topic = %topic, model = %self.backend.model_name()))]
    async fn generate_flashcards(
        &self,
        topic: &SearchTopic,
        card_count: usize,
    ) -> Result<Vec<Flashcard>> {
        let card_count = card_count.max(1);
        let prompt = flashcard_prompt(topic, card_count);
        let raw = self
            .backend
            .generate_with_system(JSON_ONLY_SYSTEM, &prompt)
            .await?;

        let parsed: Vec<RawFlashcard> = parse_json_lenient(&raw)?;
        let cards = validate_flashcards(parsed, card_count)?;
        debug!(result_count = cards.len(), "Flashcards validated");
        Ok(cards)
    }

    fn name(&self) -> &str {
        "llm-flashcards"
    }
}
