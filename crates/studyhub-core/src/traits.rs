//! Core traits for studyhub abstractions.
//!
//! Each provider trait wraps exactly one external capability. Concrete
//! implementations live in `studyhub-search` (search providers) and
//! `studyhub-inference` (generation backends and generators); they are
//! constructed once at startup and injected as `Arc<dyn Trait>`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;
use crate::topic::SearchTopic;

// =============================================================================
// GENERATION
// =============================================================================

/// Backend for LLM text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// SEARCH PROVIDERS
// =============================================================================

/// Video search capability.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    async fn search_videos(&self, topic: &SearchTopic, max_results: usize)
        -> Result<Vec<VideoResult>>;

    /// Human-readable provider name for logging.
    fn name(&self) -> &str;
}

/// Article search capability.
#[async_trait]
pub trait ArticleProvider: Send + Sync {
    async fn search_articles(
        &self,
        topic: &SearchTopic,
        max_results: usize,
    ) -> Result<Vec<ArticleResult>>;

    fn name(&self) -> &str;
}

/// Academic paper search capability.
#[async_trait]
pub trait PaperProvider: Send + Sync {
    async fn search_papers(&self, topic: &SearchTopic, max_results: usize)
        -> Result<Vec<PaperResult>>;

    fn name(&self) -> &str;
}

// =============================================================================
// GENERATED CONTENT PROVIDERS
// =============================================================================

/// Quiz generation capability. Implementations validate shape before
/// returning; a quiz without exactly `question_count` well-formed questions
/// is an error, never a partial value.
#[async_trait]
pub trait QuizProvider: Send + Sync {
    async fn generate_quiz(
        &self,
        topic: &SearchTopic,
        level: QuizLevel,
        question_count: usize,
    ) -> Result<Quiz>;

    fn name(&self) -> &str;
}

/// Flashcard generation capability. Returns exactly `card_count` cards.
#[async_trait]
pub trait FlashcardProvider: Send + Sync {
    async fn generate_flashcards(
        &self,
        topic: &SearchTopic,
        card_count: usize,
    ) -> Result<Vec<Flashcard>>;

    fn name(&self) -> &str;
}

/// Input for note generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRequest {
    pub source_type: SourceType,
    pub title: String,
    pub source_url: Option<String>,
    /// Raw text to analyse (articles); videos and documents are referenced by URL.
    pub content: Option<String>,
}

/// Structured-note generation capability.
#[async_trait]
pub trait NoteProvider: Send + Sync {
    async fn generate_notes(&self, request: &NoteRequest) -> Result<NoteContent>;

    fn name(&self) -> &str;
}
