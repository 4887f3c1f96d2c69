//! Aggregation orchestrator: one topic in, one fully shaped bundle out.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, instrument};

use studyhub_core::{
    timestamp_id, ArticleProvider, FlashcardProvider, PaperProvider, QuizProvider, Result,
    SearchResultBundle, SearchTopic, VideoProvider,
};
use studyhub_inference::{backend_from_env, FlashcardGenerator, QuizGenerator};

use crate::articles::ArticleSearchProvider;
use crate::config::SearchConfig;
use crate::fallback::with_fallback;
use crate::papers::PaperSearchProvider;
use crate::placeholders::{
    placeholder_articles, placeholder_flashcards, placeholder_papers, placeholder_quiz,
    placeholder_videos,
};
use crate::youtube::YouTubeProvider;

/// The five adapters a search fans out to.
#[derive(Clone)]
pub struct SearchProviders {
    pub videos: Arc<dyn VideoProvider>,
    pub articles: Arc<dyn ArticleProvider>,
    pub papers: Arc<dyn PaperProvider>,
    pub quiz: Arc<dyn QuizProvider>,
    pub flashcards: Arc<dyn FlashcardProvider>,
}

impl SearchProviders {
    /// Build the live adapters from environment configuration.
    ///
    /// Missing credentials do not fail here; the affected adapter reports
    /// them per call and its placeholder is used.
    pub fn from_env() -> Result<Self> {
        let backend = backend_from_env()?;
        Ok(Self {
            videos: Arc::new(YouTubeProvider::from_env()?),
            articles: Arc::new(ArticleSearchProvider::from_env()?),
            papers: Arc::new(PaperSearchProvider::from_env()?),
            quiz: Arc::new(QuizGenerator::new(backend.clone())),
            flashcards: Arc::new(FlashcardGenerator::new(backend)),
        })
    }
}

/// Runs a search in two waves.
///
/// Wave 1 issues the video, article and paper searches together; wave 2
/// issues quiz and flashcard generation together once wave 1 has settled.
/// Both waves run inside the caller's task. Each call is wrapped in the
/// fallback policy; the generation calls are retried on rate limiting first.
pub struct SearchOrchestrator {
    providers: SearchProviders,
    config: SearchConfig,
}

impl SearchOrchestrator {
    pub fn new(providers: SearchProviders, config: SearchConfig) -> Self {
        Self { providers, config }
    }

    pub fn from_env() -> Result<Self> {
        let config = SearchConfig::from_env();
        let providers = SearchProviders::from_env()?;
        info!(
            videos = providers.videos.name(),
            articles = providers.articles.name(),
            papers = providers.papers.name(),
            "Search orchestrator ready"
        );
        Ok(Self::new(providers, config))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `raw_topic` and assemble a bundle.
    ///
    /// Only an empty topic is an error; every provider failure is replaced
    /// by placeholder content.
    #[instrument(skip(self), fields(subsystem = "search", component = "orchestrator", op = "search"))]
    pub async fn search(&self, raw_topic: &str) -> Result<SearchResultBundle> {
        let topic = SearchTopic::parse(raw_topic)?;
        let started = Instant::now();
        let p = &self.providers;
        let n = self.config.max_results;

        let (videos, articles, papers) = tokio::join!(
            with_fallback(
                p.videos.name(),
                p.videos.search_videos(&topic, n),
                || placeholder_videos(&topic),
            ),
            with_fallback(
                p.articles.name(),
                p.articles.search_articles(&topic, n),
                || placeholder_articles(&topic),
            ),
            with_fallback(
                p.papers.name(),
                p.papers.search_papers(&topic, n),
                || placeholder_papers(&topic),
            ),
        );
        debug!(
            videos = videos.len(),
            articles = articles.len(),
            papers = papers.len(),
            "Search wave complete"
        );

        // Live and placeholder content share the configured counts.
        let retry = self.config.retry;
        let level = self.config.quiz_level;
        let questions = self.config.question_count;
        let cards = self.config.flashcard_count;
        let (quiz, flashcards) = tokio::join!(
            with_fallback(
                p.quiz.name(),
                retry.run("generate_quiz", || p.quiz.generate_quiz(&topic, level, questions)),
                || placeholder_quiz(&topic, questions),
            ),
            with_fallback(
                p.flashcards.name(),
                retry.run("generate_flashcards", || {
                    p.flashcards.generate_flashcards(&topic, cards)
                }),
                || placeholder_flashcards(&topic, cards),
            ),
        );

        let now = Utc::now();
        let bundle = SearchResultBundle {
            id: timestamp_id("search", now),
            topic: topic.to_string(),
            created_at: now,
            videos,
            articles,
            papers,
            quiz,
            flashcards,
        };

        info!(
            topic = %topic,
            bundle_id = %bundle.id,
            duration_ms = started.elapsed().as_millis() as u64,
            result_count = bundle.videos.len() + bundle.articles.len() + bundle.papers.len(),
            "Search complete"
        );
        Ok(bundle)
    }
}
