//! # studyhub-search
//!
//! Provider adapters and the search orchestrator.
//!
//! A search fans out to the video, article and paper adapters, then to the
//! quiz and flashcard generators, and always returns a complete
//! [`SearchResultBundle`](studyhub_core::SearchResultBundle): any adapter that
//! fails is replaced by deterministic placeholder content templated with the
//! topic.
//!
//! ## Modules
//!
//! - [`youtube`], [`articles`], [`papers`]: live search adapters
//! - [`format`]: view-count, duration and read-time labels
//! - [`retry`]: exponential backoff on rate limiting
//! - [`fallback`] and [`placeholders`]: failure masking
//! - [`orchestrator`]: the two-wave search

pub mod articles;
pub mod config;
pub mod fallback;
pub mod format;
mod http;
pub mod orchestrator;
pub mod papers;
pub mod placeholders;
pub mod retry;
pub mod youtube;

pub use articles::{ArticleSearchConfig, ArticleSearchProvider};
pub use config::SearchConfig;
pub use fallback::with_fallback;
pub use http::clamp_max_results;
pub use orchestrator::{SearchOrchestrator, SearchProviders};
pub use papers::{PaperSearchConfig, PaperSearchProvider};
pub use retry::RetryPolicy;
pub use youtube::{YouTubeConfig, YouTubeProvider};
