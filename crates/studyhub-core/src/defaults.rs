//! Centralized default constants for studyhub.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers. Environment overrides are documented next to each constant.

// =============================================================================
// SEARCH
// =============================================================================

/// Results requested from each search provider (`STUDYHUB_MAX_RESULTS`).
pub const MAX_RESULTS: usize = 5;

/// Upper bound applied to any caller-supplied result count.
pub const MAX_RESULTS_CAP: usize = 25;

/// Per-request timeout for search providers (`STUDYHUB_PROVIDER_TIMEOUT_SECS`).
pub const PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Suffix appended to the topic for article searches.
pub const ARTICLE_QUERY_SUFFIX: &str = "blog article";

/// Reading speed used for article read-time labels.
pub const WORDS_PER_MINUTE: usize = 200;

/// Recent-search history length.
pub const RECENT_SEARCH_LIMIT: usize = 5;

// =============================================================================
// GENERATION
// =============================================================================

/// Exact number of questions a generated quiz must contain (`STUDYHUB_QUIZ_QUESTIONS`).
pub const QUIZ_QUESTION_COUNT: usize = 8;

/// Exact number of flashcards a generation must return (`STUDYHUB_FLASHCARDS`).
pub const FLASHCARD_COUNT: usize = 8;

/// Options per multiple-choice question.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// Maximum nesting of note sections (a section plus one level of subsections).
pub const NOTE_SECTION_DEPTH: usize = 2;

/// Timeout for generation requests (`STUDYHUB_GEN_TIMEOUT_SECS`).
pub const GEN_TIMEOUT_SECS: u64 = 60;

/// Default generation provider (`STUDYHUB_GEN_PROVIDER`).
pub const GEN_PROVIDER: &str = "gemini";

/// Default Gemini endpoint.
pub const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model.
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default OpenAI-compatible endpoint.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI-compatible generation model.
pub const OPENAI_GEN_MODEL: &str = "gpt-4o-mini";

// =============================================================================
// RETRY
// =============================================================================

/// Total attempts for a rate-limited generation call (`STUDYHUB_RETRY_MAX_ATTEMPTS`).
pub const RETRY_MAX_ATTEMPTS: u32 = 4;

/// First backoff delay; doubles per attempt (`STUDYHUB_RETRY_BASE_DELAY_MS`).
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

// =============================================================================
// PROVIDER ENDPOINTS
// =============================================================================

/// YouTube Data API v3.
pub const YOUTUBE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Google Custom Search JSON API.
pub const GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Semantic Scholar Graph API.
pub const SEMANTIC_SCHOLAR_URL: &str = "https://api.semanticscholar.org/graph/v1";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default directory for persisted client state (`STUDYHUB_DATA_DIR`).
pub const DATA_DIR: &str = "./studyhub-data";

/// Maximum accepted request body in bytes.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Read an environment variable and parse it, falling back to `default`.
pub fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_schedule_fits_attempts() {
        // 1s + 2s + 4s between four attempts
        let total: u64 = (0..RETRY_MAX_ATTEMPTS - 1)
            .map(|n| RETRY_BASE_DELAY_MS * 2u64.pow(n))
            .sum();
        assert_eq!(total, 7000);
    }

    #[test]
    fn test_max_results_within_cap() {
        assert!(MAX_RESULTS <= MAX_RESULTS_CAP);
    }

    #[test]
    fn test_env_or_uses_default_when_unset() {
        let v: usize = env_or("STUDYHUB_TEST_UNSET_VARIABLE", 7);
        assert_eq!(v, 7);
    }
}
