//! Article adapter backed by the Google Custom Search JSON API.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use studyhub_core::{defaults, ArticleProvider, ArticleResult, Error, Result, SearchTopic};

use crate::format::read_time_label;
use crate::http::{build_client, clamp_max_results, send_json};

/// Custom Search returns at most ten results per page.
const PAGE_LIMIT: usize = 10;

/// Configuration for the article adapter.
#[derive(Debug, Clone)]
pub struct ArticleSearchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Programmable search engine id (`cx`).
    pub engine_id: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ArticleSearchConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::GOOGLE_SEARCH_URL.to_string(),
            api_key: None,
            engine_id: None,
            timeout_seconds: defaults::PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl ArticleSearchConfig {
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            base_url: std::env::var("GOOGLE_SEARCH_BASE_URL")
                .unwrap_or_else(|_| defaults::GOOGLE_SEARCH_URL.to_string()),
            api_key: non_empty("GOOGLE_SEARCH_API_KEY"),
            engine_id: non_empty("GOOGLE_SEARCH_ENGINE_ID"),
            timeout_seconds: defaults::env_or(
                "STUDYHUB_PROVIDER_TIMEOUT_SECS",
                defaults::PROVIDER_TIMEOUT_SECS,
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    title: String,
    link: String,
    #[serde(default)]
    display_link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    pagemap: Option<PageMap>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMap {
    #[serde(default)]
    metatags: Vec<HashMap<String, Value>>,
}

impl SearchItem {
    fn meta(&self, key: &str) -> Option<&str> {
        self.pagemap
            .as_ref()?
            .metatags
            .iter()
            .find_map(|tags| tags.get(key)?.as_str())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn into_result(self, index: usize) -> ArticleResult {
        let source = self
            .meta("og:site_name")
            .map(str::to_string)
            .unwrap_or_else(|| self.display_link.clone());
        let author = self
            .meta("author")
            .or_else(|| self.meta("article:author"))
            .unwrap_or("Unknown author")
            .to_string();
        let published_at = self
            .meta("article:published_time")
            .and_then(|raw| raw.get(..10))
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok());
        let summary = if self.snippet.trim().is_empty() {
            self.meta("og:description").unwrap_or_default().to_string()
        } else {
            self.snippet.trim().to_string()
        };

        ArticleResult {
            id: format!("article-{}", index + 1),
            read_time_label: read_time_label(&summary),
            title: self.title,
            source,
            author,
            published_at,
            url: self.link,
            summary,
        }
    }
}

/// Article adapter.
pub struct ArticleSearchProvider {
    client: Client,
    config: ArticleSearchConfig,
}

impl ArticleSearchProvider {
    pub fn new(config: ArticleSearchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            config,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ArticleSearchConfig::from_env())
    }
}

#[async_trait]
impl ArticleProvider for ArticleSearchProvider {
    #[instrument(skip(self, topic), fields(subsystem = "search", component = "articles", op = "search_articles", topic = %topic))]
    async fn search_articles(
        &self,
        topic: &SearchTopic,
        max_results: usize,
    ) -> Result<Vec<ArticleResult>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingCredential("GOOGLE_SEARCH_API_KEY".to_string()))?;
        let engine_id = self
            .config
            .engine_id
            .as_deref()
            .ok_or_else(|| Error::MissingCredential("GOOGLE_SEARCH_ENGINE_ID".to_string()))?;

        let query = format!("{} {}", topic, defaults::ARTICLE_QUERY_SUFFIX);
        let num = clamp_max_results(max_results).min(PAGE_LIMIT).to_string();
        let request = self.client.get(&self.config.base_url).query(&[
            ("key", api_key),
            ("cx", engine_id),
            ("q", query.as_str()),
            ("num", num.as_str()),
        ]);
        let response: SearchResponse = send_json(request).await?;

        let articles: Vec<ArticleResult> = response
            .items
            .into_iter()
            .enumerate()
            .map(|(i, item)| item.into_result(i))
            .collect();

        debug!(result_count = articles.len(), "Article search complete");
        Ok(articles)
    }

    fn name(&self) -> &str {
        "google-custom-search"
    }
}
