//! Paper adapter backed by the Semantic Scholar Graph API.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use studyhub_core::{defaults, PaperProvider, PaperResult, Result, SearchTopic};

use crate::format::leading_sentences;
use crate::http::{build_client, clamp_max_results, send_json};

const PAPER_FIELDS: &str =
    "title,authors,year,publicationDate,venue,journal,externalIds,url,abstract,tldr";

/// Key findings taken from an abstract when no TLDR exists.
const ABSTRACT_FINDINGS: usize = 3;

/// Configuration for the paper adapter.
///
/// Semantic Scholar serves unauthenticated requests at a lower rate, so the
/// key is optional.
#[derive(Debug, Clone)]
pub struct PaperSearchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for PaperSearchConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::SEMANTIC_SCHOLAR_URL.to_string(),
            api_key: None,
            timeout_seconds: defaults::PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl PaperSearchConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SEMANTIC_SCHOLAR_BASE_URL")
                .unwrap_or_else(|_| defaults::SEMANTIC_SCHOLAR_URL.to_string()),
            api_key: std::env::var("SEMANTIC_SCHOLAR_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            timeout_seconds: defaults::env_or(
                "STUDYHUB_PROVIDER_TIMEOUT_SECS",
                defaults::PROVIDER_TIMEOUT_SECS,
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PaperSearchResponse {
    #[serde(default)]
    data: Vec<Paper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paper {
    paper_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: Vec<Author>,
    year: Option<i32>,
    publication_date: Option<String>,
    #[serde(default)]
    venue: String,
    journal: Option<Journal>,
    external_ids: Option<ExternalIds>,
    #[serde(default)]
    url: String,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    tldr: Option<Tldr>,
}

#[derive(Debug, Deserialize)]
struct Author {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct Journal {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Tldr {
    text: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Paper {
    fn into_result(self) -> PaperResult {
        let journal = non_empty(self.journal.and_then(|j| j.name))
            .or_else(|| non_empty(Some(self.venue)))
            .unwrap_or_else(|| "Unknown venue".to_string());

        let published_at = self
            .publication_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .or_else(|| self.year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)));

        let doi = non_empty(self.external_ids.and_then(|ids| ids.doi)).unwrap_or_default();
        let url = if doi.is_empty() {
            self.url
        } else {
            format!("https://doi.org/{}", doi)
        };

        let abstract_text = self.abstract_text.unwrap_or_default();
        let key_findings = match non_empty(self.tldr.and_then(|t| t.text)) {
            Some(tldr) => vec![tldr],
            None => leading_sentences(&abstract_text, ABSTRACT_FINDINGS),
        };

        PaperResult {
            id: self.paper_id,
            title: self.title,
            authors: self
                .authors
                .into_iter()
                .map(|a| a.name)
                .filter(|n| !n.is_empty())
                .collect(),
            journal,
            published_at,
            doi,
            url,
            abstract_text,
            key_findings,
        }
    }
}

/// Paper adapter.
pub struct PaperSearchProvider {
    client: Client,
    config: PaperSearchConfig,
}

impl PaperSearchProvider {
    pub fn new(config: PaperSearchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            config,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(PaperSearchConfig::from_env())
    }
}

#[async_trait]
impl PaperProvider for PaperSearchProvider {
    #[instrument(skip(self, topic), fields(subsystem = "search", component = "papers", op = "search_papers", topic = %topic))]
    async fn search_papers(
        &self,
        topic: &SearchTopic,
        max_results: usize,
    ) -> Result<Vec<PaperResult>> {
        let limit = clamp_max_results(max_results).to_string();
        let url = format!(
            "{}/paper/search",
            self.config.base_url.trim_end_matches('/')
        );

        let mut request = self.client.get(&url).query(&[
            ("query", topic.as_str()),
            ("limit", limit.as_str()),
            ("fields", PAPER_FIELDS),
        ]);
        if let Some(ref key) = self.config.api_key {
            request = request.header("x-api-key", key);
        }

        let response: PaperSearchResponse = send_json(request).await?;
        let papers: Vec<PaperResult> = response.data.into_iter().map(Paper::into_result).collect();

        debug!(result_count = papers.len(), "Paper search complete");
        Ok(papers)
    }

    fn name(&self) -> &str {
        "semantic-scholar"
    }
}
