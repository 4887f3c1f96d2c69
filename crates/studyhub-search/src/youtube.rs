//! Video adapter backed by the YouTube Data API v3.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use studyhub_core::{defaults, Error, Result, SearchTopic, VideoProvider, VideoResult};

use crate::format::{format_iso_duration, view_count_label};
use crate::http::{build_client, clamp_max_results, send_json};

/// Configuration for the YouTube adapter.
#[derive(Debug, Clone)]
pub struct YouTubeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::YOUTUBE_URL.to_string(),
            api_key: None,
            timeout_seconds: defaults::PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl YouTubeConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("YOUTUBE_BASE_URL")
                .unwrap_or_else(|_| defaults::YOUTUBE_URL.to_string()),
            api_key: std::env::var("YOUTUBE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            timeout_seconds: defaults::env_or(
                "STUDYHUB_PROVIDER_TIMEOUT_SECS",
                defaults::PROVIDER_TIMEOUT_SECS,
            ),
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    channel_title: String,
    published_at: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    id: String,
    content_details: Option<ContentDetails>,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

struct Enrichment {
    duration: String,
    views: String,
}

fn parse_published(raw: &str) -> Result<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d"))
        .map_err(|e| Error::MalformedResponse(format!("bad publishedAt '{}': {}", raw, e)))
}

/// Video adapter.
pub struct YouTubeProvider {
    client: Client,
    config: YouTubeConfig,
}

impl YouTubeProvider {
    pub fn new(config: YouTubeConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            config,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(YouTubeConfig::from_env())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    async fn enrich(&self, api_key: &str, ids: &[String]) -> Result<HashMap<String, Enrichment>> {
        let joined = ids.join(",");
        let request = self.client.get(self.url("/videos")).query(&[
            ("part", "contentDetails,statistics"),
            ("id", joined.as_str()),
            ("key", api_key),
        ]);
        let details: VideosResponse = send_json(request).await?;

        Ok(details
            .items
            .into_iter()
            .map(|d| {
                let duration = d
                    .content_details
                    .and_then(|c| format_iso_duration(&c.duration))
                    .unwrap_or_else(|| "0:00".to_string());
                let views = d
                    .statistics
                    .and_then(|s| s.view_count)
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(0);
                (
                    d.id,
                    Enrichment {
                        duration,
                        views: view_count_label(views),
                    },
                )
            })
            .collect())
    }
}

#[async_trait]
impl VideoProvider for YouTubeProvider {
    #[instrument(skip(self, topic), fields(subsystem = "search", component = "youtube", op = "search_videos", topic = %topic))]
    async fn search_videos(
        &self,
        topic: &SearchTopic,
        max_results: usize,
    ) -> Result<Vec<VideoResult>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingCredential("YOUTUBE_API_KEY".to_string()))?;
        let limit = clamp_max_results(max_results).to_string();

        let request = self.client.get(self.url("/search")).query(&[
            ("part", "snippet"),
            ("type", "video"),
            ("q", topic.as_str()),
            ("maxResults", limit.as_str()),
            ("key", api_key),
        ]);
        let search: SearchResponse = send_json(request).await?;

        let hits: Vec<(String, Snippet)> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id.map(|id| (id, item.snippet)))
            .collect();
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = hits.iter().map(|(id, _)| id.clone()).collect();
        let mut details = self.enrich(api_key, &ids).await?;

        let videos = hits
            .into_iter()
            .map(|(id, snippet)| {
                let enrichment = details.remove(&id);
                let thumbnails = snippet.thumbnails;
                let thumbnail_url = thumbnails
                    .high
                    .or(thumbnails.medium)
                    .or(thumbnails.default)
                    .map(|t| t.url)
                    .unwrap_or_default();
                Ok(VideoResult {
                    watch_url: format!("https://www.youtube.com/watch?v={}", id),
                    title: snippet.title,
                    channel_name: snippet.channel_title,
                    duration: enrichment
                        .as_ref()
                        .map(|e| e.duration.clone())
                        .unwrap_or_else(|| "0:00".to_string()),
                    view_count_label: enrichment
                        .map(|e| e.views)
                        .unwrap_or_else(|| view_count_label(0)),
                    published_at: parse_published(&snippet.published_at)?,
                    thumbnail_url,
                    description: snippet.description,
                    id,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(result_count = videos.len(), "Video search complete");
        Ok(videos)
    }

    fn name(&self) -> &str {
        "youtube"
    }
}
