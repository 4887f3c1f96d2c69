//! Note generation service.
//!
//! Validates the form fields for each source type, asks the note provider for
//! structured content and wraps the result into a [`StudyNote`]. Provider
//! failures are absorbed by the fallback policy; only missing fields reach
//! the caller.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use studyhub_core::{
    timestamp_id, Error, NoteProvider, NoteRequest, Result, SourceType, StudyNote,
};
use studyhub_inference::{backend_from_env, NoteGenerator};
use studyhub_search::with_fallback;

use crate::placeholders::placeholder_notes;

fn require<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed)
}

/// Extract the video id from the common YouTube URL shapes.
pub fn youtube_video_id(url: &str) -> Option<String> {
    let query_id = url
        .split_once('?')
        .and_then(|(_, query)| query.split('&').find_map(|pair| pair.strip_prefix("v=")));
    let candidate = query_id
        .or_else(|| path_segment_after(url, "youtu.be/"))
        .or_else(|| path_segment_after(url, "/embed/"))?;

    let id: String = candidate
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    (!id.is_empty()).then_some(id)
}

fn path_segment_after<'a>(url: &'a str, marker: &str) -> Option<&'a str> {
    url.find(marker).map(|i| &url[i + marker.len()..])
}

fn tags_for(source_type: SourceType) -> Vec<String> {
    let tags: &[&str] = match source_type {
        SourceType::Video => &["video", "education", "notes"],
        SourceType::Article => &["article", "research", "notes"],
        SourceType::Document => &["pdf", "document", "notes"],
    };
    tags.iter().map(|t| t.to_string()).collect()
}

/// Turns videos, articles and documents into study notes.
pub struct NoteService {
    provider: Arc<dyn NoteProvider>,
}

impl NoteService {
    pub fn new(provider: Arc<dyn NoteProvider>) -> Self {
        Self { provider }
    }

    /// Use the generation backend selected by the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(NoteGenerator::new(backend_from_env()?))))
    }

    /// Notes for a video, referenced by URL.
    pub async fn analyze_video(&self, video_url: &str, title: &str) -> Result<StudyNote> {
        let url = require(video_url, "video URL")?;
        let title = require(title, "title")?;
        let source_id = youtube_video_id(url)
            .unwrap_or_else(|| timestamp_id("video", Utc::now()));

        self.analyze(
            NoteRequest {
                source_type: SourceType::Video,
                title: title.to_string(),
                source_url: Some(url.to_string()),
                content: None,
            },
            source_id,
        )
        .await
    }

    /// Notes for pasted article text.
    pub async fn analyze_article(
        &self,
        content: &str,
        title: &str,
        source_url: Option<&str>,
    ) -> Result<StudyNote> {
        let content = require(content, "article content")?;
        let title = require(title, "title")?;
        let source_url = source_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        self.analyze(
            NoteRequest {
                source_type: SourceType::Article,
                title: title.to_string(),
                source_url,
                content: Some(content.to_string()),
            },
            timestamp_id("article", Utc::now()),
        )
        .await
    }

    /// Notes for a document (PDF), referenced by URL.
    pub async fn analyze_document(&self, document_url: &str, title: &str) -> Result<StudyNote> {
        let url = require(document_url, "document")?;
        let title = require(title, "title")?;

        self.analyze(
            NoteRequest {
                source_type: SourceType::Document,
                title: title.to_string(),
                source_url: Some(url.to_string()),
                content: None,
            },
            timestamp_id("doc", Utc::now()),
        )
        .await
    }

    #[instrument(skip(self, request), fields(subsystem = "notes", component = "service", op = "analyze", source_type = request.source_type.as_str()))]
    async fn analyze(&self, request: NoteRequest, source_id: String) -> Result<StudyNote> {
        let source_type = request.source_type;
        let content = with_fallback(
            self.provider.name(),
            self.provider.generate_notes(&request),
            || placeholder_notes(source_type, &request.title),
        )
        .await;

        let now = Utc::now();
        let note = StudyNote {
            id: timestamp_id("notes", now),
            title: format!("Notes: {}", request.title),
            source_type,
            source_id,
            source_url: request.source_url,
            created_at: now,
            updated_at: now,
            tags: tags_for(source_type),
            content,
        };

        info!(
            note_id = %note.id,
            key_points = note.content.key_points.len(),
            sections = note.content.sections.len(),
            "Study note ready"
        );
        Ok(note)
    }
}
