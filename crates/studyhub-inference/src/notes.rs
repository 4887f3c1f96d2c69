//! Study-note generation adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use studyhub_core::{
    defaults, Definition, Error, GenerationBackend, Importance, KeyPoint, NoteContent,
    NoteProvider, NoteRequest, NoteSection, Quote, Result, Timestamp,
};

use crate::parse::parse_json_lenient;
use crate::prompts::{note_prompt, JSON_ONLY_SYSTEM};

// =============================================================================
// RAW MODEL OUTPUT
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNoteContent {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<RawKeyPoint>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub timestamps: Option<Vec<Timestamp>>,
    #[serde(default)]
    pub quotes: Option<Vec<RawQuote>>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKeyPoint {
    pub text: String,
    #[serde(default)]
    pub importance: String,
    pub timestamp: Option<String>,
    pub page_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuote {
    pub text: String,
    #[serde(default)]
    pub source: String,
    pub timestamp: Option<String>,
    pub page_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub timestamp: Option<String>,
    #[serde(default)]
    pub subsections: Vec<RawSection>,
}

/// Unknown or missing importance reads as medium.
fn parse_importance(raw: &str) -> Importance {
    match raw.trim().to_ascii_lowercase().as_str() {
        "high" => Importance::High,
        "low" => Importance::Low,
        _ => Importance::Medium,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn convert_section(raw: RawSection, id: String) -> NoteSection {
    let subsections = raw
        .subsections
        .into_iter()
        .enumerate()
        .map(|(i, s)| convert_section(s, format!("{}-{}", id, i + 1)))
        .collect();
    NoteSection {
        id,
        title: raw.title,
        content: raw.content,
        timestamp: non_blank(raw.timestamp),
        subsections,
    }
}

/// Validate model notes and convert them to [`NoteContent`].
///
/// Requires a non-empty summary and at least one key point; sections deeper
/// than [`defaults::NOTE_SECTION_DEPTH`] are cut off.
pub fn validate_notes(raw: RawNoteContent) -> Result<NoteContent> {
    if raw.summary.trim().is_empty() {
        return Err(Error::Validation("notes have no summary".to_string()));
    }

    let key_points: Vec<KeyPoint> = raw
        .key_points
        .into_iter()
        .filter(|kp| !kp.text.trim().is_empty())
        .enumerate()
        .map(|(i, kp)| KeyPoint {
            id: format!("kp-{}", i + 1),
            text: kp.text.trim().to_string(),
            importance: parse_importance(&kp.importance),
            timestamp: non_blank(kp.timestamp),
            page_reference: non_blank(kp.page_reference),
        })
        .collect();
    if key_points.is_empty() {
        return Err(Error::Validation("notes have no key points".to_string()));
    }

    let definitions = raw
        .definitions
        .into_iter()
        .filter(|d| !d.term.trim().is_empty())
        .collect();

    let quotes = raw.quotes.map(|quotes| {
        quotes
            .into_iter()
            .enumerate()
            .map(|(i, q)| Quote {
                id: format!("quote-{}", i + 1),
                text: q.text,
                source: q.source,
                timestamp: non_blank(q.timestamp),
                page_reference: non_blank(q.page_reference),
            })
            .collect()
    });

    let sections = raw
        .sections
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            convert_section(s, format!("sec-{}", i + 1)).truncated(defaults::NOTE_SECTION_DEPTH)
        })
        .collect();

    Ok(NoteContent {
        summary: raw.summary.trim().to_string(),
        key_points,
        definitions,
        timestamps: raw.timestamps,
        quotes,
        sections,
    })
}

/// Generates note content through a [`GenerationBackend`].
pub struct NoteGenerator {
    backend: Arc<dyn GenerationBackend>,
}

impl NoteGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl NoteProvider for NoteGenerator {
    #[instrument(skip(self, request), fields(subsystem = "inference", component = "notes", op = "generate_notes", source_type = request.source_type.as_str(), model = %self.backend.model_name()))]
    async fn generate_notes(&self, request: &NoteRequest) -> Result<NoteContent> {
        let prompt = note_prompt(request);
        let raw = self
            .backend
            .generate_with_system(JSON_ONLY_SYSTEM, &prompt)
            .await?;

        let parsed: RawNoteContent = parse_json_lenient(&raw)?;
        let content = validate_notes(parsed)?;
        debug!(
            result_count = content.key_points.len(),
            sections = content.sections.len(),
            "Notes validated"
        );
        Ok(content)
    }

    fn name(&self) -> &str {
        "llm-notes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<NoteContent> {
        validate_notes(serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn test_minimal_notes() {
        let content = parse(r#"{"summary": "S", "keyPoints": [{"text": "K"}]}"#).unwrap();
        assert_eq!(content.key_points[0].id, "kp-1");
        assert_eq!(content.key_points[0].importance, Importance::Medium);
        assert!(content.quotes.is_none());
        assert!(content.timestamps.is_none());
    }

    #[test]
    fn test_blank_summary_rejected() {
        let err = parse(r#"{"summary": "  ", "keyPoints": [{"text": "K"}]}"#).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_no_key_points_rejected() {
        let err = parse(r#"{"summary": "S", "keyPoints": [{"text": ""}]}"#).unwrap_err();
        assert!(err.to_string().contains("no key points"));
    }

    #[test]
    fn test_sections_truncated_to_two_levels() {
        let content = parse(
            r#"{"summary": "S", "keyPoints": [{"text": "K", "importance": "HIGH"}],
                "sections": [{"title": "A", "content": "a",
                  "subsections": [{"title": "B", "content": "b",
                    "subsections": [{"title": "C", "content": "c"}]}]}]}"#,
        )
        .unwrap();
        let section = &content.sections[0];
        assert_eq!(section.id, "sec-1");
        assert_eq!(section.subsections[0].id, "sec-1-1");
        assert!(section.subsections[0].subsections.is_empty());
        assert_eq!(section.depth(), 2);
        assert_eq!(content.key_points[0].importance, Importance::High);
    }

    #[test]
    fn test_quotes_get_ids_and_blank_refs_dropped() {
        let content = parse(
            r#"{"summary": "S", "keyPoints": [{"text": "K"}],
                "quotes": [{"text": "q", "source": "src", "pageReference": " "}]}"#,
        )
        .unwrap();
        let quotes = content.quotes.unwrap();
        assert_eq!(quotes[0].id, "quote-1");
        assert!(quotes[0].page_reference.is_none());
    }
}
