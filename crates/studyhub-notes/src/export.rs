//! Study note export.
//!
//! Plain text and Markdown are rendered here. PDF and DOCX need a document
//! rendering engine, which is plugged in through [`DocumentRenderer`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use studyhub_core::{Error, NoteSection, Result, StudyNote};

// =============================================================================
// FORMATS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Md,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Md => "md",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain",
            ExportFormat::Md => "text/markdown",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "md" | "markdown" => Ok(ExportFormat::Md),
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(Error::InvalidInput(format!(
                "unknown export format '{}'",
                other
            ))),
        }
    }
}

/// A rendered note ready to be saved or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedNote {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders notes into binary document formats (PDF, DOCX).
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, note: &StudyNote, format: ExportFormat) -> Result<Vec<u8>>;
}

/// `<title>.<ext>` with every character outside `[A-Za-z0-9]` replaced by `_`.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.{}", stem, format.extension())
}

// =============================================================================
// EXPORTER
// =============================================================================

#[derive(Default, Clone)]
pub struct NoteExporter {
    renderer: Option<Arc<dyn DocumentRenderer>>,
}

impl NoteExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    #[instrument(skip_all, fields(subsystem = "notes", component = "export", op = "export", note_id = %note.id, format = %format))]
    pub fn export(&self, note: &StudyNote, format: ExportFormat) -> Result<ExportedNote> {
        let bytes = match format {
            ExportFormat::Txt => render_text(note).into_bytes(),
            ExportFormat::Md => render_markdown(note).into_bytes(),
            ExportFormat::Pdf | ExportFormat::Docx => match &self.renderer {
                Some(renderer) => renderer.render(note, format)?,
                None => {
                    return Err(Error::Unsupported(format!(
                        "{} export requires a document renderer",
                        format
                    )))
                }
            },
        };
        debug!(bytes = bytes.len(), "Note exported");

        Ok(ExportedNote {
            filename: export_filename(&note.title, format),
            mime_type: format.mime_type(),
            bytes,
        })
    }
}

// =============================================================================
// TEMPLATES
// =============================================================================

fn generated_on(note: &StudyNote) -> String {
    note.created_at.format("%Y-%m-%d").to_string()
}

fn suffix(timestamp: Option<&String>, page_reference: Option<&String>) -> String {
    let mut out = String::new();
    if let Some(ts) = timestamp {
        out.push_str(&format!(" ({})", ts));
    }
    if let Some(page) = page_reference {
        out.push_str(&format!(" [{}]", page));
    }
    out
}

fn markdown_sections(sections: &[NoteSection], level: usize, out: &mut Vec<String>) {
    for section in sections {
        let hashes = "#".repeat(level.min(6));
        out.push(format!("{} {}\n{}", hashes, section.title, section.content));
        markdown_sections(&section.subsections, level + 1, out);
    }
}

fn text_sections(sections: &[NoteSection], top_level: bool, out: &mut Vec<String>) {
    for section in sections {
        let heading = if top_level {
            section.title.to_uppercase()
        } else {
            section.title.clone()
        };
        out.push(format!("{}\n{}", heading, section.content));
        text_sections(&section.subsections, false, out);
    }
}

/// Markdown rendering of a note.
pub fn render_markdown(note: &StudyNote) -> String {
    let c = &note.content;
    let mut blocks = vec![
        format!("# {}", note.title),
        format!("*Generated on: {}*", generated_on(note)),
        format!("## Summary\n{}", c.summary),
    ];

    let key_points: Vec<String> = c
        .key_points
        .iter()
        .enumerate()
        .map(|(i, kp)| {
            format!(
                "{}. **{}**{}",
                i + 1,
                kp.text,
                suffix(kp.timestamp.as_ref(), kp.page_reference.as_ref())
            )
        })
        .collect();
    blocks.push(format!("## Key Points\n{}", key_points.join("\n")));

    let definitions: Vec<String> = c
        .definitions
        .iter()
        .map(|d| format!("**{}**: {}", d.term, d.definition))
        .collect();
    blocks.push(format!("## Definitions\n{}", definitions.join("\n\n")));

    if let Some(timestamps) = c.timestamps.as_ref().filter(|t| !t.is_empty()) {
        let lines: Vec<String> = timestamps
            .iter()
            .map(|t| format!("- {}: {}", t.time, t.description))
            .collect();
        blocks.push(format!("## Timestamps\n{}", lines.join("\n")));
    }

    if let Some(quotes) = c.quotes.as_ref().filter(|q| !q.is_empty()) {
        let lines: Vec<String> = quotes
            .iter()
            .map(|q| {
                format!(
                    "> \"{}\" - {}{}",
                    q.text,
                    q.source,
                    suffix(None, q.page_reference.as_ref())
                )
            })
            .collect();
        blocks.push(format!("## Key Quotes\n{}", lines.join("\n\n")));
    }

    let mut sections = Vec::new();
    markdown_sections(&c.sections, 3, &mut sections);
    let mut detailed = String::from("## Detailed Notes");
    if !sections.is_empty() {
        detailed.push('\n');
        detailed.push_str(&sections.join("\n\n"));
    }
    blocks.push(detailed);

    blocks.join("\n\n") + "\n"
}

/// Plain-text rendering of a note.
pub fn render_text(note: &StudyNote) -> String {
    let c = &note.content;
    let mut blocks = vec![
        format!("{}\nGenerated on: {}", note.title, generated_on(note)),
        format!("SUMMARY\n{}", c.summary),
    ];

    let key_points: Vec<String> = c
        .key_points
        .iter()
        .enumerate()
        .map(|(i, kp)| {
            format!(
                "{}. {}{}",
                i + 1,
                kp.text,
                suffix(kp.timestamp.as_ref(), kp.page_reference.as_ref())
            )
        })
        .collect();
    blocks.push(format!("KEY POINTS\n{}", key_points.join("\n")));

    let definitions: Vec<String> = c
        .definitions
        .iter()
        .map(|d| format!("{}: {}", d.term, d.definition))
        .collect();
    blocks.push(format!("DEFINITIONS\n{}", definitions.join("\n")));

    if let Some(timestamps) = c.timestamps.as_ref().filter(|t| !t.is_empty()) {
        let lines: Vec<String> = timestamps
            .iter()
            .map(|t| format!("{}: {}", t.time, t.description))
            .collect();
        blocks.push(format!("TIMESTAMPS\n{}", lines.join("\n")));
    }

    if let Some(quotes) = c.quotes.as_ref().filter(|q| !q.is_empty()) {
        let lines: Vec<String> = quotes
            .iter()
            .map(|q| {
                format!(
                    "\"{}\" - {}{}",
                    q.text,
                    q.source,
                    suffix(None, q.page_reference.as_ref())
                )
            })
            .collect();
        blocks.push(format!("KEY QUOTES\n{}", lines.join("\n")));
    }

    let mut sections = Vec::new();
    text_sections(&c.sections, true, &mut sections);
    let mut detailed = String::from("DETAILED NOTES");
    if !sections.is_empty() {
        detailed.push('\n');
        detailed.push_str(&sections.join("\n\n"));
    }
    blocks.push(detailed);

    blocks.join("\n\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use studyhub_core::{
        Definition, Importance, KeyPoint, NoteContent, Quote, SourceType, Timestamp,
    };

    fn note(content: NoteContent) -> StudyNote {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        StudyNote {
            id: "notes-1".to_string(),
            title: "Notes: Eigen Values!".to_string(),
            source_type: SourceType::Video,
            source_id: "abc".to_string(),
            source_url: None,
            created_at: at,
            updated_at: at,
            tags: vec![],
            content,
        }
    }

    fn kp(text: &str, timestamp: Option<&str>, page: Option<&str>) -> KeyPoint {
        KeyPoint {
            id: "kp".to_string(),
            text: text.to_string(),
            importance: Importance::High,
            timestamp: timestamp.map(str::to_string),
            page_reference: page.map(str::to_string),
        }
    }

    fn minimal() -> NoteContent {
        NoteContent {
            summary: "Short summary".to_string(),
            key_points: vec![kp("First", None, None), kp("Second", Some("2:15"), None)],
            definitions: vec![Definition {
                term: "Eigenvector".to_string(),
                definition: "A vector only scaled by the map".to_string(),
            }],
            timestamps: None,
            quotes: None,
            sections: vec![],
        }
    }

    #[test]
    fn test_markdown_minimal_note() {
        let md = render_markdown(&note(minimal()));

        let numbered: Vec<&str> = md
            .lines()
            .filter(|l| l.starts_with(|c: char| c.is_ascii_digit()) && l.contains(". **"))
            .collect();
        assert_eq!(numbered, vec!["1. **First**", "2. **Second** (2:15)"]);

        let definitions: Vec<&str> = md.lines().filter(|l| l.starts_with("**")).collect();
        assert_eq!(definitions, vec!["**Eigenvector**: A vector only scaled by the map"]);

        assert!(md.contains("## Key Points"));
        assert!(md.contains("## Definitions"));
        assert!(!md.contains("Key Quotes"));
        assert!(!md.contains("## Timestamps"));
        assert!(md.contains("*Generated on: 2024-03-09*"));
    }

    #[test]
    fn test_markdown_optional_sections_and_nesting() {
        let mut content = minimal();
        content.key_points = vec![kp("Cited", None, Some("Page 4"))];
        content.timestamps = Some(vec![Timestamp {
            time: "0:00".to_string(),
            description: "Intro".to_string(),
        }]);
        content.quotes = Some(vec![Quote {
            id: "quote-1".to_string(),
            text: "Matrices are maps".to_string(),
            source: "Strang".to_string(),
            timestamp: None,
            page_reference: Some("Page 2".to_string()),
        }]);
        content.sections = vec![NoteSection {
            id: "sec-1".to_string(),
            title: "Basics".to_string(),
            content: "Body".to_string(),
            timestamp: None,
            subsections: vec![NoteSection {
                id: "sec-1-1".to_string(),
                title: "Detail".to_string(),
                content: "Inner".to_string(),
                timestamp: None,
                subsections: vec![],
            }],
        }];

        let md = render_markdown(&note(content));
        assert!(md.contains("1. **Cited** [Page 4]"));
        assert!(md.contains("## Timestamps\n- 0:00: Intro"));
        assert!(md.contains("## Key Quotes\n> \"Matrices are maps\" - Strang [Page 2]"));
        assert!(md.contains("### Basics\nBody"));
        assert!(md.contains("#### Detail\nInner"));
    }

    #[test]
    fn test_empty_optional_sections_omitted() {
        let mut content = minimal();
        content.timestamps = Some(vec![]);
        content.quotes = Some(vec![]);
        let md = render_markdown(&note(content.clone()));
        assert!(!md.contains("## Timestamps"));
        assert!(!md.contains("## Key Quotes"));
        let txt = render_text(&note(content));
        assert!(!txt.contains("TIMESTAMPS"));
        assert!(!txt.contains("KEY QUOTES"));
    }

    #[test]
    fn test_text_layout() {
        let mut content = minimal();
        content.sections = vec![NoteSection {
            id: "sec-1".to_string(),
            title: "Basics".to_string(),
            content: "Body".to_string(),
            timestamp: None,
            subsections: vec![],
        }];
        let txt = render_text(&note(content));
        assert!(txt.starts_with("Notes: Eigen Values!\nGenerated on: 2024-03-09\n"));
        assert!(txt.contains("KEY POINTS\n1. First\n2. Second (2:15)"));
        assert!(txt.contains("DEFINITIONS\nEigenvector: A vector only scaled by the map"));
        assert!(txt.contains("DETAILED NOTES\nBASICS\nBody"));
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            export_filename("Notes: Eigen Values!", ExportFormat::Md),
            "notes__eigen_values_.md"
        );
        assert_eq!(export_filename("Ça va", ExportFormat::Txt), "_a_va.txt");
    }

    #[test]
    fn test_export_text_formats() {
        let exporter = NoteExporter::new();
        let exported = exporter.export(&note(minimal()), ExportFormat::Txt).unwrap();
        assert_eq!(exported.mime_type, "text/plain");
        assert_eq!(exported.filename, "notes__eigen_values_.txt");
        assert!(String::from_utf8(exported.bytes).unwrap().contains("SUMMARY"));
    }

    #[test]
    fn test_pdf_without_renderer_unsupported() {
        let err = NoteExporter::new()
            .export(&note(minimal()), ExportFormat::Pdf)
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    struct StubRenderer;

    impl DocumentRenderer for StubRenderer {
        fn render(&self, note: &StudyNote, format: ExportFormat) -> Result<Vec<u8>> {
            Ok(format!("{}:{}", format, note.id).into_bytes())
        }
    }

    #[test]
    fn test_docx_delegates_to_renderer() {
        let exporter = NoteExporter::new().with_renderer(Arc::new(StubRenderer));
        let exported = exporter.export(&note(minimal()), ExportFormat::Docx).unwrap();
        assert_eq!(exported.bytes, b"docx:notes-1".to_vec());
        assert_eq!(exported.filename, "notes__eigen_values_.docx");
        assert!(exported.mime_type.ends_with("wordprocessingml.document"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Md);
        assert_eq!("markdown".parse::<ExportFormat>().unwrap(), ExportFormat::Md);
        assert!("rtf".parse::<ExportFormat>().is_err());
    }
}
