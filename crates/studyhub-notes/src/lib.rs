//! # studyhub-notes
//!
//! Study notes: generation from videos, articles and documents, with
//! placeholder fallback, and export to text and Markdown.

pub mod export;
pub mod placeholders;
pub mod service;

pub use export::{
    export_filename, render_markdown, render_text, DocumentRenderer, ExportFormat, ExportedNote,
    NoteExporter,
};
pub use placeholders::placeholder_notes;
pub use service::{youtube_video_id, NoteService};
