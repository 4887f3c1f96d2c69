use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use studyhub_core::StudyNote;
use studyhub_notes::ExportFormat;

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoNotesRequest {
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub video_title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleNotesRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNotesRequest {
    #[serde(default)]
    pub document_url: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub note: StudyNote,
    pub format: String,
}

async fn keep(state: &AppState, note: StudyNote) -> Result<Json<StudyNote>, ApiError> {
    state.progress.lock().await.save_generated_note(&note).await?;
    Ok(Json(note))
}

pub async fn analyze_video(
    State(state): State<AppState>,
    Json(body): Json<VideoNotesRequest>,
) -> Result<Json<StudyNote>, ApiError> {
    let note = state
        .notes
        .analyze_video(&body.video_url, &body.video_title)
        .await?;
    keep(&state, note).await
}

pub async fn analyze_article(
    State(state): State<AppState>,
    Json(body): Json<ArticleNotesRequest>,
) -> Result<Json<StudyNote>, ApiError> {
    let note = state
        .notes
        .analyze_article(&body.content, &body.title, body.source_url.as_deref())
        .await?;
    keep(&state, note).await
}

pub async fn analyze_document(
    State(state): State<AppState>,
    Json(body): Json<DocumentNotesRequest>,
) -> Result<Json<StudyNote>, ApiError> {
    let note = state
        .notes
        .analyze_document(&body.document_url, &body.title)
        .await?;
    keep(&state, note).await
}

pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<StudyNote>>, ApiError> {
    let notes = state.progress.lock().await.generated_notes().await?;
    Ok(Json(notes))
}

/// Render a note and return it as a download.
pub async fn export_note(
    State(state): State<AppState>,
    Json(body): Json<ExportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let format: ExportFormat = body.format.parse()?;
    let exported = state.exporter.export(&body.note, format)?;

    Ok((
        [
            (header::CONTENT_TYPE, exported.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", exported.filename),
            ),
        ],
        exported.bytes,
    ))
}
