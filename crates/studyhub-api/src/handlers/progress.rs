use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use studyhub_core::{Bookmark, FreeNote, LearningPath, ProgressSnapshot, VideoNote};
use studyhub_store::{quiz_percentage, NewBookmark, NewFreeNote, NewVideoNote};

use crate::{ApiError, AppState};

// =============================================================================
// COMPLETION
// =============================================================================

pub async fn snapshot(State(state): State<AppState>) -> Result<Json<ProgressSnapshot>, ApiError> {
    let snapshot = state.progress.lock().await.snapshot().await?;
    Ok(Json(snapshot))
}

pub async fn complete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProgressSnapshot>, ApiError> {
    let progress = state.progress.lock().await;
    progress.mark_video_complete(&id).await?;
    Ok(Json(progress.snapshot().await?))
}

pub async fn complete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProgressSnapshot>, ApiError> {
    let progress = state.progress.lock().await;
    progress.mark_document_complete(&id).await?;
    Ok(Json(progress.snapshot().await?))
}

/// Either a percentage `score`, or `correct` out of `total` answers.
#[derive(Debug, Deserialize)]
pub struct QuizResultRequest {
    pub score: Option<u32>,
    pub correct: Option<usize>,
    pub total: Option<usize>,
}

pub async fn complete_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<QuizResultRequest>,
) -> Result<Json<ProgressSnapshot>, ApiError> {
    let score = match (body.score, body.correct, body.total) {
        (Some(score), _, _) => score,
        (None, Some(correct), Some(total)) => u32::from(quiz_percentage(correct, total)),
        _ => {
            return Err(ApiError::BadRequest(
                "score or correct and total are required".to_string(),
            ))
        }
    };

    let progress = state.progress.lock().await;
    progress.mark_quiz_complete(&id, score).await?;
    Ok(Json(progress.snapshot().await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathProgressResponse {
    pub path_id: String,
    pub progress: u8,
}

pub async fn path_progress(
    State(state): State<AppState>,
    Json(path): Json<LearningPath>,
) -> Result<Json<PathProgressResponse>, ApiError> {
    let progress = state.progress.lock().await.path_progress(&path).await?;
    Ok(Json(PathProgressResponse {
        path_id: path.id,
        progress,
    }))
}

// =============================================================================
// BOOKMARKS
// =============================================================================

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let bookmarks = state.progress.lock().await.bookmarks().await?;
    Ok(Json(bookmarks))
}

pub async fn add_bookmark(
    State(state): State<AppState>,
    Json(body): Json<NewBookmark>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    let bookmark = state.progress.lock().await.add_bookmark(body).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

pub async fn remove_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.progress.lock().await.remove_bookmark(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Bookmark {} not found", id)))
    }
}

// =============================================================================
// FREE-FORM AND VIDEO NOTES
// =============================================================================

pub async fn list_free_notes(State(state): State<AppState>) -> Result<Json<Vec<FreeNote>>, ApiError> {
    let notes = state.progress.lock().await.free_notes().await?;
    Ok(Json(notes))
}

pub async fn save_free_note(
    State(state): State<AppState>,
    Json(body): Json<NewFreeNote>,
) -> Result<(StatusCode, Json<FreeNote>), ApiError> {
    let note = state.progress.lock().await.save_free_note(body).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn list_video_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<VideoNote>>, ApiError> {
    let notes = state.progress.lock().await.video_notes().await?;
    Ok(Json(notes))
}

pub async fn save_video_note(
    State(state): State<AppState>,
    Json(body): Json<NewVideoNote>,
) -> Result<(StatusCode, Json<VideoNote>), ApiError> {
    let note = state.progress.lock().await.save_video_note(body).await?;
    Ok((StatusCode::CREATED, Json(note)))
}
