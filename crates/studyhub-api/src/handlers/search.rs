use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use studyhub_core::SearchResultBundle;

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub topic: String,
}

/// Run a search; the topic is added to the recent-search history once the
/// bundle is complete.
pub async fn search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResultBundle>, ApiError> {
    let bundle = state.search.search(&body.topic).await?;

    let recent = state.progress.lock().await.record_search(&bundle.topic).await?;
    debug!(recent = recent.len(), "Recent searches updated");

    Ok(Json(bundle))
}

pub async fn recent_searches(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let recent = state.progress.lock().await.recent_searches().await?;
    Ok(Json(recent))
}
