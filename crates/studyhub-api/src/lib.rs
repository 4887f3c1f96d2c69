//! # studyhub-api
//!
//! HTTP surface for studyhub: topic search, note generation and export,
//! progress tracking, bookmarks and saved notes.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use studyhub_core::defaults;
use studyhub_notes::{NoteExporter, NoteService};
use studyhub_search::SearchOrchestrator;
use studyhub_store::StudyProgress;

pub use error::ApiError;

/// Shared handler state.
///
/// Searches and note generation run without holding any lock; every write
/// to persisted state goes through the single `progress` mutex.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchOrchestrator>,
    pub notes: Arc<NoteService>,
    pub exporter: NoteExporter,
    pub progress: Arc<Mutex<StudyProgress>>,
}

impl AppState {
    pub fn new(
        search: SearchOrchestrator,
        notes: NoteService,
        exporter: NoteExporter,
        progress: StudyProgress,
    ) -> Self {
        Self {
            search: Arc::new(search),
            notes: Arc::new(notes),
            exporter,
            progress: Arc::new(Mutex::new(progress)),
        }
    }
}

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Parse a comma-separated origin allow-list (`ALLOWED_ORIGINS`).
///
/// Unset or blank falls back to the local development origins; entries that
/// are not valid header values are skipped with a warning.
pub fn parse_allowed_origins(raw: Option<&str>) -> Vec<HeaderValue> {
    let raw = raw.filter(|s| !s.trim().is_empty()).unwrap_or(DEFAULT_ORIGINS);

    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// Build the application router with middleware.
pub fn router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    use handlers::{notes, progress, search};

    Router::new()
        .route("/health", get(handlers::health))
        // Search
        .route("/api/v1/search", post(search::search))
        .route("/api/v1/search/recent", get(search::recent_searches))
        // Generated notes
        .route("/api/v1/notes", get(notes::list_notes))
        .route("/api/v1/notes/video", post(notes::analyze_video))
        .route("/api/v1/notes/article", post(notes::analyze_article))
        .route("/api/v1/notes/document", post(notes::analyze_document))
        .route("/api/v1/notes/export", post(notes::export_note))
        // Progress
        .route("/api/v1/progress", get(progress::snapshot))
        .route("/api/v1/progress/videos/:id", post(progress::complete_video))
        .route("/api/v1/progress/documents/:id", post(progress::complete_document))
        .route("/api/v1/progress/quizzes/:id", post(progress::complete_quiz))
        .route("/api/v1/progress/path", post(progress::path_progress))
        // Bookmarks and free-form notes
        .route(
            "/api/v1/bookmarks",
            get(progress::list_bookmarks).post(progress::add_bookmark),
        )
        .route("/api/v1/bookmarks/:id", delete(progress::remove_bookmark))
        .route(
            "/api/v1/study-notes",
            get(progress::list_free_notes).post(progress::save_free_note),
        )
        .route(
            "/api/v1/video-notes",
            get(progress::list_video_notes).post(progress::save_video_note),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .expose_headers([header::CONTENT_DISPOSITION])
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_BYTES))
        .with_state(state)
}
