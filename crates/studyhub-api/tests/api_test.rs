//! End-to-end API tests against a server on an ephemeral port.
//!
//! Every upstream provider is unavailable, so all content comes from the
//! placeholder templates.

use std::sync::Arc;

use serde_json::{json, Value};
use studyhub_api::{parse_allowed_origins, router, AppState};
use studyhub_inference::mock::MockGenerationBackend;
use studyhub_inference::{FlashcardGenerator, NoteGenerator, QuizGenerator};
use studyhub_notes::{NoteExporter, NoteService};
use studyhub_search::{
    ArticleSearchConfig, ArticleSearchProvider, PaperSearchConfig, PaperSearchProvider,
    SearchConfig, SearchOrchestrator, SearchProviders, YouTubeConfig, YouTubeProvider,
};
use studyhub_store::{MemoryStore, StudyProgress};
use wiremock::MockServer;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    _upstream: MockServer,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json(&self, path: &str, body: Value) -> reqwest::Response {
        self.client.post(self.url(path)).json(&body).send().await.unwrap()
    }

    async fn get_json(&self, path: &str) -> Value {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }
}

async fn spawn_app() -> TestApp {
    // No mocks mounted: every paper request answers 404.
    let upstream = MockServer::start().await;
    let failing = MockGenerationBackend::new().always_failing("model offline");

    let providers = SearchProviders {
        videos: Arc::new(YouTubeProvider::new(YouTubeConfig::default()).unwrap()),
        articles: Arc::new(ArticleSearchProvider::new(ArticleSearchConfig::default()).unwrap()),
        papers: Arc::new(
            PaperSearchProvider::new(PaperSearchConfig {
                base_url: upstream.uri(),
                ..Default::default()
            })
            .unwrap(),
        ),
        quiz: Arc::new(QuizGenerator::new(Arc::new(failing.clone()))),
        flashcards: Arc::new(FlashcardGenerator::new(Arc::new(failing.clone()))),
    };

    let state = AppState::new(
        SearchOrchestrator::new(providers, SearchConfig::default()),
        NoteService::new(Arc::new(NoteGenerator::new(Arc::new(failing)))),
        NoteExporter::new(),
        StudyProgress::new(Arc::new(MemoryStore::new())),
    );
    let app = router(state, parse_allowed_origins(None));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        _upstream: upstream,
    }
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;
    let body = app.get_json("/health").await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_search_returns_placeholder_bundle_and_records_topic() {
    let app = spawn_app().await;

    let response = app
        .post_json("/api/v1/search", json!({"topic": "  Linear Algebra "}))
        .await;
    assert_eq!(response.status(), 200);
    let bundle: Value = response.json().await.unwrap();

    assert_eq!(bundle["topic"], "Linear Algebra");
    assert!(bundle["id"].as_str().unwrap().starts_with("search-"));
    assert!(bundle["quiz"]["title"].as_str().unwrap().contains("Linear Algebra"));
    assert_eq!(bundle["quiz"]["questions"].as_array().unwrap().len(), 8);
    let cards = bundle["flashcards"].as_array().unwrap();
    assert_eq!(cards.len(), 8);
    for card in cards {
        assert!(card["front"].as_str().unwrap().contains("Linear Algebra"));
        assert!(card["back"].as_str().unwrap().contains("Linear Algebra"));
    }
    assert!(!bundle["papers"].as_array().unwrap().is_empty());

    let recent = app.get_json("/api/v1/search/recent").await;
    assert_eq!(recent, json!(["Linear Algebra"]));
}

#[tokio::test]
async fn test_empty_topic_is_bad_request() {
    let app = spawn_app().await;

    let response = app.post_json("/api/v1/search", json!({"topic": "   "})).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("topic"));

    assert_eq!(app.get_json("/api/v1/search/recent").await, json!([]));
}

#[tokio::test]
async fn test_note_generation_validation_and_listing() {
    let app = spawn_app().await;

    let response = app
        .post_json(
            "/api/v1/notes/video",
            json!({"videoUrl": "https://youtu.be/abc", "videoTitle": ""}),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .post_json(
            "/api/v1/notes/video",
            json!({"videoUrl": "https://youtu.be/abc", "videoTitle": "Vectors"}),
        )
        .await;
    assert_eq!(response.status(), 200);
    let note: Value = response.json().await.unwrap();
    assert_eq!(note["title"], "Notes: Vectors");
    assert_eq!(note["sourceType"], "video");
    assert_eq!(note["sourceId"], "abc");

    let response = app
        .post_json(
            "/api/v1/notes/article",
            json!({"content": "Article body.", "title": "Matrices"}),
        )
        .await;
    assert_eq!(response.status(), 200);

    let notes = app.get_json("/api/v1/notes").await;
    let notes = notes.as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["title"], "Notes: Matrices");
}

#[tokio::test]
async fn test_export_download_and_unsupported_format() {
    let app = spawn_app().await;

    let note: Value = app
        .post_json(
            "/api/v1/notes/document",
            json!({"documentUrl": "https://example.com/a.pdf", "title": "Survey"}),
        )
        .await
        .json()
        .await
        .unwrap();

    let response = app
        .post_json("/api/v1/notes/export", json!({"note": note, "format": "md"}))
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "text/markdown");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"notes__survey.md\""
    );
    let text = response.text().await.unwrap();
    assert!(text.starts_with("# Notes: Survey\n"));
    assert!(text.contains("## Key Quotes"));

    let response = app
        .post_json("/api/v1/notes/export", json!({"note": note, "format": "pdf"}))
        .await;
    assert_eq!(response.status(), 501);

    let response = app
        .post_json("/api/v1/notes/export", json!({"note": note, "format": "rtf"}))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_progress_tracking() {
    let app = spawn_app().await;

    let response = app.client.post(app.url("/api/v1/progress/videos/v1")).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let response = app
        .post_json("/api/v1/progress/quizzes/quiz-1", json!({"correct": 6, "total": 8}))
        .await;
    assert_eq!(response.status(), 200);
    let snapshot: Value = response.json().await.unwrap();
    assert_eq!(snapshot["completedVideos"], json!(["v1"]));
    assert_eq!(snapshot["quizScores"]["quiz-1"], 75);

    let response = app
        .post_json("/api/v1/progress/quizzes/quiz-1", json!({}))
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .post_json(
            "/api/v1/progress/path",
            json!({
                "id": "path-1",
                "title": "Basics",
                "description": "",
                "steps": [
                    {"id": "s1", "type": "watch", "title": "Watch", "resourceId": "v1"},
                    {"id": "s2", "type": "test", "title": "Test", "resourceId": "quiz-1"},
                    {"id": "s3", "type": "read", "title": "Read", "resourceId": "d1"},
                    {"id": "s4", "type": "read", "title": "Read", "resourceId": "d2"}
                ]
            }),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["progress"], 50);
}

#[tokio::test]
async fn test_bookmarks_and_saved_notes() {
    let app = spawn_app().await;

    let response = app
        .post_json(
            "/api/v1/bookmarks",
            json!({"resourceId": "v1", "resourceType": "video", "title": "Vectors"}),
        )
        .await;
    assert_eq!(response.status(), 201);
    let bookmark: Value = response.json().await.unwrap();
    let id = bookmark["id"].as_str().unwrap().to_string();

    assert_eq!(app.get_json("/api/v1/bookmarks").await.as_array().unwrap().len(), 1);

    let path = format!("/api/v1/bookmarks/{}", id);
    let response = app.client.delete(app.url(&path)).send().await.unwrap();
    assert_eq!(response.status(), 204);
    let response = app.client.delete(app.url(&path)).send().await.unwrap();
    assert_eq!(response.status(), 404);

    let response = app.post_json("/api/v1/study-notes", json!({"content": "  "})).await;
    assert_eq!(response.status(), 400);
    let response = app
        .post_json("/api/v1/study-notes", json!({"content": "Remember the rank theorem"}))
        .await;
    assert_eq!(response.status(), 201);
    assert_eq!(app.get_json("/api/v1/study-notes").await.as_array().unwrap().len(), 1);

    let response = app
        .post_json(
            "/api/v1/video-notes",
            json!({
                "videoId": "v1",
                "videoTitle": "Vectors",
                "content": "notes",
                "timestamps": [{"time": "1:00", "note": "span"}]
            }),
        )
        .await;
    assert_eq!(response.status(), 201);
    let notes = app.get_json("/api/v1/video-notes").await;
    assert_eq!(notes[0]["timestamps"][0]["note"], "span");
}
