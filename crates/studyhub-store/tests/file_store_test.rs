//! Progress persisted through the file store survives a reopen.

use std::sync::Arc;

use studyhub_core::ResourceType;
use studyhub_store::{keys, FileStore, KeyValueStore, NewBookmark, StudyProgress};

#[tokio::test]
async fn test_progress_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let progress = StudyProgress::new(Arc::new(FileStore::open(dir.path()).await.unwrap()));
        progress.record_search("Linear Algebra").await.unwrap();
        progress.record_search("Topology").await.unwrap();
        progress.mark_quiz_complete("quiz-1", 75).await.unwrap();
        progress
            .add_bookmark(NewBookmark {
                resource_id: "v1".to_string(),
                resource_type: ResourceType::Video,
                title: "Vectors".to_string(),
            })
            .await
            .unwrap();
    }

    let progress = StudyProgress::new(Arc::new(FileStore::open(dir.path()).await.unwrap()));
    assert_eq!(
        progress.recent_searches().await.unwrap(),
        vec!["Topology", "Linear Algebra"]
    );
    assert_eq!(progress.quiz_score("quiz-1").await.unwrap(), Some(75));
    assert_eq!(progress.bookmarks().await.unwrap()[0].title, "Vectors");
    assert!(dir.path().join("recent-searches.json").exists());
    assert!(dir.path().join("quiz-scores.json").exists());
}

#[tokio::test]
async fn test_values_are_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path()).await.unwrap());
    let progress = StudyProgress::new(store.clone());

    progress.mark_video_complete("v1").await.unwrap();
    progress.mark_quiz_complete("q1", 80).await.unwrap();

    let videos = store.get_raw(keys::COMPLETED_VIDEOS).await.unwrap().unwrap();
    assert_eq!(videos, r#"["v1"]"#);
    let scores = store.get_raw(keys::QUIZ_SCORES).await.unwrap().unwrap();
    assert_eq!(scores, r#"{"q1":80}"#);
}

#[tokio::test]
async fn test_corrupt_file_reads_as_default() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("recent-searches.json"), "not json").unwrap();

    let progress = StudyProgress::new(Arc::new(FileStore::open(dir.path()).await.unwrap()));
    assert!(progress.recent_searches().await.unwrap().is_empty());
    progress.record_search("Rust").await.unwrap();
    assert_eq!(progress.recent_searches().await.unwrap(), vec!["Rust"]);
}
