//! JSON shape tests for records that leave the process (API responses and
//! persisted client state).

use chrono::{NaiveDate, TimeZone, Utc};
use studyhub_core::{
    Difficulty, Flashcard, Question, Quiz, SearchResultBundle, SourceType, StudyNote, VideoResult,
};

fn sample_bundle() -> SearchResultBundle {
    SearchResultBundle {
        id: "search-1".to_string(),
        topic: "Linear Algebra".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        videos: vec![VideoResult {
            id: "abc".to_string(),
            title: "Vectors".to_string(),
            channel_name: "Channel".to_string(),
            duration: "5:09".to_string(),
            view_count_label: "4.5K views".to_string(),
            published_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            thumbnail_url: "https://img/abc.jpg".to_string(),
            watch_url: "https://www.youtube.com/watch?v=abc".to_string(),
            description: "d".to_string(),
        }],
        articles: vec![],
        papers: vec![],
        quiz: Quiz {
            id: "quiz-1".to_string(),
            title: "Linear Algebra Knowledge Check".to_string(),
            questions: vec![Question {
                id: "q1".to_string(),
                text: "?".to_string(),
                options: [
                    "a".to_string(),
                    "b".to_string(),
                    "c".to_string(),
                    "d".to_string(),
                ],
                correct_answer_index: 3,
                explanation: "e".to_string(),
            }],
            completed: false,
            score: None,
        },
        flashcards: vec![Flashcard {
            id: "fc-1".to_string(),
            front: "f".to_string(),
            back: "b".to_string(),
            difficulty: Difficulty::Medium,
        }],
    }
}

#[test]
fn test_bundle_uses_camel_case_keys() {
    let json = serde_json::to_value(sample_bundle()).unwrap();
    for key in [
        "id",
        "topic",
        "createdAt",
        "videos",
        "articles",
        "papers",
        "quiz",
        "flashcards",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(json["videos"][0]["channelName"], "Channel");
    assert_eq!(json["videos"][0]["viewCountLabel"], "4.5K views");
    assert_eq!(json["flashcards"][0]["difficulty"], "medium");
}

#[test]
fn test_bundle_json_roundtrip_is_lossless() {
    let bundle = sample_bundle();
    let json = serde_json::to_string(&bundle).unwrap();
    let back: SearchResultBundle = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bundle);
}

#[test]
fn test_study_note_accepts_front_end_shape() {
    let raw = r#"{
        "id": "notes-1",
        "title": "Notes: Rust",
        "sourceType": "article",
        "sourceId": "article-1",
        "createdAt": "2024-01-20T10:00:00Z",
        "updatedAt": "2024-01-20T10:00:00Z",
        "tags": ["article", "notes"],
        "content": {
            "summary": "s",
            "keyPoints": [{"id": "kp-1", "text": "t", "importance": "high", "pageReference": "Page 1"}],
            "definitions": [{"term": "T", "definition": "D"}],
            "quotes": [{"id": "q-1", "text": "x", "source": "y"}],
            "sections": [{"id": "sec-1", "title": "Intro", "content": "c",
                          "subsections": [{"id": "sub-1", "title": "A", "content": "a"}]}]
        }
    }"#;
    let note: StudyNote = serde_json::from_str(raw).unwrap();
    assert_eq!(note.source_type, SourceType::Article);
    assert!(note.source_url.is_none());
    assert!(note.content.timestamps.is_none());
    assert_eq!(note.content.quotes.as_ref().map(|q| q.len()), Some(1));
    assert_eq!(note.content.sections[0].subsections.len(), 1);
    assert_eq!(
        note.content.key_points[0].page_reference.as_deref(),
        Some("Page 1")
    );
}
