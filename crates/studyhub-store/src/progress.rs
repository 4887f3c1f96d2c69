//! Typed access to persisted client state.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use studyhub_core::{
    defaults, new_v7, Bookmark, Error, FreeNote, LearningPath, ProgressSnapshot, ResourceType,
    Result, StepType, StudyNote, TimestampedNote, VideoNote,
};

use crate::keys;

/// Integer percentage of correct answers, 0 for an empty quiz.
pub fn quiz_percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total);
    ((correct as f64 / total as f64) * 100.0).round() as u8
}

/// Input for a new bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub resource_id: String,
    pub resource_type: ResourceType,
    pub title: String,
}

/// Input for a new free-form note.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFreeNote {
    pub content: String,
    #[serde(default)]
    pub video_time: Option<String>,
    #[serde(default)]
    pub flashcard_id: Option<String>,
}

/// Input for saving the notes of one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideoNote {
    pub video_id: String,
    pub video_title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamps: Vec<TimestampedNote>,
}

/// Progress, bookmarks and saved notes on top of a [`KeyValueStore`](crate::KeyValueStore).
///
/// Every method reads the current value, changes it and writes it back.
/// Callers serialise mutations; there is no locking here.
#[derive(Clone)]
pub struct StudyProgress {
    store: Arc<dyn crate::KeyValueStore>,
}

impl StudyProgress {
    pub fn new(store: Arc<dyn crate::KeyValueStore>) -> Self {
        Self { store }
    }

    /// Missing or unreadable values come back as `T::default()`.
    async fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(raw) = self.store.get_raw(key).await? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "Corrupt persisted value, using default");
                Ok(T::default())
            }
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.put_raw(key, &json).await
    }

    /// Append `id` to a set-like list; returns false if it was already there.
    async fn add_to_set(&self, key: &str, id: &str) -> Result<bool> {
        let mut ids: Vec<String> = self.load(key).await?;
        if ids.iter().any(|existing| existing == id) {
            return Ok(false);
        }
        ids.push(id.to_string());
        self.save(key, &ids).await?;
        Ok(true)
    }

    // =========================================================================
    // RECENT SEARCHES
    // =========================================================================

    /// Put `topic` at the front of the history, dropping older duplicates.
    pub async fn record_search(&self, topic: &str) -> Result<Vec<String>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::InvalidInput("topic must not be empty".to_string()));
        }
        let mut recent: Vec<String> = self.load(keys::RECENT_SEARCHES).await?;
        recent.retain(|t| t != topic);
        recent.insert(0, topic.to_string());
        recent.truncate(defaults::RECENT_SEARCH_LIMIT);
        self.save(keys::RECENT_SEARCHES, &recent).await?;
        Ok(recent)
    }

    pub async fn recent_searches(&self) -> Result<Vec<String>> {
        self.load(keys::RECENT_SEARCHES).await
    }

    // =========================================================================
    // COMPLETION
    // =========================================================================

    pub async fn mark_video_complete(&self, video_id: &str) -> Result<bool> {
        self.add_to_set(keys::COMPLETED_VIDEOS, video_id).await
    }

    pub async fn mark_document_complete(&self, document_id: &str) -> Result<bool> {
        self.add_to_set(keys::COMPLETED_DOCUMENTS, document_id).await
    }

    /// Record a quiz result. The score is clamped to 100 and a retake
    /// overwrites the previous score.
    pub async fn mark_quiz_complete(&self, quiz_id: &str, score: u32) -> Result<u8> {
        let score = score.min(100) as u8;
        self.add_to_set(keys::COMPLETED_QUIZZES, quiz_id).await?;

        let mut scores: BTreeMap<String, u8> = self.load(keys::QUIZ_SCORES).await?;
        scores.insert(quiz_id.to_string(), score);
        self.save(keys::QUIZ_SCORES, &scores).await?;
        debug!(quiz_id, score, "Quiz score recorded");
        Ok(score)
    }

    pub async fn quiz_score(&self, quiz_id: &str) -> Result<Option<u8>> {
        let scores: BTreeMap<String, u8> = self.load(keys::QUIZ_SCORES).await?;
        Ok(scores.get(quiz_id).copied())
    }

    /// Percentage of completed steps, rounded; 0 for a path with no steps.
    pub async fn path_progress(&self, path: &LearningPath) -> Result<u8> {
        if path.steps.is_empty() {
            return Ok(0);
        }
        let snapshot = self.snapshot().await?;
        let done = path
            .steps
            .iter()
            .filter(|step| {
                let completed = match step.step_type {
                    StepType::Watch => &snapshot.completed_videos,
                    StepType::Read => &snapshot.completed_documents,
                    StepType::Test => &snapshot.completed_quizzes,
                };
                completed.contains(&step.resource_id)
            })
            .count();
        Ok(quiz_percentage(done, path.steps.len()))
    }

    pub async fn snapshot(&self) -> Result<ProgressSnapshot> {
        Ok(ProgressSnapshot {
            completed_videos: self.load(keys::COMPLETED_VIDEOS).await?,
            completed_documents: self.load(keys::COMPLETED_DOCUMENTS).await?,
            completed_quizzes: self.load(keys::COMPLETED_QUIZZES).await?,
            quiz_scores: self.load(keys::QUIZ_SCORES).await?,
        })
    }

    // =========================================================================
    // BOOKMARKS
    // =========================================================================

    /// Add a bookmark. Bookmarking the same resource twice returns the
    /// existing bookmark.
    pub async fn add_bookmark(&self, new: NewBookmark) -> Result<Bookmark> {
        if new.resource_id.trim().is_empty() {
            return Err(Error::InvalidInput("resourceId is required".to_string()));
        }
        let mut bookmarks: Vec<Bookmark> = self.load(keys::BOOKMARKS).await?;
        if let Some(existing) = bookmarks
            .iter()
            .find(|b| b.resource_id == new.resource_id && b.resource_type == new.resource_type)
        {
            return Ok(existing.clone());
        }

        let bookmark = Bookmark {
            id: new_v7().to_string(),
            resource_id: new.resource_id,
            resource_type: new.resource_type,
            title: new.title,
            created_at: Utc::now(),
        };
        bookmarks.push(bookmark.clone());
        self.save(keys::BOOKMARKS, &bookmarks).await?;
        Ok(bookmark)
    }

    /// Remove a bookmark by id; returns false when no such bookmark exists.
    pub async fn remove_bookmark(&self, bookmark_id: &str) -> Result<bool> {
        let mut bookmarks: Vec<Bookmark> = self.load(keys::BOOKMARKS).await?;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.id != bookmark_id);
        if bookmarks.len() == before {
            return Ok(false);
        }
        self.save(keys::BOOKMARKS, &bookmarks).await?;
        Ok(true)
    }

    pub async fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.load(keys::BOOKMARKS).await
    }

    // =========================================================================
    // NOTES
    // =========================================================================

    /// Save a free-form note at the front of the list. Blank content is rejected.
    pub async fn save_free_note(&self, new: NewFreeNote) -> Result<FreeNote> {
        if new.content.trim().is_empty() {
            return Err(Error::InvalidInput("note content is required".to_string()));
        }
        let note = FreeNote {
            id: new_v7().to_string(),
            content: new.content,
            created_at: Utc::now(),
            video_time: new.video_time,
            flashcard_id: new.flashcard_id,
        };
        let mut notes: Vec<FreeNote> = self.load(keys::STUDY_NOTES).await?;
        notes.insert(0, note.clone());
        self.save(keys::STUDY_NOTES, &notes).await?;
        Ok(note)
    }

    pub async fn free_notes(&self) -> Result<Vec<FreeNote>> {
        self.load(keys::STUDY_NOTES).await
    }

    /// Save the notes for one video, replacing any earlier set for it.
    pub async fn save_video_note(&self, new: NewVideoNote) -> Result<VideoNote> {
        if new.video_id.trim().is_empty() {
            return Err(Error::InvalidInput("videoId is required".to_string()));
        }
        let note = VideoNote {
            id: new_v7().to_string(),
            video_id: new.video_id,
            video_title: new.video_title,
            content: new.content,
            timestamps: new.timestamps,
            created_at: Utc::now(),
        };
        let mut notes: Vec<VideoNote> = self.load(keys::VIDEO_NOTES).await?;
        notes.retain(|n| n.video_id != note.video_id);
        notes.push(note.clone());
        self.save(keys::VIDEO_NOTES, &notes).await?;
        Ok(note)
    }

    pub async fn video_notes(&self) -> Result<Vec<VideoNote>> {
        self.load(keys::VIDEO_NOTES).await
    }

    /// Keep a generated study note, newest first. Saving a note with the
    /// same id again replaces it.
    pub async fn save_generated_note(&self, note: &StudyNote) -> Result<()> {
        let mut notes: Vec<StudyNote> = self.load(keys::GENERATED_NOTES).await?;
        notes.retain(|n| n.id != note.id);
        notes.insert(0, note.clone());
        self.save(keys::GENERATED_NOTES, &notes).await
    }

    pub async fn generated_notes(&self) -> Result<Vec<StudyNote>> {
        self.load(keys::GENERATED_NOTES).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyValueStore, MemoryStore};
    use studyhub_core::LearningStep;

    fn progress() -> (Arc<MemoryStore>, StudyProgress) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), StudyProgress::new(store))
    }

    #[test]
    fn test_quiz_percentage() {
        assert_eq!(quiz_percentage(6, 8), 75);
        assert_eq!(quiz_percentage(2, 3), 67);
        assert_eq!(quiz_percentage(0, 0), 0);
        assert_eq!(quiz_percentage(9, 8), 100);
    }

    #[tokio::test]
    async fn test_recent_searches_dedupe_and_cap() {
        let (_, p) = progress();
        for topic in ["a", "b", "c", "d", "e", "f"] {
            p.record_search(topic).await.unwrap();
        }
        p.record_search(" c ").await.unwrap();

        assert_eq!(p.recent_searches().await.unwrap(), vec!["c", "f", "e", "d", "b"]);
    }

    #[tokio::test]
    async fn test_blank_search_not_recorded() {
        let (_, p) = progress();
        assert!(p.record_search("  ").await.is_err());
        assert!(p.recent_searches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_completion_has_set_semantics() {
        let (_, p) = progress();
        assert!(p.mark_video_complete("v1").await.unwrap());
        assert!(!p.mark_video_complete("v1").await.unwrap());
        assert!(p.mark_video_complete("v2").await.unwrap());
        assert_eq!(p.snapshot().await.unwrap().completed_videos, vec!["v1", "v2"]);
    }

    #[tokio::test]
    async fn test_quiz_score_clamped_and_overwritten() {
        let (_, p) = progress();
        assert_eq!(p.mark_quiz_complete("q1", 250).await.unwrap(), 100);
        p.mark_quiz_complete("q1", 40).await.unwrap();

        assert_eq!(p.quiz_score("q1").await.unwrap(), Some(40));
        assert_eq!(p.quiz_score("q2").await.unwrap(), None);
        assert_eq!(p.snapshot().await.unwrap().completed_quizzes, vec!["q1"]);
    }

    #[tokio::test]
    async fn test_path_progress() {
        let (_, p) = progress();
        let step = |id: &str, step_type, resource: &str| LearningStep {
            id: id.to_string(),
            step_type,
            title: id.to_string(),
            resource_id: resource.to_string(),
        };
        let path = LearningPath {
            id: "path-1".to_string(),
            title: "Basics".to_string(),
            description: String::new(),
            steps: vec![
                step("s1", StepType::Watch, "v1"),
                step("s2", StepType::Read, "d1"),
                step("s3", StepType::Test, "q1"),
            ],
        };

        assert_eq!(p.path_progress(&path).await.unwrap(), 0);
        p.mark_video_complete("v1").await.unwrap();
        assert_eq!(p.path_progress(&path).await.unwrap(), 33);
        // Completing a video with a quiz's id does not count for the test step.
        p.mark_video_complete("q1").await.unwrap();
        assert_eq!(p.path_progress(&path).await.unwrap(), 33);
        p.mark_document_complete("d1").await.unwrap();
        assert_eq!(p.path_progress(&path).await.unwrap(), 67);

        let empty = LearningPath { steps: vec![], ..path };
        assert_eq!(p.path_progress(&empty).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bookmarks_dedupe_by_resource() {
        let (_, p) = progress();
        let new = NewBookmark {
            resource_id: "v1".to_string(),
            resource_type: ResourceType::Video,
            title: "Vectors".to_string(),
        };
        let first = p.add_bookmark(new.clone()).await.unwrap();
        let second = p.add_bookmark(new.clone()).await.unwrap();
        assert_eq!(first.id, second.id);

        p.add_bookmark(NewBookmark {
            resource_type: ResourceType::Quiz,
            ..new
        })
        .await
        .unwrap();
        assert_eq!(p.bookmarks().await.unwrap().len(), 2);

        assert!(p.remove_bookmark(&first.id).await.unwrap());
        assert!(!p.remove_bookmark(&first.id).await.unwrap());
        assert_eq!(p.bookmarks().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_free_notes_newest_first() {
        let (_, p) = progress();
        p.save_free_note(NewFreeNote {
            content: "first".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
        p.save_free_note(NewFreeNote {
            content: "second".to_string(),
            video_time: Some("3:10".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

        let notes = p.free_notes().await.unwrap();
        assert_eq!(notes[0].content, "second");
        assert_eq!(notes[0].video_time.as_deref(), Some("3:10"));
        assert_eq!(notes[1].content, "first");

        let err = p
            .save_free_note(NewFreeNote {
                content: "   ".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_video_notes_replace_per_video() {
        let (_, p) = progress();
        let new = |content: &str| NewVideoNote {
            video_id: "v1".to_string(),
            video_title: "Vectors".to_string(),
            content: content.to_string(),
            timestamps: vec![TimestampedNote {
                time: "1:00".to_string(),
                note: "span".to_string(),
            }],
        };
        p.save_video_note(new("draft")).await.unwrap();
        p.save_video_note(new("final")).await.unwrap();

        let notes = p.video_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "final");
    }

    #[tokio::test]
    async fn test_corrupt_value_reads_as_default() {
        let (store, p) = progress();
        store.put_raw(keys::BOOKMARKS, "{not json").await.unwrap();
        store.put_raw(keys::QUIZ_SCORES, "[1,2,3]").await.unwrap();

        assert!(p.bookmarks().await.unwrap().is_empty());
        assert_eq!(p.quiz_score("q1").await.unwrap(), None);

        // The next write replaces the corrupt value.
        p.mark_quiz_complete("q1", 90).await.unwrap();
        assert_eq!(p.quiz_score("q1").await.unwrap(), Some(90));
    }
}
