//! Data models for studyhub.
//!
//! Every record here is an immutable value once constructed. Records are
//! serialized in camelCase so the JSON shape matches what the study portal
//! front-end consumes and what is kept in persisted client state.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults::QUIZ_OPTION_COUNT;

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// A video returned by the video provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    pub id: String,
    pub title: String,
    pub channel_name: String,
    /// `m:ss` or `h:mm:ss`.
    pub duration: String,
    /// e.g. `"1.2M views"`.
    pub view_count_label: String,
    pub published_at: NaiveDate,
    pub thumbnail_url: String,
    pub watch_url: String,
    pub description: String,
}

/// A web article returned by the article provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResult {
    pub id: String,
    pub title: String,
    pub source: String,
    pub author: String,
    pub published_at: Option<NaiveDate>,
    pub url: String,
    pub summary: String,
    /// e.g. `"8 min read"`.
    pub read_time_label: String,
}

/// An academic paper returned by the paper provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperResult {
    pub id: String,
    pub title: String,
    /// Author names in publication order.
    pub authors: Vec<String>,
    pub journal: String,
    pub published_at: Option<NaiveDate>,
    pub doi: String,
    pub url: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub key_findings: Vec<String>,
}

// =============================================================================
// QUIZZES AND FLASHCARDS
// =============================================================================

/// Depth of a generated quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl QuizLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizLevel::Beginner => "beginner",
            QuizLevel::Intermediate => "intermediate",
            QuizLevel::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for QuizLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuizLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(QuizLevel::Beginner),
            "intermediate" => Ok(QuizLevel::Intermediate),
            "advanced" => Ok(QuizLevel::Advanced),
            other => Err(format!("unknown quiz level: {}", other)),
        }
    }
}

/// A multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: [String; QUIZ_OPTION_COUNT],
    /// Index into `options`, always `< 4`.
    pub correct_answer_index: usize,
    pub explanation: String,
}

impl Question {
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer_index]
    }
}

/// A quiz. `questions` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub completed: bool,
    /// Percentage score once taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// Flashcard difficulty tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    pub difficulty: Difficulty,
}

// =============================================================================
// SEARCH BUNDLE
// =============================================================================

/// Aggregate result of one search. All six parts are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultBundle {
    /// `search-<millis>`.
    pub id: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub videos: Vec<VideoResult>,
    pub articles: Vec<ArticleResult>,
    pub papers: Vec<PaperResult>,
    pub quiz: Quiz,
    pub flashcards: Vec<Flashcard>,
}

// =============================================================================
// STUDY NOTES
// =============================================================================

/// What a study note was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Video,
    Article,
    Document,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Video => "video",
            SourceType::Article => "article",
            SourceType::Document => "document",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPoint {
    pub id: String,
    pub text: String,
    pub importance: Importance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

/// A point in a video with a short description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub time: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_reference: Option<String>,
}

/// A titled block of notes. Subsections nest at most one level deep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSection {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<NoteSection>,
}

impl NoteSection {
    /// Drop nesting below `max_depth` (1 = no subsections).
    pub fn truncated(mut self, max_depth: usize) -> Self {
        if max_depth <= 1 {
            self.subsections.clear();
        } else {
            self.subsections = self
                .subsections
                .into_iter()
                .map(|s| s.truncated(max_depth - 1))
                .collect();
        }
        self
    }

    /// Depth of this section tree (a leaf is 1).
    pub fn depth(&self) -> usize {
        1 + self.subsections.iter().map(|s| s.depth()).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteContent {
    pub summary: String,
    pub key_points: Vec<KeyPoint>,
    pub definitions: Vec<Definition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<Timestamp>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotes: Option<Vec<Quote>>,
    pub sections: Vec<NoteSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyNote {
    /// `notes-<millis>`.
    pub id: String,
    pub title: String,
    pub source_type: SourceType,
    pub source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub content: NoteContent,
}

// =============================================================================
// CLIENT STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    Document,
    Quiz,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub resource_id: String,
    pub resource_type: ResourceType,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A free-form note taken while studying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeNote {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashcard_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampedNote {
    pub time: String,
    pub note: String,
}

/// Notes attached to one video, with per-timestamp entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoNote {
    pub id: String,
    pub video_id: String,
    pub video_title: String,
    pub content: String,
    pub timestamps: Vec<TimestampedNote>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Watch,
    Read,
    Test,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStep {
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub title: String,
    pub resource_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<LearningStep>,
}

/// Snapshot of completion tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub completed_videos: Vec<String>,
    pub completed_documents: Vec<String>,
    pub completed_quizzes: Vec<String>,
    pub quiz_scores: BTreeMap<String, u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, subsections: Vec<NoteSection>) -> NoteSection {
        NoteSection {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            timestamp: None,
            subsections,
        }
    }

    #[test]
    fn test_question_options_serialize_as_array() {
        let q = Question {
            id: "q1".to_string(),
            text: "What?".to_string(),
            options: [
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ],
            correct_answer_index: 2,
            explanation: "because".to_string(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
        assert_eq!(json["correctAnswerIndex"], 2);
        assert_eq!(q.correct_option(), "c");
    }

    #[test]
    fn test_question_rejects_three_options() {
        let raw = r#"{"id":"q1","text":"t","options":["a","b","c"],"correctAnswerIndex":0,"explanation":""}"#;
        assert!(serde_json::from_str::<Question>(raw).is_err());
    }

    #[test]
    fn test_quiz_score_omitted_when_none() {
        let quiz = Quiz {
            id: "quiz-1".to_string(),
            title: "t".to_string(),
            questions: vec![],
            completed: false,
            score: None,
        };
        let json = serde_json::to_value(&quiz).unwrap();
        assert!(json.get("score").is_none());
    }

    #[test]
    fn test_difficulty_parse_case_insensitive() {
        assert_eq!("EASY".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_quiz_level_default_is_intermediate() {
        assert_eq!(QuizLevel::default(), QuizLevel::Intermediate);
        assert_eq!(QuizLevel::Intermediate.to_string(), "intermediate");
        assert_eq!("Advanced".parse::<QuizLevel>().unwrap(), QuizLevel::Advanced);
    }

    #[test]
    fn test_paper_abstract_field_name() {
        let paper = PaperResult {
            id: "p".to_string(),
            title: "t".to_string(),
            authors: vec!["A".to_string(), "B".to_string()],
            journal: "J".to_string(),
            published_at: NaiveDate::from_ymd_opt(2024, 1, 25),
            doi: "10.1/x".to_string(),
            url: "https://doi.org/10.1/x".to_string(),
            abstract_text: "abs".to_string(),
            key_findings: vec![],
        };
        let json = serde_json::to_value(&paper).unwrap();
        assert_eq!(json["abstract"], "abs");
        assert_eq!(json["publishedAt"], "2024-01-25");
        assert_eq!(json["keyFindings"], serde_json::json!([]));
    }

    #[test]
    fn test_section_depth_and_truncation() {
        let tree = section("a", vec![section("b", vec![section("c", vec![])])]);
        assert_eq!(tree.depth(), 3);
        let cut = tree.truncated(2);
        assert_eq!(cut.depth(), 2);
        assert!(cut.subsections[0].subsections.is_empty());
    }

    #[test]
    fn test_note_content_optional_sections_omitted() {
        let content = NoteContent {
            summary: "s".to_string(),
            key_points: vec![],
            definitions: vec![],
            timestamps: None,
            quotes: None,
            sections: vec![],
        };
        let json = serde_json::to_value(&content).unwrap();
        assert!(json.get("timestamps").is_none());
        assert!(json.get("quotes").is_none());
        assert!(json.get("keyPoints").is_some());
    }

    #[test]
    fn test_learning_step_type_field() {
        let raw = r#"{"id":"s1","type":"watch","title":"Intro","resourceId":"v1"}"#;
        let step: LearningStep = serde_json::from_str(raw).unwrap();
        assert_eq!(step.step_type, StepType::Watch);
    }
}
