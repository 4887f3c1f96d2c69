//! Persisted state keys. Each key holds one independent JSON value.

/// `Vec<String>`, most recent first, at most five entries.
pub const RECENT_SEARCHES: &str = "recent-searches";

/// `Vec<String>` of video ids, insertion order.
pub const COMPLETED_VIDEOS: &str = "completed-videos";

/// `Vec<String>` of document ids, insertion order.
pub const COMPLETED_DOCUMENTS: &str = "completed-documents";

/// `Vec<String>` of quiz ids, insertion order.
pub const COMPLETED_QUIZZES: &str = "completed-quizzes";

/// Map of quiz id to percentage score.
pub const QUIZ_SCORES: &str = "quiz-scores";

/// Free-form notes, newest first.
pub const STUDY_NOTES: &str = "study-notes";

/// One timestamped note set per video.
pub const VIDEO_NOTES: &str = "video-notes";

pub const BOOKMARKS: &str = "bookmarks";

/// Saved generated study notes, newest first.
pub const GENERATED_NOTES: &str = "generated-notes";
