//! # studyhub-store
//!
//! Client-local persisted state: recent searches, completion tracking, quiz
//! scores, bookmarks and saved notes.
//!
//! [`KeyValueStore`] stores raw JSON per key ([`FileStore`] on disk,
//! [`MemoryStore`] for tests); [`StudyProgress`] is the typed facade over it.

pub mod keys;
pub mod kv;
pub mod progress;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use progress::{quiz_percentage, NewBookmark, NewFreeNote, NewVideoNote, StudyProgress};
