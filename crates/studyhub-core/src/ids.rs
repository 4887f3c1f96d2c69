//! Identifier helpers.
//!
//! Generated records carry `<prefix>-<unix millis>` ids so they sort by
//! creation time and stay readable in persisted state. Client-state records
//! that the user creates (bookmarks, free-form notes) use UUIDv7.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// `<prefix>-<unix millis of at>`.
pub fn timestamp_id(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", prefix, at.timestamp_millis())
}

/// Generate a new time-ordered UUIDv7.
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}
