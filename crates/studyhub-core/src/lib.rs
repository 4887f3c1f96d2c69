//! # studyhub-core
//!
//! Core types, traits, and abstractions for the studyhub learning portal.
//!
//! This crate provides the data model shared by every other crate (search
//! results, quizzes, flashcards, study notes, client state), the error
//! taxonomy, the provider traits that adapters implement, and centralized
//! defaults.

pub mod defaults;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod topic;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use ids::{new_v7, timestamp_id};
pub use models::*;
pub use topic::SearchTopic;
pub use traits::*;
