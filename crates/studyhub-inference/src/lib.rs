//! # studyhub-inference
//!
//! Generation backends and the generation adapters built on them.
//!
//! Backends:
//! - [`gemini::GeminiBackend`]: Google Gemini `generateContent`
//! - [`openai::OpenAIBackend`]: any OpenAI-compatible chat completions endpoint
//! - [`mock::MockGenerationBackend`]: scripted, for tests (feature `mock`)
//!
//! Adapters turn model text into validated entities:
//! [`QuizGenerator`], [`FlashcardGenerator`], [`NoteGenerator`].

#[cfg(feature = "gemini")]
pub mod gemini;
#[cfg(feature = "openai")]
pub mod openai;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub mod flashcards;
pub mod notes;
pub mod parse;
pub mod prompts;
pub mod provider;
pub mod quiz;

pub use flashcards::FlashcardGenerator;
pub use notes::NoteGenerator;
pub use parse::parse_json_lenient;
pub use provider::{backend_for, backend_from_env, GenProvider};
pub use quiz::{quiz_title, QuizGenerator};

#[cfg(feature = "gemini")]
pub use gemini::{GeminiBackend, GeminiConfig};
#[cfg(feature = "openai")]
pub use openai::{OpenAIBackend, OpenAIConfig};
