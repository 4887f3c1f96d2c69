//! Scripted generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use studyhub_core::GenerationBackend;
//! use studyhub_inference::mock::{MockGenerationBackend, MockOutcome};
//!
//! # async fn demo() {
//! let backend = MockGenerationBackend::new()
//!     .with_outcome(MockOutcome::RateLimited)
//!     .with_fixed_response("{\"ok\": true}");
//!
//! assert!(backend.generate("first").await.is_err());
//! assert_eq!(backend.generate("second").await.unwrap(), "{\"ok\": true}");
//! assert_eq!(backend.generate_call_count(), 2);
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use studyhub_core::{Error, GenerationBackend, Result};

/// One scripted outcome, consumed by a single `generate` call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this text.
    Text(String),
    /// Fail with `Error::RateLimited`.
    RateLimited,
    /// Fail with a non-retryable provider error.
    Fail(String),
}

/// A recorded call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
    pub timestamp: std::time::Instant,
}

/// Mock generation backend for testing.
///
/// Scripted outcomes are consumed in order; once the script is empty every
/// call gets the default outcome.
#[derive(Clone)]
pub struct MockGenerationBackend {
    script: Arc<Mutex<VecDeque<MockOutcome>>>,
    default_outcome: MockOutcome,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockGenerationBackend {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_outcome: MockOutcome::Text("Mock response".to_string()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response returned once the script is exhausted.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.default_outcome = MockOutcome::Text(response.into());
        self
    }

    /// Make every unscripted call fail as rate limited.
    pub fn always_rate_limited(mut self) -> Self {
        self.default_outcome = MockOutcome::RateLimited;
        self
    }

    /// Make every unscripted call fail with a provider error.
    pub fn always_failing(mut self, message: impl Into<String>) -> Self {
        self.default_outcome = MockOutcome::Fail(message.into());
        self
    }

    /// Append one outcome to the script.
    pub fn with_outcome(self, outcome: MockOutcome) -> Self {
        lock(&self.script).push_back(outcome);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        lock(&self.call_log).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.call_log).clear()
    }

    pub fn generate_call_count(&self) -> usize {
        lock(&self.call_log).len()
    }

    fn next_outcome(&self) -> MockOutcome {
        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| self.default_outcome.clone())
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        lock(&self.call_log).push(MockCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
            timestamp: std::time::Instant::now(),
        });

        match self.next_outcome() {
            MockOutcome::Text(text) => Ok(text),
            MockOutcome::RateLimited => Err(Error::RateLimited("mock quota exhausted".to_string())),
            MockOutcome::Fail(message) => Err(Error::Status {
                status: 500,
                message,
            }),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response() {
        let backend = MockGenerationBackend::new();
        assert_eq!(backend.generate("x").await.unwrap(), "Mock response");
    }

    #[tokio::test]
    async fn test_script_consumed_in_order() {
        let backend = MockGenerationBackend::new()
            .with_outcome(MockOutcome::Text("one".to_string()))
            .with_outcome(MockOutcome::Fail("boom".to_string()))
            .with_fixed_response("rest");

        assert_eq!(backend.generate("a").await.unwrap(), "one");
        assert!(backend.generate("b").await.is_err());
        assert_eq!(backend.generate("c").await.unwrap(), "rest");
        assert_eq!(backend.generate("d").await.unwrap(), "rest");
    }

    #[tokio::test]
    async fn test_always_rate_limited() {
        let backend = MockGenerationBackend::new().always_rate_limited();
        let err = backend.generate("x").await.unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_failure_is_not_rate_limited() {
        let backend = MockGenerationBackend::new().always_failing("down");
        let err = backend.generate("x").await.unwrap_err();
        assert!(!err.is_rate_limited());
        assert!(err.is_adapter_failure());
    }

    #[tokio::test]
    async fn test_call_log_records_system_and_prompt() {
        let backend = MockGenerationBackend::new();
        backend.generate_with_system("sys", "prompt").await.unwrap();

        let calls = backend.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, "sys");
        assert_eq!(calls[0].prompt, "prompt");

        backend.clear_calls();
        assert_eq!(backend.generate_call_count(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_log() {
        let backend = MockGenerationBackend::new();
        let clone = backend.clone();
        clone.generate("x").await.unwrap();
        assert_eq!(backend.generate_call_count(), 1);
    }
}
