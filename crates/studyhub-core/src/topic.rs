//! Validated search topic.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A non-empty, trimmed search topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SearchTopic(String);

impl SearchTopic {
    /// Trim `raw` and reject it when nothing is left.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("topic must not be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SearchTopic {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SearchTopic {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SearchTopic> for String {
    fn from(topic: SearchTopic) -> Self {
        topic.0
    }
}
