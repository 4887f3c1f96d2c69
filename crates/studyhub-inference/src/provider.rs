//! Generation backend selection.

use std::sync::Arc;

use tracing::info;

use studyhub_core::{defaults, Error, GenerationBackend, Result};

/// Known generation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenProvider {
    Gemini,
    OpenAI,
}

impl std::str::FromStr for GenProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(GenProvider::Gemini),
            "openai" | "openai-compatible" => Ok(GenProvider::OpenAI),
            other => Err(Error::Config(format!(
                "unknown generation provider '{}', expected gemini or openai",
                other
            ))),
        }
    }
}

impl GenProvider {
    /// Read `STUDYHUB_GEN_PROVIDER`, defaulting to Gemini.
    pub fn from_env() -> Result<Self> {
        std::env::var("STUDYHUB_GEN_PROVIDER")
            .unwrap_or_else(|_| defaults::GEN_PROVIDER.to_string())
            .parse()
    }
}

/// Build the configured generation backend.
///
/// A missing API key is not an error here: the backend reports
/// `MissingCredential` per call so the fallback path takes over.
pub fn backend_for(provider: GenProvider) -> Result<Arc<dyn GenerationBackend>> {
    let backend: Arc<dyn GenerationBackend> = match provider {
        #[cfg(feature = "gemini")]
        GenProvider::Gemini => Arc::new(crate::gemini::GeminiBackend::from_env()?),
        #[cfg(feature = "openai")]
        GenProvider::OpenAI => Arc::new(crate::openai::OpenAIBackend::from_env()?),
        #[allow(unreachable_patterns)]
        other => {
            return Err(Error::Config(format!(
                "generation provider {:?} not compiled in",
                other
            )))
        }
    };
    info!(model = backend.model_name(), ?provider, "Generation backend ready");
    Ok(backend)
}

/// Build the backend named by the environment.
pub fn backend_from_env() -> Result<Arc<dyn GenerationBackend>> {
    backend_for(GenProvider::from_env()?)
}
