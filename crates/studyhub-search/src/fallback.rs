//! Fallback policy: absorb any provider failure into a placeholder value.

use std::future::Future;

use tracing::{error, warn};

use studyhub_core::Result;

/// Await `primary`; on any error log it and return `fallback()` instead.
///
/// Adapter failures (network, status, credentials, malformed or invalid
/// output) are expected and logged at WARN. Anything else points at a
/// programming or configuration problem and is logged at ERROR, but is
/// still absorbed.
pub async fn with_fallback<T, Fut, F>(component: &str, primary: Fut, fallback: F) -> T
where
    Fut: Future<Output = Result<T>>,
    F: FnOnce() -> T,
{
    match primary.await {
        Ok(value) => value,
        Err(e) if e.is_adapter_failure() => {
            warn!(
                component,
                error = %e,
                error_kind = e.kind(),
                fallback = true,
                "Provider failed, using placeholder"
            );
            fallback()
        }
        Err(e) => {
            error!(
                component,
                error = %e,
                error_kind = e.kind(),
                fallback = true,
                "Unexpected provider error, using placeholder"
            );
            fallback()
        }
    }
}
