//! HTTP plumbing shared by the provider adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use studyhub_core::{defaults, Error, Result};

/// Build a client with the provider request timeout.
pub(crate) fn build_client(timeout_seconds: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Clamp a requested result count to `1..=MAX_RESULTS_CAP`.
pub fn clamp_max_results(requested: usize) -> usize {
    requested.clamp(1, defaults::MAX_RESULTS_CAP)
}

/// Send a request and decode a JSON body, mapping failures to adapter errors.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            Error::Request(format!("request timed out: {}", e))
        } else {
            Error::Request(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message: String = body.chars().take(200).collect();
        if status.as_u16() == 429 {
            return Err(Error::RateLimited(message));
        }
        return Err(Error::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| Error::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_max_results() {
        assert_eq!(clamp_max_results(0), 1);
        assert_eq!(clamp_max_results(5), 5);
        assert_eq!(clamp_max_results(100), defaults::MAX_RESULTS_CAP);
    }
}
