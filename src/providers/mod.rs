/*!
 * Provider implementations for online translation services.
 *
 * This module contains client implementations for the supported backends:
 * - Google: Cloud Translation v2 REST API
 * - Ollama: Local LLM server prompted for single-word translations
 */

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;
use url::Url;

use crate::errors::{ConfigurationError, ProviderError};

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the online translator.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract the translated text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Parse a configured endpoint, defaulting to `http://` when no scheme is given
pub fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigurationError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(ConfigurationError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "endpoint cannot be empty".to_string(),
        });
    }

    let candidate = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    };

    let url = Url::parse(&candidate).map_err(|e| ConfigurationError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    if url.host_str().is_none() {
        return Err(ConfigurationError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}

/// Join an API path onto a base endpoint, keeping any base path prefix
pub(crate) fn api_url(base: &Url, path: &str) -> Result<Url, ProviderError> {
    let joined = format!("{}/{}", base.as_str().trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| ProviderError::RequestFailed(format!("Invalid request URL {}: {}", joined, e)))
}

/// Shared HTTP client with connection pooling and a request timeout
pub(crate) fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_default()
}

/// Turn a non-success response into the matching provider error
pub(crate) async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    ProviderError::from_status(status, body)
}

pub mod google;
pub mod ollama;

pub use self::google::GoogleTranslate;
pub use self::ollama::Ollama;
