use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{api_url, error_from_response, http_client, Provider};
use crate::errors::ProviderError;

/// Path of the v2 translate method, relative to the endpoint
const TRANSLATE_PATH: &str = "language/translate/v2";

/// Path of the v2 supported-languages method, relative to the endpoint
const LANGUAGES_PATH: &str = "language/translate/v2/languages";

/// Google Cloud Translation (v2, "basic") client
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key sent with every request
    api_key: String,
    /// Base URL of the API
    endpoint: Url,
}

impl std::fmt::Debug for GoogleTranslate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslate")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Translate request body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslateRequest {
    /// Texts to translate
    pub q: Vec<String>,
    /// Source language code
    pub source: String,
    /// Target language code
    pub target: String,
    /// `text` keeps the API from HTML-escaping the result
    pub format: String,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: vec![text.into()],
            source: source.into(),
            target: target.into(),
            format: "text".to_string(),
        }
    }
}

/// Translate response envelope
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    pub data: TranslationList,
}

#[derive(Debug, Deserialize)]
pub struct TranslationList {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
pub struct Translation {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(api_key: impl Into<String>, endpoint: Url, timeout_secs: u64) -> Self {
        Self {
            client: http_client(timeout_secs),
            api_key: api_key.into(),
            endpoint,
        }
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        let mut url = api_url(&self.endpoint, path)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = TranslateRequest;
    type Response = TranslateResponse;

    async fn complete(&self, request: TranslateRequest) -> Result<TranslateResponse, ProviderError> {
        let url = self.url(TRANSLATE_PATH)?;
        debug!("Google translate request {} -> {} ({} texts)", request.source, request.target, request.q.len());

        let response = self.client.post(url).json(&request).send().await?;
        if !response.status().is_success() {
            let error = error_from_response(response).await;
            error!("Google Translate API error: {}", error);
            return Err(error);
        }

        response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Google Translate response: {}", e)))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.client.get(self.url(LANGUAGES_PATH)?).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }

    fn extract_text(response: &TranslateResponse) -> String {
        response
            .data
            .translations
            .first()
            .map(|t| t.translated_text.clone())
            .unwrap_or_default()
    }
}
