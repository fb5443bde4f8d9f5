/*!
 * Online word and line translation.
 *
 * `WordTranslator` is the seam the vocabulary sweep and the SRT translator
 * depend on. `OnlineTranslator` implements it on top of one of the configured
 * providers, retrying transient failures with exponential backoff.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::language_utils::{base_language_code, get_language_name, normalize_to_part1_or_part2t};
use crate::providers::google::{GoogleTranslate, TranslateRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::{parse_endpoint, Provider};

/// Translates a short text between two languages
#[async_trait]
pub trait WordTranslator: Send + Sync {
    /// Translate `text` from `source_language` into `target_language`
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError>;
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// Google Cloud Translation
    Google {
        /// Client instance
        client: GoogleTranslate,
    },

    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
        /// Model to prompt
        model: String,
    },
}

/// Retry policy for transient provider failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub retries: u32,
    /// Delay before the first retry, doubled for every further one
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    /// Run `operation` until it succeeds, fails permanently or runs out of retries
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    let delay = self.backoff(attempt);
                    warn!("Request failed ({}), retrying in {:?} ({}/{})", e, delay, attempt, self.retries);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Word translator backed by an online provider
pub struct OnlineTranslator {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Retry settings
    retry: RetryPolicy,
}

impl OnlineTranslator {
    /// Create a new translator with the given configuration
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let endpoint = parse_endpoint(&config.get_endpoint())?;
        let timeout_secs = config.common.timeout_secs;

        let provider = match config.provider {
            ConfigTranslationProvider::Google => TranslationProviderImpl::Google {
                client: GoogleTranslate::new(config.get_api_key(), endpoint, timeout_secs),
            },
            ConfigTranslationProvider::Ollama => TranslationProviderImpl::Ollama {
                client: Ollama::new(endpoint, timeout_secs),
                model: config.get_model(),
            },
        };

        Ok(Self {
            provider,
            retry: RetryPolicy {
                retries: config.common.retry_count,
                backoff_base_ms: config.common.retry_backoff_ms,
            },
        })
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Google { client } => client.test_connection().await,
            TranslationProviderImpl::Ollama { client, .. } => client.test_connection().await,
        }
    }

    async fn translate_once(&self, text: &str, source: &str, target: &str) -> Result<String, ProviderError> {
        match &self.provider {
            TranslationProviderImpl::Google { client } => {
                let request = TranslateRequest::new(text, source, target);
                let response = client.complete(request).await?;
                Ok(GoogleTranslate::extract_text(&response))
            }
            TranslationProviderImpl::Ollama { client, model } => {
                let request = GenerationRequest::new(model.clone(), text)
                    .system(system_prompt(source, target))
                    .temperature(0.0);
                let response = client.complete(request).await?;
                Ok(clean_model_output(&Ollama::extract_text(&response)))
            }
        }
    }
}

#[async_trait]
impl WordTranslator for OnlineTranslator {
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let source = request_language_code(source_language);
        let target = request_language_code(target_language);
        let translated = self.retry.run(|| self.translate_once(text, &source, &target)).await?;
        debug!("Translated '{}' ({} -> {}): '{}'", text, source, target, translated);
        Ok(translated)
    }
}

/// ISO 639-1 code where one exists; unknown codes are passed on without their region
fn request_language_code(code: &str) -> String {
    normalize_to_part1_or_part2t(code).unwrap_or_else(|_| base_language_code(code).to_string())
}

/// Instruction given to an LLM backend
fn system_prompt(source: &str, target: &str) -> String {
    let name = |code: &str| get_language_name(code).unwrap_or_else(|_| code.to_string());
    format!(
        "You are a professional translator. Translate the user's text from {} to {}. \
         Only respond with the translation, without quotes, explanations or notes.",
        name(source),
        name(target)
    )
}

/// First non-empty line of a model answer, without wrapping quotes
fn clean_model_output(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .trim_matches(|c| c == '"' || c == '\'' || c == '“' || c == '”')
        .to_string()
}
