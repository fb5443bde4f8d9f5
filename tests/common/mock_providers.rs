/*!
 * Mock translator implementations for testing
 *
 * These implement `WordTranslator` with predetermined answers so that no
 * test ever reaches an external API.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use subalign::errors::ProviderError;
use subalign::translation::WordTranslator;

/// Type of error to simulate
#[derive(Debug, Clone, Copy, Default)]
pub enum MockErrorType {
    /// Authentication error (invalid API key)
    #[default]
    Auth,
    /// Connection error
    Connection,
    /// Rate limit error
    RateLimit,
}

impl MockErrorType {
    fn to_error(self) -> ProviderError {
        match self {
            Self::Auth => ProviderError::AuthenticationError("Invalid API key".to_string()),
            Self::Connection => ProviderError::ConnectionError("Connection refused".to_string()),
            Self::RateLimit => ProviderError::RateLimitExceeded("Too many requests".to_string()),
        }
    }
}

/// Translator answering from a fixed `(source, target) -> text -> translation` table
#[derive(Debug, Default)]
pub struct MockTranslator {
    table: HashMap<(String, String), HashMap<String, String>>,
    failing_words: Vec<String>,
    error_type: MockErrorType,
    calls: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a translation for one direction
    pub fn with(mut self, source: &str, target: &str, text: &str, translation: &str) -> Self {
        self.table
            .entry((source.to_string(), target.to_string()))
            .or_default()
            .insert(text.to_string(), translation.to_string());
        self
    }

    /// Make every request for `word` fail
    pub fn failing_on(mut self, word: &str, error_type: MockErrorType) -> Self {
        self.failing_words.push(word.to_string());
        self.error_type = error_type;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts requested so far, sorted
    pub fn requested(&self) -> Vec<String> {
        let mut requests = self.requests.lock().map(|r| r.clone()).unwrap_or_default();
        requests.sort();
        requests
    }
}

#[async_trait]
impl WordTranslator for MockTranslator {
    async fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(text.to_string());
        }

        if self.failing_words.iter().any(|w| w == text) {
            return Err(self.error_type.to_error());
        }

        Ok(self
            .table
            .get(&(source_language.to_string(), target_language.to_string()))
            .and_then(|words| words.get(text))
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}
