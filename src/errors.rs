/*!
 * Error types for the subalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems, detected before any tagging or translation work
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Only a single destination language is supported
    #[error("Unsupported destination language '{requested}' (only '{supported}' is supported)")]
    UnsupportedTargetLanguage {
        /// Language requested by the user
        requested: String,
        /// The one supported destination language
        supported: &'static str,
    },

    /// Language code is not a valid ISO 639 code
    #[error("Invalid language code: {0}")]
    InvalidLanguageCode(String),

    /// A word-list resource for one translation direction is missing
    #[error("Missing dictionary: {source_language} -> {target_language} ({})", .path.display())]
    MissingDictionary {
        /// Source language of the missing word list
        source_language: String,
        /// Target language of the missing word list
        target_language: String,
        /// Expected location of the word list
        path: PathBuf,
    },

    /// Both word lists exist but neither contains a usable entry
    #[error("Dictionary {source_language} <-> {target_language} contains no entries")]
    EmptyDictionary {
        source_language: String,
        target_language: String,
    },

    /// Word-vector file for a language is missing
    #[error("Missing word vectors for '{language}' ({})", .path.display())]
    MissingWordVectors {
        /// Language of the missing vectors
        language: String,
        /// Expected location of the vector file
        path: PathBuf,
    },

    /// The online translator needs a credential that was not configured
    #[error("Provider '{provider}' requires an API key")]
    MissingCredential {
        /// Provider name
        provider: String,
    },

    /// Endpoint URL could not be parsed
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        endpoint: String,
        reason: String,
    },
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether retrying the same request can succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }

    /// Map an HTTP error status and body onto the matching variant
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A caption's time range is inverted
    #[error("Invalid time range for entry {seq_num}: end {end_ms} < start {start_ms}")]
    InvalidTimeRange {
        seq_num: usize,
        start_ms: u64,
        end_ms: u64,
    },

    /// The content held no parseable caption
    #[error("No valid subtitle entries were found in {0}")]
    NoEntries(String),
}
