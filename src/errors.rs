/*!
 * Error types for the resxlate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

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
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from the API
        message: String,
        /// Delay requested by the server through `Retry-After`
        retry_after_secs: Option<u64>,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The provider did not answer within the configured timeout
    #[error("Request timed out after {secs}s")]
    Timeout {
        /// Timeout that elapsed, in seconds
        secs: u64,
    },
}

impl ProviderError {
    /// Build an error from a non-success HTTP status and its body.
    pub fn from_status(status_code: u16, message: impl Into<String>, retry_after_secs: Option<u64>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded { message, retry_after_secs },
            _ => Self::ApiError { status_code, message },
        }
    }

    /// Whether repeating the same request may succeed.
    ///
    /// Network failures, timeouts, throttling and server-side errors are
    /// transient. Rejections of the request itself (bad language code,
    /// authentication, unparseable response) are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(_)
            | Self::ConnectionError(_)
            | Self::RateLimitExceeded { .. }
            | Self::Timeout { .. } => true,
            Self::ApiError { status_code, .. } => *status_code == 408 || *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }

    /// Short label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        if self.is_transient() { "transient" } else { "permanent" }
    }
}

/// Errors raised while loading or writing a resource document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input is not well-formed XML or does not follow the resx schema
    #[error("Malformed resource document: {0}")]
    Parse(String),

    /// The output file could not be written
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A single entry could not be translated
    #[error("Failed to translate entry '{key}' ({}): {source}", .source.kind())]
    Entry {
        key: String,
        source: ProviderError,
    },

    /// The run was cancelled before the entry was sent to the provider
    #[error("Translation cancelled before entry '{key}'")]
    Cancelled { key: String },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the document adapter
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}
