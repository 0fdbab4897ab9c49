/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported providers:
 * - Google: Google Translate web endpoint (default)
 * - OpenAI: OpenAI-compatible chat completions API
 * - Anthropic: Anthropic messages API
 * - Mock: scriptable in-process provider for tests
 */

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

pub mod anthropic;
pub mod google;
pub mod mock;
pub mod openai;

/// A single text to translate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// The text to translate
    pub text: String,
    /// Source language code, or "auto"
    pub source_language: String,
    /// Target language code, passed through to the provider unvalidated
    pub target_language: String,
}

impl TranslationRequest {
    /// Create a new translation request
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Provider answer for a [`TranslationRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    /// The translated text
    pub text: String,
    /// Source language reported by the provider, when it detects one
    pub detected_source_language: Option<String>,
}

impl TranslationResponse {
    /// Create a response without language detection information
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detected_source_language: None,
        }
    }
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate one text
    ///
    /// # Arguments
    /// * `request` - The text and language pair
    ///
    /// # Returns
    /// * `Result<TranslationResponse, ProviderError>` - The translation or an error
    async fn translate(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError>;

    /// Human readable provider name used in log lines
    fn name(&self) -> &str;
}

/// Build the provider selected in the configuration
pub fn create_provider(config: &TranslationConfig) -> Result<Box<dyn Provider>> {
    let endpoint = config.get_endpoint();
    let provider: Box<dyn Provider> = match config.provider {
        TranslationProvider::Google => Box::new(google::GoogleTranslate::new(endpoint)),
        TranslationProvider::OpenAI => Box::new(openai::OpenAI::new(
            config.get_api_key(),
            endpoint,
            config.get_model(),
            config.common.system_prompt.clone(),
            config.common.temperature,
        )),
        TranslationProvider::Anthropic => Box::new(anthropic::Anthropic::new(
            config.get_api_key(),
            endpoint,
            config.get_model(),
            config.common.system_prompt.clone(),
            config.common.temperature,
        )),
    };
    Ok(provider)
}

/// Fill the `{source_language}` and `{target_language}` placeholders of a prompt template
pub(crate) fn build_system_prompt(template: &str, source_language: &str, target_language: &str) -> String {
    let source = if source_language.eq_ignore_ascii_case("auto") {
        "the source language".to_string()
    } else {
        crate::language_utils::display_name(source_language)
    };
    template
        .replace("{source_language}", &source)
        .replace("{target_language}", &crate::language_utils::display_name(target_language))
}

/// Shared HTTP client settings for provider clients
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_default()
}

/// Map a transport failure from reqwest
pub(crate) fn transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

/// Turn a non-success response into a [`ProviderError`]
pub(crate) async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let retry_after = retry_after_secs(response.headers());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    ProviderError::from_status(status, truncate(&body, 300), retry_after)
}

fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}…", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
