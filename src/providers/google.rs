use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use super::{Provider, TranslationRequest, TranslationResponse};
use crate::errors::ProviderError;

/// Google Translate client using the public `translate_a/single` endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, e.g. `https://translate.googleapis.com`
    endpoint: String,
}

impl GoogleTranslate {
    /// Create a new Google Translate client
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: super::http_client(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'))
    }

    /// Extract the translation from the nested array the endpoint returns.
    ///
    /// The body looks like `[[["Hola","Hello",null,null,10],...],null,"en",...]`:
    /// sentences are in `[0][i][0]` and the detected language in `[2]`.
    pub fn parse_response(body: &str) -> Result<TranslationResponse, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("invalid JSON from Google Translate: {}", e)))?;

        let sentences = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("missing sentence list in response".to_string()))?;

        let text: String = sentences
            .iter()
            .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
            .collect();

        if text.is_empty() {
            return Err(ProviderError::ParseError("response contained no translated text".to_string()));
        }

        Ok(TranslationResponse {
            text,
            detected_source_language: value.get(2).and_then(Value::as_str).map(str::to_string),
        })
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    async fn translate(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError> {
        let response = self
            .client
            .get(self.api_url())
            .query(&[
                ("client", "gtx"),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await
            .map_err(super::transport_error)?;

        if !response.status().is_success() {
            return Err(super::error_from_response(response).await);
        }

        let body = response.text().await.map_err(super::transport_error)?;
        let parsed = Self::parse_response(&body)?;
        if let Some(detected) = &parsed.detected_source_language {
            debug!("Google Translate detected source language '{}'", detected);
        }
        Ok(parsed)
    }

    fn name(&self) -> &str {
        "Google Translate"
    }
}
