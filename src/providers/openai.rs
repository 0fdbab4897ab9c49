use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Provider, TranslationRequest, TranslationResponse};
use crate::errors::ProviderError;

/// Client for OpenAI-compatible chat completion APIs
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// Bearer token
    api_key: String,
    /// Base URL, including the version segment (e.g. `https://api.openai.com/v1`)
    endpoint: String,
    /// Model name
    model: String,
    /// System prompt template
    system_prompt: String,
    /// Sampling temperature
    temperature: f32,
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Chat message
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// system, user or assistant
    pub role: String,
    /// Message text
    pub content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Generated choices, the first one is used
    pub choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIMessage,
}

impl OpenAIRequest {
    /// Create an empty request for `model`
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl OpenAI {
    /// Create a new OpenAI client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client: super::http_client(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            system_prompt: system_prompt.into(),
            temperature,
        }
    }

    /// Send a chat completion request
    pub async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let api_url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(super::transport_error)?;

        if !response.status().is_success() {
            let err = super::error_from_response(response).await;
            error!("OpenAI API error: {}", err);
            return Err(err);
        }

        response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse OpenAI API response: {}", e)))
    }
}

#[async_trait]
impl Provider for OpenAI {
    async fn translate(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError> {
        let system = super::build_system_prompt(
            &self.system_prompt,
            &request.source_language,
            &request.target_language,
        );
        let body = OpenAIRequest::new(&self.model)
            .temperature(self.temperature)
            .add_message("system", system)
            .add_message("user", request.text);

        let response = self.complete(body).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::ParseError("OpenAI returned no translation".to_string()))?;

        Ok(TranslationResponse::new(text.trim()))
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}
