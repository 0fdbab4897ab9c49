/*!
 * Core translation service implementation.
 *
 * `TranslationService` owns the provider for the duration of a run and wraps
 * every call with a timeout and the retry policy.
 */

use anyhow::Result;
use log::{debug, warn};
use std::time::Duration;

use super::retry::RetryPolicy;
use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::{self, Provider, TranslationRequest, TranslationResponse};

/// Translation service bound to one provider
#[derive(Debug)]
pub struct TranslationService {
    /// The provider client, dropped with the service
    provider: Box<dyn Provider>,

    /// Upper bound for one provider call
    timeout: Duration,

    /// Retry schedule for transient failures
    retry_policy: RetryPolicy,
}

impl TranslationService {
    /// Create a service around an existing provider
    pub fn new(provider: Box<dyn Provider>, config: &TranslationConfig) -> Self {
        Self {
            provider,
            timeout: Duration::from_secs(config.get_timeout_secs()),
            retry_policy: RetryPolicy::from_config(&config.common),
        }
    }

    /// Create a service with the provider selected in the configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let provider = providers::create_provider(config)?;
        Ok(Self::new(provider, config))
    }

    /// Replace the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Translate one text, retrying transient failures
    pub async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResponse, ProviderError> {
        let request = TranslationRequest::new(text, source_language, target_language);
        let mut attempt = 0;

        loop {
            let error = match tokio::time::timeout(self.timeout, self.provider.translate(request.clone())).await {
                Ok(Ok(response)) => {
                    if response.text.is_empty() {
                        warn!("{} returned an empty translation for '{}'", self.provider.name(), text);
                    }
                    return Ok(response);
                }
                Ok(Err(error)) => error,
                Err(_) => ProviderError::Timeout {
                    secs: self.timeout.as_secs(),
                },
            };

            match self.retry_policy.next_delay(&error, attempt) {
                Some(delay) => {
                    attempt += 1;
                    warn!(
                        "{} request failed ({}), retry {}/{} in {}ms",
                        self.provider.name(),
                        error,
                        attempt,
                        self.retry_policy.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    debug!("Giving up after {} attempt(s): {}", attempt + 1, error);
                    return Err(error);
                }
            }
        }
    }
}
