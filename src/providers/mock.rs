/*!
 * Mock provider implementations for testing.
 *
 * This module provides a scriptable provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a tagged or mapped translation
 * - `MockProvider::echo()` - Returns the input unchanged
 * - `MockProvider::failing()` - Always fails with a permanent error
 * - `MockProvider::fail_on_call()` / `fail_on_text()` - Fails for one request
 * - `MockProvider::slow()` - Delays every answer, for timeout testing
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::{Provider, TranslationRequest, TranslationResponse};
use crate::errors::ProviderError;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Succeeds with the mapped text, or `[target] text` when unmapped
    Working,
    /// Returns the input text unchanged
    Echo,
    /// Always fails with a permanent API error
    Failing,
    /// Fails on the given zero-based call number only
    FailOnCall { call: usize, transient: bool },
    /// Fails whenever the request text equals `text`
    FailOnText { text: String, transient: bool },
    /// Answers like `Working` after a delay
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
///
/// Clones share the call log, so a test can keep a handle after boxing the provider.
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Fixed answers by source text
    mapping: Arc<HashMap<String, String>>,
    /// Every request received, in order
    calls: Arc<Mutex<Vec<TranslationRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            mapping: Arc::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that returns its input
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails on one call
    pub fn fail_on_call(call: usize, transient: bool) -> Self {
        Self::new(MockBehavior::FailOnCall { call, transient })
    }

    /// Create a mock that fails for one source text
    pub fn fail_on_text(text: impl Into<String>, transient: bool) -> Self {
        Self::new(MockBehavior::FailOnText {
            text: text.into(),
            transient,
        })
    }

    /// Create a mock that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Use fixed answers for the given source texts
    pub fn with_mapping<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.mapping = Arc::new(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Requests received so far
    pub fn calls(&self) -> Vec<TranslationRequest> {
        self.calls.lock().clone()
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn answer(&self, request: &TranslationRequest) -> TranslationResponse {
        let text = match self.mapping.get(&request.text) {
            Some(mapped) => mapped.clone(),
            None => format!("[{}] {}", request.target_language, request.text),
        };
        TranslationResponse::new(text)
    }

    fn simulated_error(transient: bool) -> ProviderError {
        if transient {
            ProviderError::ConnectionError("Simulated connection reset".to_string())
        } else {
            ProviderError::ApiError {
                status_code: 400,
                message: "Simulated bad request".to_string(),
            }
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(&self, request: TranslationRequest) -> Result<TranslationResponse, ProviderError> {
        let call = {
            let mut calls = self.calls.lock();
            calls.push(request.clone());
            calls.len() - 1
        };

        match &self.behavior {
            MockBehavior::Working => Ok(self.answer(&request)),
            MockBehavior::Echo => Ok(TranslationResponse::new(request.text)),
            MockBehavior::Failing => Err(Self::simulated_error(false)),
            MockBehavior::FailOnCall { call: failing, transient } => {
                if call == *failing {
                    Err(Self::simulated_error(*transient))
                } else {
                    Ok(self.answer(&request))
                }
            }
            MockBehavior::FailOnText { text, transient } => {
                if request.text == *text {
                    Err(Self::simulated_error(*transient))
                } else {
                    Ok(self.answer(&request))
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(self.answer(&request))
            }
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
