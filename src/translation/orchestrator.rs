/*!
 * Sequential translation of a resource document.
 *
 * Entries are translated one at a time in document order. Each result is
 * committed to the document before the next request is sent.
 */

use log::{debug, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::core::TranslationService;
use crate::app_config::{FailurePolicy, TranslationCommonConfig};
use crate::document::ResourceDocument;
use crate::errors::TranslationError;

/// Cooperative cancellation flag shared between the run and its owner
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the run stops before its next provider call
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of translating one entry, handed to the progress callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Entry key
    pub key: String,
    /// Trimmed source text sent to the provider
    pub original: String,
    /// Text written into the entry
    pub translated: String,
    /// Requested target language
    pub target_language: String,
}

/// Counts for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries in the document
    pub total_entries: usize,
    /// Entries whose value was replaced
    pub translated: usize,
    /// Entries left alone because they are empty or not text resources
    pub skipped: usize,
    /// Keys of entries that failed and were left unchanged
    pub failed: Vec<String>,
    /// Where the document was written, once saved
    pub output_path: Option<PathBuf>,
}

impl RunSummary {
    /// Whether every translatable entry was translated
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Walks the translatable entries of a document and translates them in place
#[derive(Debug)]
pub struct TranslationOrchestrator {
    service: TranslationService,
    source_language: String,
    rate_limit_delay: Duration,
    on_error: FailurePolicy,
    cancellation: CancellationToken,
}

impl TranslationOrchestrator {
    /// Create an orchestrator around a translation service
    pub fn new(
        service: TranslationService,
        source_language: impl Into<String>,
        common: &TranslationCommonConfig,
    ) -> Self {
        Self {
            service,
            source_language: source_language.into(),
            rate_limit_delay: Duration::from_millis(common.rate_limit_delay_ms),
            on_error: common.on_error,
            cancellation: CancellationToken::new(),
        }
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Name of the provider behind this run
    pub fn provider_name(&self) -> &str {
        self.service.provider_name()
    }

    /// Translate every translatable entry of `doc` into `target_language`.
    ///
    /// `on_progress` is called once per translated entry, in document order.
    /// With [`FailurePolicy::Abort`] the first failed entry ends the run and the
    /// document must not be saved.
    pub async fn run<F>(
        &self,
        doc: &mut ResourceDocument,
        target_language: &str,
        mut on_progress: F,
    ) -> Result<RunSummary, TranslationError>
    where
        F: FnMut(&TranslationResult),
    {
        let total_entries = doc.entries().len();
        let mut summary = RunSummary {
            total_entries,
            skipped: total_entries - doc.translatable_count(),
            ..Default::default()
        };
        let mut calls = 0usize;

        for entry in doc.translatable_mut() {
            if self.cancellation.is_cancelled() {
                return Err(TranslationError::Cancelled {
                    key: entry.key().to_string(),
                });
            }

            let Some(original) = entry.source_text().map(str::to_string) else {
                summary.skipped += 1;
                continue;
            };

            if calls > 0 && !self.rate_limit_delay.is_zero() {
                tokio::time::sleep(self.rate_limit_delay).await;
            }
            calls += 1;

            debug!("Translating entry '{}'", entry.key());
            match self
                .service
                .translate_text(&original, &self.source_language, target_language)
                .await
            {
                Ok(response) => {
                    entry.set_value(&response.text);
                    summary.translated += 1;
                    on_progress(&TranslationResult {
                        key: entry.key().to_string(),
                        original,
                        translated: response.text,
                        target_language: target_language.to_string(),
                    });
                }
                Err(source) => match self.on_error {
                    FailurePolicy::Abort => {
                        return Err(TranslationError::Entry {
                            key: entry.key().to_string(),
                            source,
                        });
                    }
                    FailurePolicy::Skip => {
                        warn!(
                            "Leaving entry '{}' untranslated ({}): {}",
                            entry.key(),
                            source.kind(),
                            source
                        );
                        summary.failed.push(entry.key().to_string());
                    }
                },
            }
        }

        Ok(summary)
    }
}
