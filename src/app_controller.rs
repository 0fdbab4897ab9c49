use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;

use crate::app_config::Config;
use crate::document::ResourceDocument;
use crate::language_utils;
use crate::providers::{self, Provider};
use crate::translation::{CancellationToken, RunSummary, TranslationOrchestrator, TranslationService};

// @module: Application controller for resource file translation

/// Main application controller: one run reads, translates and writes one document
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared with the Ctrl-C handler
    cancellation: CancellationToken,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self {
            config,
            cancellation: CancellationToken::new(),
        })
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate `input` into `target_language` and write the result to `output`.
    ///
    /// The provider is built for this run and dropped when it ends.
    pub async fn run(&self, input: &Path, output: &Path, target_language: &str) -> Result<RunSummary> {
        let provider = providers::create_provider(&self.config.translation)
            .context("Failed to create translation provider")?;
        self.run_with_provider(input, output, target_language, provider).await
    }

    /// Same as [`Controller::run`] with a caller supplied provider
    pub async fn run_with_provider(
        &self,
        input: &Path,
        output: &Path,
        target_language: &str,
        provider: Box<dyn Provider>,
    ) -> Result<RunSummary> {
        let mut document = ResourceDocument::load(input)
            .with_context(|| format!("Failed to load resource file {}", input.display()))?;

        let target_name = language_utils::display_name(target_language);
        if !language_utils::is_known_language(target_language) {
            warn!("Unrecognized target language code '{}', passing it to the provider as is", target_language);
        }

        let service = TranslationService::new(provider, &self.config.translation);
        let orchestrator = TranslationOrchestrator::new(
            service,
            self.config.source_language.clone(),
            &self.config.translation.common,
        )
        .with_cancellation(self.cancellation.clone());

        info!(
            "resxlate: {} ({} -> {}), {} of {} entries to translate",
            orchestrator.provider_name(),
            self.config.source_language,
            target_name,
            document.translatable_count(),
            document.entries().len()
        );

        let progress_bar = ProgressBar::new(document.translatable_count() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} entries ({percent}%) {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let pb = progress_bar.clone();
        let result = orchestrator
            .run(&mut document, target_language, move |translated| {
                pb.suspend(|| info!("Translated: '{}' -> '{}'", translated.original, translated.translated));
                pb.inc(1);
            })
            .await;
        progress_bar.finish_and_clear();
        drop(orchestrator);

        let mut summary = result.context("Translation failed, no output written")?;

        document
            .save(output)
            .with_context(|| format!("Failed to save translated file {}", output.display()))?;
        summary.output_path = Some(output.to_path_buf());

        if !summary.failed.is_empty() {
            warn!(
                "{} entries left untranslated: {}",
                summary.failed.len(),
                summary.failed.join(", ")
            );
        }
        info!("Translated .resx file saved as {}", output.display());

        Ok(summary)
    }
}
