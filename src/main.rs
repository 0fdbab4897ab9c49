// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use resxlate::app_config::{self, Config, FailurePolicy, TranslationProvider};
use resxlate::file_utils::FileManager;
use resxlate::{CancellationToken, Controller};

/// Configuration file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "resxlate.json";

/// Exit status when a second interrupt ends the process (128 + SIGINT)
const EXIT_INTERRUPTED: i32 = 130;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for FailurePolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFailurePolicy {
    Abort,
    Skip,
}

impl From<CliFailurePolicy> for FailurePolicy {
    fn from(cli_policy: CliFailurePolicy) -> Self {
        match cli_policy {
            CliFailurePolicy::Abort => FailurePolicy::Abort,
            CliFailurePolicy::Skip => FailurePolicy::Skip,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for resxlate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// resxlate - translate the string resources of a .resx file
#[derive(Parser, Debug)]
#[command(name = "resxlate")]
#[command(version)]
#[command(about = "Machine translation for .NET .resx resource files")]
#[command(long_about = "resxlate translates every string value of a .resx file and writes the result
to a new file. Keys, comments, binary resources and formatting are kept as they are.

EXAMPLES:
    resxlate Strings.resx Strings.es.resx es                    # Google Translate, source auto-detected
    resxlate -s en Strings.resx Strings.de.resx de              # Explicit source language
    resxlate -p openai --api-key KEY in.resx out.resx fr        # Use an OpenAI-compatible API
    resxlate --on-error skip in.resx out.resx ja                # Keep going past failed entries
    resxlate completions bash > resxlate.bash                   # Generate bash completions

CONFIGURATION:
    Settings are read from resxlate.json in the working directory when it exists,
    or from the file given with --config. Command line options take precedence.

SUPPORTED PROVIDERS:
    google    - Google Translate web endpoint (default, no key needed)
    openai    - OpenAI-compatible chat completions (requires API key)
    anthropic - Anthropic Claude API (requires API key)")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .resx file
    #[arg(value_name = "INPUT", required = true)]
    input: Option<PathBuf>,

    /// Path of the translated .resx file
    #[arg(value_name = "OUTPUT", required = true)]
    output: Option<PathBuf>,

    /// Target language code (e.g. 'es', 'fr', 'zh-CN')
    #[arg(value_name = "TARGET_LANGUAGE", required = true)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name for LLM providers
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the selected provider
    #[arg(long, env = "RESXLATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Provider endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Source language code, or 'auto'
    #[arg(short, long)]
    source_language: Option<String>,

    /// Timeout for a single provider request, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Retries for transient provider failures
    #[arg(long)]
    retry_count: Option<u32>,

    /// What to do with an entry that cannot be translated
    #[arg(long, value_enum)]
    on_error: Option<CliFailurePolicy>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The filter is enforced through log::set_max_level so it can change after startup.
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Usage errors exit here with status 2, before any file is touched
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "resxlate", &mut std::io::stdout());
        return;
    }

    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    if let Err(e) = run_translate(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    let (Some(input), Some(output), Some(target_language)) =
        (options.input.clone(), options.output.clone(), options.target_language.clone())
    else {
        return Err(anyhow!("INPUT, OUTPUT and TARGET_LANGUAGE are required"));
    };

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let cancellation = CancellationToken::new();
    let controller = Controller::with_config(config)?.with_cancellation(cancellation.clone());

    tokio::spawn(async move {
        if let Some(code) = watch_interrupts(tokio::signal::ctrl_c, cancellation).await {
            std::process::exit(code);
        }
    });

    controller.run(&input, &output, &target_language).await?;
    Ok(())
}

/// Cancel the run on the first interrupt. A second interrupt yields the exit
/// status, so a pending retry backoff cannot keep the process alive.
async fn watch_interrupts<F, Fut>(mut next_interrupt: F, cancellation: CancellationToken) -> Option<i32>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    next_interrupt().await.ok()?;
    warn!("Interrupted, stopping after the current entry (press Ctrl-C again to quit now)");
    cancellation.cancel();

    next_interrupt().await.ok()?;
    error!("Interrupted again, exiting without writing output");
    Some(EXIT_INTERRUPTED)
}

/// Load the configuration file, if any, and apply command line overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None if FileManager::file_exists(DEFAULT_CONFIG_FILE) => Config::from_file(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_FILE))?,
        None => Config::default(),
    };

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }

    if let Some(on_error) = &options.on_error {
        config.translation.common.on_error = on_error.clone().into();
    }

    if let Some(retry_count) = options.retry_count {
        config.translation.common.retry_count = retry_count;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    let provider_config = config.translation.active_provider_config_mut();
    if let Some(model) = &options.model {
        provider_config.model = model.clone();
    }
    if let Some(api_key) = &options.api_key {
        provider_config.api_key = api_key.clone();
    }
    if let Some(endpoint) = &options.endpoint {
        provider_config.endpoint = endpoint.clone();
    }
    if let Some(timeout_secs) = options.timeout_secs {
        provider_config.timeout_secs = timeout_secs;
    }

    Ok(config)
}
