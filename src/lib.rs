/*!
 * # resxlate - machine translation for .NET resource files
 *
 * A Rust library for translating the string values of `.resx` documents
 * while leaving everything else in the file untouched.
 *
 * ## Features
 *
 * - Lossless `.resx` round-trip: only translated values change
 * - Encoding detection (BOM, UTF-16, declared encoding) and preservation
 * - Translate strings using various providers:
 *   - Google Translate (default)
 *   - OpenAI-compatible chat completion APIs
 *   - Anthropic API
 * - Sequential translation with timeouts, retries and rate limiting
 * - Abort or skip on failed entries
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: `.resx` parsing, entry selection and rendering
 * - `translation`: Translation of document entries:
 *   - `translation::core`: Provider calls with timeout and retries
 *   - `translation::orchestrator`: Sequential walk over a document
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for translation services
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use document::{ResourceDocument, ResourceEntry};
pub use errors::{AppError, DocumentError, ProviderError, TranslationError};
pub use language_utils::get_language_name;
pub use translation::{CancellationToken, RunSummary, TranslationOrchestrator, TranslationService};
