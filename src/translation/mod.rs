/*!
 * Translation of resource entries through a provider.
 *
 * - `core`: `TranslationService`, one provider call with timeout and retries
 * - `retry`: backoff schedule for transient failures
 * - `orchestrator`: sequential walk over a document's translatable entries
 */

pub use self::core::TranslationService;
pub use self::orchestrator::{CancellationToken, RunSummary, TranslationOrchestrator, TranslationResult};
pub use self::retry::RetryPolicy;

pub mod core;
pub mod orchestrator;
pub mod retry;
