/*!
 * Tests for error types and conversions
 */

use resxlate::errors::{AppError, DocumentError, ProviderError, TranslationError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_fromStatus_shouldMapCodes() {
    assert!(matches!(
        ProviderError::from_status(401, "nope", None),
        ProviderError::AuthenticationError(_)
    ));
    assert!(matches!(
        ProviderError::from_status(429, "slow", Some(3)),
        ProviderError::RateLimitExceeded { retry_after_secs: Some(3), .. }
    ));
    assert!(matches!(
        ProviderError::from_status(400, "bad tl", None),
        ProviderError::ApiError { status_code: 400, .. }
    ));
}

#[test]
fn test_providerError_isTransient_shouldClassifyFailures() {
    assert!(ProviderError::ConnectionError("reset".to_string()).is_transient());
    assert!(ProviderError::Timeout { secs: 30 }.is_transient());
    assert!(ProviderError::from_status(503, "down", None).is_transient());
    assert!(ProviderError::from_status(429, "slow", None).is_transient());

    assert!(!ProviderError::from_status(400, "bad", None).is_transient());
    assert!(!ProviderError::from_status(403, "denied", None).is_transient());
    assert!(!ProviderError::ParseError("garbage".to_string()).is_transient());
}

#[test]
fn test_translationError_entry_shouldNameKeyAndKind() {
    let error = TranslationError::Entry {
        key: "Greeting".to_string(),
        source: ProviderError::Timeout { secs: 5 },
    };
    let display = error.to_string();
    assert!(display.contains("Greeting"));
    assert!(display.contains("transient"));
    assert!(display.contains("5s"));
}

#[test]
fn test_appError_fromDocumentError_shouldWrap() {
    let error: AppError = DocumentError::Parse("unclosed element".to_string()).into();
    assert!(matches!(error, AppError::Document(_)));
    assert!(error.to_string().contains("unclosed element"));
}

#[test]
fn test_appError_fromTranslationError_shouldWrap() {
    let error: AppError = TranslationError::Cancelled {
        key: "Greeting".to_string(),
    }
    .into();
    assert!(matches!(error, AppError::Translation(_)));
    assert!(error.to_string().contains("Greeting"));
}
