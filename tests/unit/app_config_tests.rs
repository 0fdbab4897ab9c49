/*!
 * Tests for application configuration functionality
 */

use resxlate::app_config::{Config, FailurePolicy, LogLevel, TranslationProvider};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "auto");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.get_endpoint(), "https://translate.googleapis.com");
    assert_eq!(config.translation.get_timeout_secs(), 30);
    assert_eq!(config.translation.common.rate_limit_delay_ms, 200);
    assert_eq!(config.translation.common.retry_count, 3);
    assert_eq!(config.translation.common.on_error, FailurePolicy::Abort);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.source_language = "  ".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    // LLM providers need a key
    config.translation.provider = TranslationProvider::Anthropic;
    assert!(config.validate().is_err());
    config.translation.active_provider_config_mut().api_key = "sk-test".to_string();
    assert!(config.validate().is_ok());

    config.translation.active_provider_config_mut().endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.translation.active_provider_config_mut().timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "resxlate.json",
        r#"{
            "source_language": "en",
            "translation": {
                "provider": "openai",
                "available_providers": [
                    { "type": "openai", "model": "gpt-4o", "api_key": "key" }
                ],
                "common": { "on_error": "skip", "rate_limit_delay_ms": 0 }
            },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.get_model(), "gpt-4o");
    assert_eq!(config.translation.get_api_key(), "key");
    assert_eq!(config.translation.get_endpoint(), "https://api.openai.com/v1");
    assert_eq!(config.translation.common.on_error, FailurePolicy::Skip);
    assert_eq!(config.translation.common.rate_limit_delay_ms, 0);
    assert_eq!(config.translation.common.retry_count, 3);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_from_file_withMissingFile_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    assert!(Config::from_file(dir.path().join("absent.json")).is_err());
}

#[test]
fn test_active_provider_config_mut_withMissingEntry_shouldInsertDefaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::OpenAI;

    config.translation.active_provider_config_mut().api_key = "abc".to_string();

    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_api_key(), "abc");
    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
}
