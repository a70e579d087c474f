/*!
 * Tests for application configuration
 */

use mdxlate::app_config::{Config, LogLevel};
use mdxlate::errors::AppError;

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_default_shouldMatchToolDefaults() {
    let config = Config::default();
    assert_eq!(config.source_language, "eng_Latn");
    assert_eq!(config.target_language, "uzn_Latn");
    assert_eq!(config.translation.endpoint, "https://websocket.tahrirchi.uz/translate-v2");
    assert_eq!(config.translation.model, "tilmoch");
    assert_eq!(config.translation.timeout_secs, 30);
    assert_eq!(config.translation.batch_size, 50);
    assert_eq!(config.translation.batch_separator, "\n|||TRANSLATE_SPLIT|||\n");
    assert_eq!(config.paths.extension, "mdx");
    assert!(config.cache.enabled);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("mdxlate.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.translation.batch_size, 50);
    // The credential is never written out
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(!written.contains("api_key"));
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(
        temp_dir.path(),
        "mdxlate.json",
        r#"{"target_language": "rus_Cyrl", "translation": {"batch_size": 10}, "log_level": "debug"}"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.target_language, "rus_Cyrl");
    assert_eq!(config.source_language, "eng_Latn");
    assert_eq!(config.translation.batch_size, 10);
    assert_eq!(config.translation.model, "tilmoch");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.extraction.min_alpha_chars, 10);
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(temp_dir.path(), "mdxlate.json", "{ broken").unwrap();
    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_validate_withMissingApiKey_shouldReturnConfigurationError() {
    let config = Config::default();
    assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
    assert!(config.validate_settings().is_ok());
}

#[test]
fn test_validate_withApiKey_shouldSucceed() {
    let mut config = Config::default();
    config.translation.api_key = "secret".into();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validateSettings_withBadValues_shouldFail() {
    let mut config = Config::default();
    config.translation.batch_size = 0;
    assert!(config.validate_settings().is_err());

    let mut config = Config::default();
    config.translation.batch_separator = String::new();
    assert!(config.validate_settings().is_err());

    let mut config = Config::default();
    config.translation.endpoint = "::not-a-url".into();
    assert!(config.validate_settings().is_err());
}
