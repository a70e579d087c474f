/*!
 * Tests for error types and conversions
 */

use mdxlate::errors::{AppError, ProviderError, TranslationError};

#[test]
fn test_providerError_display_shouldDescribeFailure() {
    let error = ProviderError::ApiError {
        status_code: 401,
        message: "invalid key".into(),
    };
    assert_eq!(error.to_string(), "API responded with error: 401 - invalid key");
    assert_eq!(
        ProviderError::Timeout(30).to_string(),
        "Request timed out after 30 seconds"
    );
}

#[test]
fn test_translationError_fromProvider_shouldWrap() {
    let error: TranslationError = ProviderError::MissingTranslation.into();
    assert_eq!(error, TranslationError::Provider(ProviderError::MissingTranslation));

    let alignment = TranslationError::Alignment { expected: 3, actual: 2 };
    assert_eq!(alignment.to_string(), "Batch split mismatch: expected 3 parts, got 2");
}

#[test]
fn test_appError_conversions_shouldPickVariant() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    assert!(matches!(AppError::from(io), AppError::File(_)));

    let provider: AppError = ProviderError::ConnectionError("refused".into()).into();
    assert!(matches!(provider, AppError::Provider(_)));

    let other: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(other, AppError::Unknown(ref m) if m == "boom"));
}
