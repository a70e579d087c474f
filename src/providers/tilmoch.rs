use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Client for the Tilmoch translation API
#[derive(Debug)]
pub struct Tilmoch {
    /// HTTP client for API requests
    client: Client,
    /// Credential sent in the `Authorization` header
    api_key: String,
    /// Full URL of the translate endpoint
    endpoint: String,
    /// Per-request timeout, for error reporting
    timeout_secs: u64,
}

/// Tilmoch translate request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TilmochRequest {
    /// Text to translate (may be several texts joined by a separator)
    pub text: String,

    /// Source language code, e.g. `eng_Latn`
    pub source_lang: String,

    /// Target language code, e.g. `uzn_Latn`
    pub target_lang: String,

    /// Model identifier
    pub model: String,
}

/// Tilmoch translate response
#[derive(Debug, Clone, Deserialize)]
pub struct TilmochResponse {
    /// The translated text; absent on some soft failures
    #[serde(default)]
    pub translated_text: Option<String>,
}

impl TilmochRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            model: model.into(),
        }
    }
}

impl Tilmoch {
    /// Create a new Tilmoch client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            timeout_secs,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl Provider for Tilmoch {
    type Request = TilmochRequest;
    type Response = TilmochResponse;

    async fn complete(&self, request: TilmochRequest) -> Result<TilmochResponse, ProviderError> {
        debug!(
            "POST {} ({} chars, {} -> {})",
            self.endpoint,
            request.text.chars().count(),
            request.source_lang,
            request.target_lang
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, &self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Tilmoch API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<TilmochResponse>()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::ParseError(e.to_string())
                }
            })
    }

    fn extract_text(response: &TilmochResponse) -> Result<String, ProviderError> {
        response
            .translated_text
            .clone()
            .ok_or(ProviderError::MissingTranslation)
    }
}
