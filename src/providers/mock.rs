/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::echo()` - Returns the input text unchanged
 * - `MockProvider::uppercase()` - Returns the input text uppercased
 * - `MockProvider::failing()` - Always fails with an API error
 * - `MockProvider::missing_field()` - Succeeds without a translation field
 *
 * Every request is counted and recorded so tests can assert on the calls made.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The translated text, if the mock produced one
    pub text: Option<String>,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Returns the text unchanged
    Echo,
    /// Returns the text uppercased (batch separators survive)
    Uppercase,
    /// Always fails with an API error
    Failing,
    /// Succeeds but the response has no translation
    MissingField,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of requests received
    request_count: Arc<AtomicUsize>,
    /// Texts of every request received, in order
    requests: Arc<Mutex<Vec<String>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
    /// Requests matching this predicate fail (optional)
    fail_when: Option<fn(&MockRequest) -> bool>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
            fail_when: None,
        }
    }

    /// Create a mock provider that returns its input
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock provider that uppercases its input
    pub fn uppercase() -> Self {
        Self::new(MockBehavior::Uppercase)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock whose responses lack the translation field
    pub fn missing_field() -> Self {
        Self::new(MockBehavior::MissingField)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Fail every request the predicate accepts
    pub fn with_failure_when(mut self, predicate: fn(&MockRequest) -> bool) -> Self {
        self.fail_when = Some(predicate);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Texts of all requests received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
            fail_when: self.fail_when,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.text.clone());

        if self.fail_when.is_some_and(|predicate| predicate(&request)) {
            return Err(ProviderError::ConnectionError("Mock connection refused".into()));
        }

        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Mock provider failure".into(),
            }),
            MockBehavior::MissingField => Ok(MockResponse { text: None }),
            MockBehavior::Echo | MockBehavior::Uppercase => {
                let text = if let Some(generator) = self.custom_response {
                    generator(&request)
                } else if self.behavior == MockBehavior::Uppercase {
                    request.text.to_uppercase()
                } else {
                    request.text.clone()
                };
                Ok(MockResponse { text: Some(text) })
            }
        }
    }

    fn extract_text(response: &Self::Response) -> Result<String, ProviderError> {
        response.text.clone().ok_or(ProviderError::MissingTranslation)
    }
}
