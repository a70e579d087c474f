/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which sends
 * single texts to the configured provider, together with the typed
 * outcome threaded through the rest of the pipeline.
 */

use anyhow::{anyhow, Result};
use log::debug;
use std::fmt;
use std::time::{Duration, Instant};
use url::Url;

use crate::app_config::Config;
use crate::errors::ProviderError;
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::tilmoch::{Tilmoch, TilmochRequest};
use crate::providers::Provider;

use super::cache::truncate_text;

/// Number of characters shown when logging a request preview
const PREVIEW_CHARS: usize = 50;

/// How a translated text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Found in the translation cache
    Cache,
    /// Part of a batched request that split cleanly
    Batch,
    /// Sent on its own
    Individual,
    /// Blank text, returned without a request
    Blank,
}

/// Result of translating one unit; failures carry the original text
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    Translated {
        text: String,
        via: Resolution,
    },
    Untranslated {
        original: String,
        reason: ProviderError,
    },
}

impl TranslationOutcome {
    /// Text to write back into the document
    pub fn text(&self) -> &str {
        match self {
            TranslationOutcome::Translated { text, .. } => text,
            TranslationOutcome::Untranslated { original, .. } => original,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationOutcome::Translated { .. })
    }
}

/// Counters for one document or a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationStats {
    /// Units handed to the coordinator
    pub units: usize,
    /// Units answered from the cache
    pub cache_hits: usize,
    /// Batched provider calls
    pub batch_calls: usize,
    /// Single-text provider calls
    pub individual_calls: usize,
    /// Batches whose response did not split into one part per text
    pub alignment_fallbacks: usize,
    /// Units left in the source language
    pub failures: usize,
    /// Time spent waiting on the provider
    pub api_duration: Duration,
}

impl TranslationStats {
    /// Total number of provider calls
    pub fn api_calls(&self) -> usize {
        self.batch_calls + self.individual_calls
    }

    /// Fold another set of counters into this one
    pub fn merge(&mut self, other: &TranslationStats) {
        self.units += other.units;
        self.cache_hits += other.cache_hits;
        self.batch_calls += other.batch_calls;
        self.individual_calls += other.individual_calls;
        self.alignment_fallbacks += other.alignment_fallbacks;
        self.failures += other.failures;
        self.api_duration += other.api_duration;
    }
}

impl fmt::Display for TranslationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} units, {} cached, {} API calls ({} batch, {} single), {} split mismatches, {} failed, {:.2}s API time",
            self.units,
            self.cache_hits,
            self.api_calls(),
            self.batch_calls,
            self.individual_calls,
            self.alignment_fallbacks,
            self.failures,
            self.api_duration.as_secs_f64()
        )
    }
}

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// Tahrirchi translation API
    Tilmoch {
        /// Client instance
        client: Tilmoch,
    },

    /// In-process provider for tests and dry runs
    Mock {
        /// Client instance
        client: MockProvider,
    },
}

/// Sends texts to the configured translation provider
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Source language code
    source_language: String,

    /// Target language code
    target_language: String,

    /// Model identifier sent with each request
    model: String,
}

impl TranslationService {
    /// Create a service calling the HTTP provider from the configuration
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&config.translation.endpoint)
            .map_err(|e| anyhow!("Invalid endpoint '{}': {}", config.translation.endpoint, e))?;

        let client = Tilmoch::new(
            config.translation.api_key.clone(),
            endpoint.as_str(),
            config.translation.timeout_secs,
        );

        Ok(Self {
            provider: TranslationProviderImpl::Tilmoch { client },
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            model: config.translation.model.clone(),
        })
    }

    /// Create a service backed by a mock provider
    pub fn with_mock(client: MockProvider, config: &Config) -> Self {
        Self {
            provider: TranslationProviderImpl::Mock { client },
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            model: config.translation.model.clone(),
        }
    }

    /// Name of the active provider, for logging
    pub fn provider_name(&self) -> &'static str {
        match self.provider {
            TranslationProviderImpl::Tilmoch { .. } => "tilmoch",
            TranslationProviderImpl::Mock { .. } => "mock",
        }
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate one text (which may be several texts joined by a separator).
    ///
    /// Blank input is returned as-is without calling the provider.
    pub async fn translate_text(&self, text: &str) -> Result<String, ProviderError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        debug!(
            "Translating {} chars via {}: {}",
            text.chars().count(),
            self.provider_name(),
            truncate_text(text, PREVIEW_CHARS)
        );

        match &self.provider {
            TranslationProviderImpl::Tilmoch { client } => {
                let request = TilmochRequest::new(
                    text,
                    &self.source_language,
                    &self.target_language,
                    &self.model,
                );
                let response = client.complete(request).await?;
                Tilmoch::extract_text(&response)
            }
            TranslationProviderImpl::Mock { client } => {
                let request = MockRequest {
                    text: text.to_string(),
                    source_language: self.source_language.clone(),
                    target_language: self.target_language.clone(),
                };
                let response = client.complete(request).await?;
                MockProvider::extract_text(&response)
            }
        }
    }

    /// Translate a text and report how long the call took
    pub async fn translate_timed(&self, text: &str) -> (Result<String, ProviderError>, Duration) {
        let start = Instant::now();
        let result = self.translate_text(text).await;
        (result, start.elapsed())
    }
}
