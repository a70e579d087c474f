/*!
 * Batch translation processing.
 *
 * The coordinator answers what it can from the cache, joins the remaining
 * texts into bounded batches separated by a marker that does not occur in
 * prose, and splits each response back into one part per text. A response
 * that does not split cleanly is abandoned and its texts are sent one by
 * one. Failures never abort a document: the affected texts keep their
 * original wording.
 */

use log::{error, info, warn};
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::{ProviderError, TranslationError};
use crate::markup::ExtractionUnit;

use super::cache::{content_hash, CacheStore};
use super::core::{Resolution, TranslationOutcome, TranslationService, TranslationStats};

/// Batching parameters
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of texts per request
    pub batch_size: usize,
    /// Marker joining the texts of a batch
    pub separator: String,
    /// Pause after each batched request
    pub batch_delay: Duration,
    /// Pause after each single-text request
    pub request_delay: Duration,
}

impl BatchOptions {
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            separator: config.batch_separator.clone(),
            batch_delay: Duration::from_millis(config.batch_delay_ms),
            request_delay: Duration::from_millis(config.request_delay_ms),
        }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::from_config(&TranslationConfig::default())
    }
}

/// Split a batched response into exactly `expected` parts
pub fn split_batch(
    translated: &str,
    separator: &str,
    expected: usize,
) -> Result<Vec<String>, TranslationError> {
    let parts: Vec<String> = translated.split(separator).map(str::to_string).collect();
    if parts.len() == expected {
        Ok(parts)
    } else {
        Err(TranslationError::Alignment {
            expected,
            actual: parts.len(),
        })
    }
}

/// Batch Translation Coordinator
pub struct BatchCoordinator<'a> {
    /// Service making the provider calls
    service: &'a TranslationService,

    /// Cache consulted before and updated after every call
    cache: &'a dyn CacheStore,

    /// Batching parameters
    options: BatchOptions,

    /// Counters accumulated across calls
    stats: TranslationStats,
}

impl<'a> BatchCoordinator<'a> {
    pub fn new(service: &'a TranslationService, cache: &'a dyn CacheStore, options: BatchOptions) -> Self {
        Self {
            service,
            cache,
            options,
            stats: TranslationStats::default(),
        }
    }

    pub fn stats(&self) -> &TranslationStats {
        &self.stats
    }

    pub fn into_stats(self) -> TranslationStats {
        self.stats
    }

    /// Translate the raw text of every unit; one outcome per unit, same order
    pub async fn translate_units(&mut self, units: &[ExtractionUnit]) -> Vec<TranslationOutcome> {
        let texts: Vec<&str> = units.iter().map(|unit| unit.raw_text()).collect();
        self.translate_texts(&texts).await
    }

    /// Translate texts; one outcome per text, same order
    pub async fn translate_texts(&mut self, texts: &[&str]) -> Vec<TranslationOutcome> {
        self.stats.units += texts.len();

        let mut outcomes: Vec<Option<TranslationOutcome>> = vec![None; texts.len()];
        let mut misses = Vec::new();

        for (index, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                outcomes[index] = Some(TranslationOutcome::Translated {
                    text: text.to_string(),
                    via: Resolution::Blank,
                });
                continue;
            }
            match self.cache.get(&content_hash(text)) {
                Some(cached) => {
                    self.stats.cache_hits += 1;
                    outcomes[index] = Some(TranslationOutcome::Translated {
                        text: cached,
                        via: Resolution::Cache,
                    });
                }
                None => misses.push(index),
            }
        }

        let total_batches = misses.len().div_ceil(self.options.batch_size);
        for (batch_number, chunk) in misses.chunks(self.options.batch_size).enumerate() {
            let batch: Vec<&str> = chunk.iter().map(|&index| texts[index]).collect();
            info!(
                "Translating batch {}/{} ({} texts)",
                batch_number + 1,
                total_batches,
                batch.len()
            );

            let results = self.translate_batch(&batch).await;
            for (&index, outcome) in chunk.iter().zip(results) {
                outcomes[index] = Some(outcome);
            }
        }

        outcomes
            .into_iter()
            .zip(texts)
            .map(|(outcome, text)| {
                outcome.unwrap_or_else(|| TranslationOutcome::Untranslated {
                    original: text.to_string(),
                    reason: ProviderError::MissingTranslation,
                })
            })
            .collect()
    }

    /// One request for the whole batch, falling back to single requests
    /// when the response does not split into one part per text
    async fn translate_batch(&mut self, texts: &[&str]) -> Vec<TranslationOutcome> {
        let joined = texts.join(&self.options.separator);

        let (result, elapsed) = self.service.translate_timed(&joined).await;
        self.stats.batch_calls += 1;
        self.stats.api_duration += elapsed;
        pause(self.options.batch_delay).await;

        let translated = match result {
            Ok(translated) => translated,
            Err(e) => {
                error!("Batch translation failed, keeping {} original texts: {}", texts.len(), e);
                self.stats.failures += texts.len();
                return texts
                    .iter()
                    .map(|text| TranslationOutcome::Untranslated {
                        original: text.to_string(),
                        reason: e.clone(),
                    })
                    .collect();
            }
        };

        match split_batch(&translated, &self.options.separator, texts.len()) {
            Ok(parts) => texts
                .iter()
                .zip(parts)
                .map(|(text, part)| {
                    self.cache.store(&content_hash(text), &part);
                    TranslationOutcome::Translated {
                        text: part,
                        via: Resolution::Batch,
                    }
                })
                .collect(),
            Err(e) => {
                warn!("{}; translating {} texts individually", e, texts.len());
                self.stats.alignment_fallbacks += 1;

                let mut outcomes = Vec::with_capacity(texts.len());
                for text in texts {
                    outcomes.push(self.translate_individual(text).await);
                }
                outcomes
            }
        }
    }

    async fn translate_individual(&mut self, text: &str) -> TranslationOutcome {
        let key = content_hash(text);
        if let Some(cached) = self.cache.get(&key) {
            self.stats.cache_hits += 1;
            return TranslationOutcome::Translated {
                text: cached,
                via: Resolution::Cache,
            };
        }

        let (result, elapsed) = self.service.translate_timed(text).await;
        self.stats.individual_calls += 1;
        self.stats.api_duration += elapsed;
        pause(self.options.request_delay).await;

        match result {
            Ok(translated) => {
                self.cache.store(&key, &translated);
                TranslationOutcome::Translated {
                    text: translated,
                    via: Resolution::Individual,
                }
            }
            Err(e) => {
                error!("Translation failed, keeping original text: {}", e);
                self.stats.failures += 1;
                TranslationOutcome::Untranslated {
                    original: text.to_string(),
                    reason: e,
                }
            }
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
