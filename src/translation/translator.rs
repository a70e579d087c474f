/*!
 * Per-document translation pipeline.
 *
 * Classifies the document, plans its extraction units, translates them
 * through the batch coordinator and rebuilds the translated document.
 */

use log::{debug, info};
use std::path::Path;

use crate::markup::{extract_units, rebuild, Document, ExtractionRules};

use super::batch::{BatchCoordinator, BatchOptions};
use super::cache::CacheStore;
use super::core::{TranslationOutcome, TranslationService, TranslationStats};

/// What happened to one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentReport {
    /// Lines in the document
    pub lines: usize,
    /// Units extracted for translation
    pub units: usize,
    /// Units that received a translation
    pub translated: usize,
    /// Units that kept their original text
    pub untranslated: usize,
    /// Coordinator counters
    pub stats: TranslationStats,
}

/// Translates whole documents
pub struct DocumentTranslator<'a> {
    service: &'a TranslationService,
    cache: &'a dyn CacheStore,
    rules: &'a ExtractionRules,
    options: BatchOptions,
}

impl<'a> DocumentTranslator<'a> {
    pub fn new(
        service: &'a TranslationService,
        cache: &'a dyn CacheStore,
        rules: &'a ExtractionRules,
        options: BatchOptions,
    ) -> Self {
        Self {
            service,
            cache,
            rules,
            options,
        }
    }

    /// Translate a parsed document
    pub async fn translate_document(&self, document: &Document) -> (Document, DocumentReport) {
        let units = extract_units(document, self.rules);
        debug!(
            "{}: {} of {} lines selected for translation",
            document.path().display(),
            units.len(),
            document.line_count()
        );

        let mut coordinator = BatchCoordinator::new(self.service, self.cache, self.options.clone());
        let outcomes = coordinator.translate_units(&units).await;

        let translated = outcomes.iter().filter(|o| o.is_translated()).count();
        let report = DocumentReport {
            lines: document.line_count(),
            units: units.len(),
            translated,
            untranslated: outcomes.len() - translated,
            stats: coordinator.into_stats(),
        };

        let output = rebuild(
            document,
            units.iter().zip(outcomes.iter().map(TranslationOutcome::text)),
        );

        info!(
            "{}: {} units translated, {} kept original",
            document.path().display(),
            report.translated,
            report.untranslated
        );

        (output, report)
    }

    /// Translate document text, returning the rendered translation
    pub async fn translate_content(&self, path: &Path, content: &str) -> (String, DocumentReport) {
        let document = Document::parse(path, content);
        let (output, report) = self.translate_document(&document).await;
        (output.render(), report)
    }
}
