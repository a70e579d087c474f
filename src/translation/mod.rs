/*!
 * Translation of extracted document text.
 *
 * This module turns extraction units into translated text. It is split
 * into several submodules:
 *
 * - `core`: the provider-facing service and the typed translation outcome
 * - `cache`: content-hash caching of translations
 * - `batch`: the batch coordinator with split-mismatch fallback
 * - `translator`: the whole-document pipeline
 */

// Re-export main types for easier usage
pub use self::batch::{BatchCoordinator, BatchOptions};
pub use self::cache::{content_hash, CacheStore, JsonFileCache, TranslationCache};
pub use self::core::{Resolution, TranslationOutcome, TranslationService, TranslationStats};
pub use self::translator::{DocumentReport, DocumentTranslator};

// Submodules
pub mod batch;
pub mod cache;
pub mod core;
pub mod translator;
