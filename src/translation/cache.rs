/*!
 * Translation caching functionality.
 *
 * Translations are keyed on a content hash of the source text, so a
 * sentence that appears in many documents is only sent to the provider
 * once. `CacheStore` is the seam the coordinator talks to; the in-memory
 * `TranslationCache` and the JSON-backed `JsonFileCache` implement it.
 */

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::errors::AppError;

/// Key-value store the batch coordinator reads and writes translations through
pub trait CacheStore: Send + Sync {
    /// Look up the translation stored under a content hash
    fn get(&self, key: &str) -> Option<String>;

    /// Store a translation under a content hash
    fn store(&self, key: &str, translation: &str);

    /// Number of stored translations
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookup statistics as (hits, misses, hit rate)
    fn stats(&self) -> (usize, usize, f64) {
        (0, 0, 0.0)
    }

    /// Persist pending entries, if the store has durable backing
    fn flush(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Deterministic cache key for a source text (hex SHA-256)
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// In-memory translation cache
pub struct TranslationCache {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<String, String>>>,

    /// Cache hit counter
    hits: Arc<AtomicUsize>,

    /// Cache miss counter
    misses: Arc<AtomicUsize>,

    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self::with_entries(HashMap::new(), enabled)
    }

    /// Create a cache pre-filled with entries
    pub fn with_entries(entries: HashMap<String, String>, enabled: bool) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            enabled,
        }
    }

    /// Sorted copy of all entries
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl CacheStore for TranslationCache {
    fn get(&self, key: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        match self.entries.read().get(key) {
            Some(translation) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {}", truncate_text(key, 12));
                Some(translation.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn store(&self, key: &str, translation: &str) {
        if !self.enabled {
            return;
        }
        self.entries.write().insert(key.to_string(), translation.to_string());
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
        }
    }
}

/// Translation cache persisted as a JSON object of hash -> translation.
///
/// The file is read once on load and rewritten completely on every flush.
/// Two processes sharing the file are not coordinated: the last flush wins.
pub struct JsonFileCache {
    path: PathBuf,
    memory: TranslationCache,
}

impl JsonFileCache {
    /// Load the cache file; a missing or unreadable file gives an empty cache
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(entries) => {
                    info!("Loaded {} cached translations from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    warn!("Could not parse cache {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("Could not load cache {}: {}", path.display(), e);
                HashMap::new()
            }
        };

        Self {
            path,
            memory: TranslationCache::with_entries(entries, true),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the cache file with every entry
    pub fn save(&self) -> Result<(), AppError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .map_err(|e| AppError::Cache(format!("{}: {}", parent.display(), e)))?;

        let json = serde_json::to_string_pretty(&self.memory.snapshot())
            .map_err(|e| AppError::Cache(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&parent)
            .map_err(|e| AppError::Cache(format!("{}: {}", parent.display(), e)))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| AppError::Cache(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| AppError::Cache(format!("{}: {}", self.path.display(), e)))?;

        debug!("Saved {} cached translations to {}", self.memory.len(), self.path.display());
        Ok(())
    }
}

impl CacheStore for JsonFileCache {
    fn get(&self, key: &str) -> Option<String> {
        self.memory.get(key)
    }

    fn store(&self, key: &str, translation: &str) {
        self.memory.store(key, translation);
    }

    fn len(&self) -> usize {
        self.memory.len()
    }

    fn stats(&self) -> (usize, usize, f64) {
        self.memory.stats()
    }

    fn flush(&self) -> Result<(), AppError> {
        self.save()
    }
}

/// Truncate text to a maximum length with ellipsis
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
