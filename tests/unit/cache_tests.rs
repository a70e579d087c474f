/*!
 * Tests for translation cache functionality
 */

use std::fs;

use mdxlate::translation::{content_hash, CacheStore, JsonFileCache, TranslationCache};

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_cache_new_withDisabled_shouldNeverStore() {
    let cache = TranslationCache::new(false);
    cache.store("key", "value");
    assert!(cache.get("key").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_cache_store_withSameKey_shouldOverwrite() {
    let cache = TranslationCache::default();
    cache.store("hello", "salom");
    cache.store("hello", "assalomu alaykum");
    assert_eq!(cache.get("hello"), Some("assalomu alaykum".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let cache = TranslationCache::new(true);
    cache.store("a", "1");
    cache.get("a");
    cache.get("a");
    cache.get("b");

    let (hits, misses, rate) = cache.stats();
    assert_eq!(hits, 2);
    assert_eq!(misses, 1);
    assert!((rate - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_cache_clone_shouldShareEntries() {
    let cache = TranslationCache::new(true);
    let clone = cache.clone();
    clone.store("k", "v");
    assert_eq!(cache.get("k"), Some("v".to_string()));
}

#[test]
fn test_jsonFileCache_save_shouldWriteHashToTextObject() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("data").join("translation_cache.json");

    let cache = JsonFileCache::load(&path);
    cache.store(&content_hash("Hello"), "Salom");
    cache.save().unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object[&content_hash("Hello")], "Salom");
}

#[test]
fn test_jsonFileCache_load_withExistingFile_shouldReadEntries() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(temp_dir.path(), "cache.json", r#"{"abc": "def", "123": "456"}"#).unwrap();

    let cache = JsonFileCache::load(&path);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("abc"), Some("def".to_string()));
}

#[test]
fn test_jsonFileCache_load_withCorruptFile_shouldStartEmpty() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(temp_dir.path(), "cache.json", "{ not json").unwrap();

    let cache = JsonFileCache::load(&path);

    assert!(cache.is_empty());
    assert_eq!(cache.path(), path.as_path());
}

#[test]
fn test_jsonFileCache_load_withMissingFile_shouldStartEmpty() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = JsonFileCache::load(temp_dir.path().join("absent.json"));
    assert!(cache.is_empty());
}

#[test]
fn test_jsonFileCache_stats_shouldReportLookups() {
    let temp_dir = create_temp_dir().unwrap();
    let cache = JsonFileCache::load(temp_dir.path().join("cache.json"));
    cache.store("k", "v");
    cache.get("k");
    cache.get("missing");

    assert_eq!(cache.stats(), (1, 1, 0.5));
}
