use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::AppError;
use crate::markup::ExtractionRules;

// Application configuration module
// This module handles the application configuration including loading,
// validating and saving configuration settings.

/// Environment variable holding the provider credential
pub const API_KEY_ENV: &str = "TILMOCH_API_KEY";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (provider format, e.g. `eng_Latn`)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (provider format, e.g. `uzn_Latn`)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Input/output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Translation provider settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Translation cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Classifier rules
    #[serde(default)]
    pub extraction: ExtractionRules,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where documents are read from and written to
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathsConfig {
    /// Root of the source documents
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Root of the translated documents (mirrors `input_dir`)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// JSON file holding the translation cache
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,

    /// Extension of documents to translate
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            cache_file: default_cache_file(),
            extension: default_extension(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translate endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; the environment variable takes precedence
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of texts per batched request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Separator joining texts of a batch
    #[serde(default = "default_batch_separator")]
    pub batch_separator: String,

    /// Delay after each batched request, in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Delay after each single-text request, in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            batch_size: default_batch_size(),
            batch_separator: default_batch_separator(),
            batch_delay_ms: default_batch_delay_ms(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

/// Translation cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    /// Whether translations are cached at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Save the cache after every document instead of only at the end
    #[serde(default = "default_true")]
    pub flush_per_document: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            flush_per_document: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "eng_Latn".to_string()
}

fn default_target_language() -> String {
    "uzn_Latn".to_string()
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/docs_uz")
}

fn default_cache_file() -> PathBuf {
    PathBuf::from("data/translation_cache.json")
}

fn default_extension() -> String {
    "mdx".to_string()
}

fn default_endpoint() -> String {
    "https://websocket.tahrirchi.uz/translate-v2".to_string()
}

fn default_model() -> String {
    "tilmoch".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_batch_size() -> usize {
    50
}

fn default_batch_separator() -> String {
    "\n|||TRANSLATE_SPLIT|||\n".to_string()
}

fn default_batch_delay_ms() -> u64 {
    300
}

fn default_request_delay_ms() -> u64 {
    200
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the configuration file, or write out and return the defaults
    /// when it does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            log::warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            let config_json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config to JSON")?;
            std::fs::write(path, config_json)
                .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
            Ok(config)
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.translation.api_key.trim().is_empty() {
            return Err(AppError::Configuration(format!(
                "{} not found; set it in the environment or a .env file",
                API_KEY_ENV
            )));
        }
        self.validate_settings()
    }

    /// Validate everything except the credential
    pub fn validate_settings(&self) -> Result<(), AppError> {
        if self.source_language.is_empty() || self.target_language.is_empty() {
            return Err(AppError::Configuration("Source and target languages are required".into()));
        }
        if self.translation.batch_size == 0 {
            return Err(AppError::Configuration("batch_size must be at least 1".into()));
        }
        if self.translation.batch_separator.is_empty() {
            return Err(AppError::Configuration("batch_separator cannot be empty".into()));
        }
        Url::parse(&self.translation.endpoint).map_err(|e| {
            AppError::Configuration(format!("Invalid endpoint '{}': {}", self.translation.endpoint, e))
        })?;
        if self.paths.extension.trim_start_matches('.').is_empty() {
            return Err(AppError::Configuration("Document extension cannot be empty".into()));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            paths: PathsConfig::default(),
            translation: TranslationConfig::default(),
            cache: CacheConfig::default(),
            extraction: ExtractionRules::default(),
            log_level: LogLevel::default(),
        }
    }
}
