use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::markup::{extract_units, Document, ExtractionUnit};
use crate::translation::{
    BatchOptions, CacheStore, DocumentReport, DocumentTranslator, JsonFileCache, TranslationCache,
    TranslationService, TranslationStats,
};

// @module: Application controller for document translation

/// Aggregate result of a folder run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Documents found under the input directory
    pub total_files: usize,
    /// Documents translated and written
    pub completed: usize,
    /// Documents that could not be read or written
    pub failed: usize,
    /// Documents whose output was already up to date
    pub skipped: usize,
    /// Wall time of the run
    pub elapsed: Duration,
    /// Translations held by the cache at the end of the run
    pub cache_entries: usize,
    /// Share of cache lookups answered from the cache
    pub cache_hit_rate: f64,
    /// Coordinator counters over all documents
    pub stats: TranslationStats,
    pub output_dir: PathBuf,
    pub cache_file: PathBuf,
}

impl RunSummary {
    /// Mean time per processed document
    pub fn average_per_file(&self) -> Duration {
        let processed = self.completed + self.failed;
        if processed == 0 {
            Duration::ZERO
        } else {
            self.elapsed / processed as u32
        }
    }

    /// Write the summary report to the log
    pub fn log_report(&self) {
        info!("Translation summary");
        info!("  Total files:   {}", self.total_files);
        info!("  Completed:     {}", self.completed);
        info!("  Failed:        {}", self.failed);
        info!("  Skipped:       {}", self.skipped);
        info!(
            "  Elapsed:       {:.2}s ({:.2} min)",
            self.elapsed.as_secs_f64(),
            self.elapsed.as_secs_f64() / 60.0
        );
        info!("  Per file:      {}", format_duration(self.average_per_file()));
        info!("  Cache entries: {}", self.cache_entries);
        info!("  Cache hits:    {:.1}%", self.cache_hit_rate * 100.0);
        info!("  Units:         {}", self.stats);
        info!("  Output:        {}", self.output_dir.display());
        info!("  Cache file:    {}", self.cache_file.display());
    }
}

/// One line of `--extract-only` output
#[derive(Serialize)]
struct ExtractionRecord<'a> {
    file: String,
    #[serde(flatten)]
    unit: &'a ExtractionUnit,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Provider-facing service
    service: TranslationService,

    // @field: Translation cache shared by every document of a run
    cache: Box<dyn CacheStore>,
}

impl Controller {
    // @method: Create a new controller calling the configured provider
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(&config)?;
        Ok(Self::with_service(config, service))
    }

    /// Create a controller around an existing service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        let cache: Box<dyn CacheStore> = if config.cache.enabled {
            Box::new(JsonFileCache::load(&config.paths.cache_file))
        } else {
            Box::new(TranslationCache::new(false))
        };

        Self {
            config,
            service,
            cache,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &dyn CacheStore {
        self.cache.as_ref()
    }

    /// Translate one document from `input` into `output`
    pub async fn translate_file(&self, input: &Path, output: &Path) -> Result<DocumentReport> {
        let content = FileManager::read_to_string(input)?;

        let translator = DocumentTranslator::new(
            &self.service,
            self.cache.as_ref(),
            &self.config.extraction,
            BatchOptions::from_config(&self.config.translation),
        );
        let (translated, report) = translator.translate_content(input, &content).await;

        FileManager::write_to_file(output, &translated)?;
        Ok(report)
    }

    /// Translate every document under `input_dir` into the mirrored location
    /// under `output_dir`. Documents whose output is newer than the source are
    /// skipped unless `force_overwrite` is set.
    pub async fn run_folder(&self, input_dir: &Path, output_dir: &Path, force_overwrite: bool) -> Result<RunSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_files(input_dir, &self.config.paths.extension)?;
        let mut summary = RunSummary {
            total_files: files.len(),
            output_dir: output_dir.to_path_buf(),
            cache_file: self.config.paths.cache_file.clone(),
            ..Default::default()
        };

        if files.is_empty() {
            warn!(
                "No .{} files found in {}",
                self.config.paths.extension,
                input_dir.display()
            );
            self.finish_summary(&mut summary, start_time);
            return Ok(summary);
        }

        let mut pending = Vec::with_capacity(files.len());
        for file in files {
            let output_path = FileManager::mirror_output_path(input_dir, output_dir, &file)?;
            if !force_overwrite && FileManager::is_up_to_date(&file, &output_path) {
                debug!("Up to date, skipping: {}", file.display());
                summary.skipped += 1;
            } else {
                pending.push((file, output_path));
            }
        }

        if pending.is_empty() {
            info!(
                "All {} documents are already translated (use -f to force overwrite)",
                summary.total_files
            );
            self.finish_summary(&mut summary, start_time);
            return Ok(summary);
        }

        info!(
            "Translating {} documents ({} up to date) with {}: {} -> {}",
            pending.len(),
            summary.skipped,
            self.service.provider_name(),
            self.service.source_language(),
            self.service.target_language()
        );

        let progress_bar = ProgressBar::new(pending.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        for (input_path, output_path) in &pending {
            let display = input_path
                .strip_prefix(input_dir)
                .unwrap_or(input_path.as_path())
                .display()
                .to_string();
            progress_bar.set_message(display.clone());

            match self.translate_file(input_path, output_path).await {
                Ok(report) => {
                    info!("Success: {} ({} units)", output_path.display(), report.units);
                    summary.completed += 1;
                    summary.stats.merge(&report.stats);
                }
                Err(e) => {
                    error!("Error processing file {}: {:#}", display, e);
                    summary.failed += 1;
                }
            }

            if self.config.cache.flush_per_document {
                self.flush_cache();
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        self.flush_cache();

        self.finish_summary(&mut summary, start_time);
        Ok(summary)
    }

    /// Write every extraction unit under `input_dir` as a JSON line,
    /// without calling the provider. Returns the number of units written.
    pub fn extract_folder<W: Write>(&self, input_dir: &Path, writer: &mut W) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let mut count = 0;
        for file in FileManager::find_files(input_dir, &self.config.paths.extension)? {
            let content = FileManager::read_to_string(&file)?;
            let document = Document::parse(&file, &content);
            let relative = file.strip_prefix(input_dir).unwrap_or(file.as_path()).display().to_string();

            for unit in extract_units(&document, &self.config.extraction) {
                let record = ExtractionRecord {
                    file: relative.clone(),
                    unit: &unit,
                };
                let line = serde_json::to_string(&record).context("Failed to serialize extraction unit")?;
                writeln!(writer, "{}", line).context("Failed to write extraction output")?;
                count += 1;
            }
        }

        Ok(count)
    }

    fn finish_summary(&self, summary: &mut RunSummary, start_time: Instant) {
        summary.cache_entries = self.cache.len();
        summary.cache_hit_rate = self.cache.stats().2;
        summary.elapsed = start_time.elapsed();
    }

    fn flush_cache(&self) {
        if let Err(e) = self.cache.flush() {
            warn!("Failed to save translation cache: {}", e);
        }
    }
}

// Format duration in a human-readable format
fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
