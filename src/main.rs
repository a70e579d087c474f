// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use mdxlate::app_config::{self, Config, API_KEY_ENV};
use mdxlate::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a documentation tree (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for mdxlate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct TranslateArgs {
    /// Directory of source documents (defaults to the configured input_dir)
    #[arg(value_name = "INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Directory receiving the translated tree
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Retranslate documents whose output is already up to date
    #[arg(short, long)]
    force_overwrite: bool,

    /// Extension of the documents to translate
    #[arg(short, long)]
    extension: Option<String>,

    /// Source language code (e.g., 'eng_Latn')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'uzn_Latn')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Translation cache file
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "mdxlate.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print extraction units as JSON lines without translating
    #[arg(long)]
    extract_only: bool,

    /// Provider API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
}

/// mdxlate - markup-aware translation for MDX documentation
///
/// Translates the prose of an MDX/Markdown tree while keeping front matter,
/// code, components and decoration exactly as they are.
#[derive(Parser, Debug)]
#[command(name = "mdxlate")]
#[command(version)]
#[command(about = "Markup-aware MDX documentation translator")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "mdxlate extracts translatable prose from MDX documents, translates it and writes a mirrored tree.

EXAMPLES:
    mdxlate                                  # Translate docs/ into data/docs_uz/
    mdxlate -f docs/                         # Retranslate every document
    mdxlate docs/ -o out/ -t rus_Cyrl        # Different output and target language
    mdxlate --extract-only docs/ > units.jl  # Show what would be translated
    mdxlate completions bash > mdxlate.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in mdxlate.json by default. If the config file
    doesn't exist, a default one will be created automatically. The API key
    is read from TILMOCH_API_KEY, which may also be set in a .env file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    args: TranslateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger accepts everything; log::max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Color escape for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error
    dotenv::dotenv().ok();

    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "mdxlate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.args).await,
    }
}

/// Load the config file and apply command line overrides
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(input_dir) = &options.input_dir {
        config.paths.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.paths.output_dir = output_dir.clone();
    }
    if let Some(extension) = &options.extension {
        config.paths.extension = extension.trim_start_matches('.').to_string();
    }
    if let Some(cache_file) = &options.cache_file {
        config.paths.cache_file = cache_file.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(api_key) = &options.api_key {
        config.translation.api_key = api_key.clone();
    }

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let input_dir = config.paths.input_dir.clone();
    let output_dir = config.paths.output_dir.clone();

    if options.extract_only {
        config
            .validate_settings()
            .context("Configuration validation failed")?;

        let controller = Controller::with_config(config)?;
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let count = controller.extract_folder(&input_dir, &mut handle)?;
        info!("Extracted {} units from {}", count, input_dir.display());
        return Ok(());
    }

    // Only a missing credential or invalid settings stop the run before any work
    config.validate().context("Configuration validation failed")?;

    if !input_dir.is_dir() {
        return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
    }

    let controller = Controller::with_config(config)?;
    let summary = controller
        .run_folder(&input_dir, &output_dir, options.force_overwrite)
        .await?;

    if summary.completed == 0 && summary.failed == 0 && summary.skipped > 0 {
        info!("Nothing to translate; use -f to retranslate up-to-date documents");
    }
    if summary.failed > 0 {
        warn!("{} documents failed, see the errors above", summary.failed);
    }
    summary.log_report();

    Ok(())
}
