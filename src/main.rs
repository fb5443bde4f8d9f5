// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use subalign::app_config::{Config, LogLevel};
use subalign::app_controller::Controller;
use subalign::file_utils::FileManager;
use subalign::presentation::render_alignment;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Options shared by every processing subcommand
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: PathBuf,

    /// API key of the online translator (overrides the configuration file)
    #[arg(short = 'k', long, env = "SUBALIGN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct AlignArgs {
    /// Source language SRT file
    #[arg(value_name = "SRC_SUB_PATH")]
    source_path: PathBuf,

    /// Destination language SRT file
    #[arg(value_name = "DST_SUB_PATH")]
    destination_path: PathBuf,

    /// Source language code (e.g., 'es', 'fr')
    #[arg(short = 's', long = "source-language")]
    source_language: String,

    /// Destination language code (only 'en' is supported)
    #[arg(short = 'd', long = "destination-language")]
    destination_language: Option<String>,

    /// Output alignment document (defaults to <SRC_SUB_PATH stem>.align.json)
    #[arg(short, long = "output")]
    output_path: Option<PathBuf>,

    /// Alignment tolerance in milliseconds
    #[arg(short = 't', long = "tolerance")]
    tolerance_ms: Option<u64>,

    /// Print the alignment without ANSI colors
    #[arg(long)]
    no_color: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// SRT file to translate
    src_file: PathBuf,

    /// Language of the SRT file
    src_lang: String,

    /// Translated SRT file to write
    dst_file: PathBuf,

    /// Language to translate into
    dst_lang: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align the words of a source-language subtitle file with its English counterpart
    Align(AlignArgs),

    /// Machine-translate every caption of an SRT file
    Translate(TranslateArgs),

    /// Generate shell completions for subalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subalign - word alignment between subtitle tracks
///
/// Aligns every word of an English subtitle track with the word of a
/// source-language track it translates, using temporal overlap, bilingual
/// dictionaries, cached machine translations and aligned word vectors.
#[derive(Parser, Debug)]
#[command(name = "subalign")]
#[command(version)]
#[command(about = "Word alignment between two subtitle tracks")]
#[command(long_about = "subalign aligns the words of a source-language subtitle track with its English counterpart.

EXAMPLES:
    subalign align movie.es.srt movie.en.srt -s es -o movie.json   # Align Spanish and English captions
    subalign align movie.es.srt movie.en.srt -s es -t 1000        # Allow a one second gap between captions
    subalign translate movie.es.srt es movie.en.srt en -k KEY     # Machine-translate a subtitle file
    subalign completions bash > subalign.bash                     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

RESOURCES:
    <dictionary_dir>/<src>-en.txt and en-<src>.txt     bilingual word lists
    <word_vectors_dir>/wiki.<lang>.align.vec           aligned fastText vectors")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (color, tag) = Self::style_for_level(record.level());
        let _ = writeln!(std::io::stderr(), "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // The logger accepts everything; the effective level is set via log::set_max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();
    let result = match cli.command {
        Commands::Align(args) => run_align(args).await,
        Commands::Translate(args) => run_translate(args).await,
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subalign", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Load the configuration and apply the options shared by all subcommands
fn load_config(common: &CommonArgs) -> Result<Config> {
    if let Some(level) = common.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    let mut config = Config::load_or_create(&common.config_path)?;

    if let Some(level) = common.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    if let Some(api_key) = &common.api_key {
        config.set_api_key(api_key.clone());
    }

    Ok(config)
}

async fn run_align(args: AlignArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;

    config.source_language = args.source_language.clone();

    // Override config with CLI options if provided
    if let Some(destination_language) = &args.destination_language {
        config.target_language = destination_language.clone();
    }
    if let Some(tolerance_ms) = args.tolerance_ms {
        config.alignment.tolerance_ms = tolerance_ms;
    }

    let output_path = args.output_path.clone().unwrap_or_else(|| {
        let dir = args.source_path.parent().unwrap_or(Path::new(""));
        FileManager::generate_output_path(&args.source_path, dir, "align", "json")
    });

    info!(
        "Aligning {} ({}) with {} ({})",
        args.source_path.display(),
        config.source_language,
        args.destination_path.display(),
        config.target_language
    );

    let controller = Controller::with_config(config)?;
    let outcome = controller
        .run_align(&args.source_path, &args.destination_path, &output_path)
        .await
        .context("Alignment failed")?;

    let colored = !args.no_color && std::io::stdout().is_terminal();
    let rendered = render_alignment(&outcome.aligned, &outcome.destination, colored);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let controller = Controller::with_config(config)?;
    controller
        .run_translate(&args.src_file, &args.src_lang, &args.dst_file, &args.dst_lang)
        .await
        .context("Translation failed")
}
