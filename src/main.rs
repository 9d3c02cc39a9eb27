// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use subclip::app_config::{self, Config};
use subclip::{Controller, FfmpegDriver, Selection};

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
    /// Generate shell completions for subclip
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subclip - cut one clip per subtitle cue
#[derive(Parser, Debug)]
#[command(name = "subclip")]
#[command(version)]
#[command(about = "Cut dialogue clips from media files using subtitle timing")]
#[command(long_about = "subclip reads subtitle files (.srt, .ass, .ssa) and cuts one clip per cue
from the paired media file with ffmpeg stream copy.

EXAMPLES:
    subclip -s ep01.srt -m ep01.mkv                 # One pair
    subclip -s 'subs/*.ass' -m 'video/*.mp4'        # Pair files by sorted name
    subclip -s ep01.srt -m ep01.mkv -o -00:00:01.200  # Shift cues 1.2s earlier
    subclip -n -s ep01.srt -m ep01.mkv              # Show the plan without cutting
    subclip completions bash > subclip.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. Command line options override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file or wildcard pattern (e.g. 'subs/*.srt')
    #[arg(short, long, value_name = "PATTERN")]
    subtitles: Option<String>,

    /// Media file or wildcard pattern (e.g. 'video/*.mp4')
    #[arg(short, long, value_name = "PATTERN")]
    media: Option<String>,

    /// Global offset, [-]HH:MM:SS.mmm
    #[arg(short, long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Padding before and after each cue in milliseconds
    #[arg(long)]
    margin_ms: Option<u64>,

    /// Create clip folders under this directory instead of next to the media
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Abort a single extraction after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Overwrite existing clips
    #[arg(short, long)]
    force_overwrite: bool,

    /// Plan clips and print them without running ffmpeg
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
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
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subclip", &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await
}

async fn run(options: CommandLineOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;
    apply_overrides(&mut config, &options);

    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let subtitles = options.subtitles.as_deref()
        .ok_or_else(|| anyhow!("--subtitles is required"))?;
    let media = options.media.as_deref()
        .ok_or_else(|| anyhow!("--media is required"))?;

    let selection = Selection::from_patterns(subtitles, media)
        .context("Invalid subtitle/media selection")?;

    if !options.dry_run {
        info!("ffmpeg must be installed and reachable as '{}'", config.extraction.ffmpeg_path);
    }

    let driver = FfmpegDriver::new(&config.extraction);
    let controller = Controller::with_config(config)?.dry_run(options.dry_run);
    let report = controller.run(&selection, &driver).await;

    for pair in report.pairs.iter().filter(|p| p.parse_error.is_some()) {
        error!("Not processed: {}", pair.subtitle.display());
    }
    if report.total_failures() > 0 {
        warn!("{} clip(s) could not be extracted", report.total_failures());
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, options: &CommandLineOptions) {
    if let Some(offset) = &options.offset {
        config.offset = offset.clone();
    }
    if let Some(margin_ms) = options.margin_ms {
        config.margin_ms = margin_ms;
    }
    if let Some(output_root) = &options.output_root {
        config.output_root = Some(output_root.clone());
    }
    if let Some(timeout_secs) = options.timeout_secs {
        config.extraction.timeout_secs = Some(timeout_secs);
    }
    if options.force_overwrite {
        config.extraction.overwrite = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
