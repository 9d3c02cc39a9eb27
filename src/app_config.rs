use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::timecode::{Offset, TimeNormalizer, DEFAULT_MARGIN_MS, MAX_MARGIN_MS};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Global offset applied to every cue, `[-]HH:MM:SS.mmm`
    #[serde(default = "default_offset")]
    pub offset: String,

    /// Padding added before and after each cue, in milliseconds
    #[serde(default = "default_margin_ms")]
    pub margin_ms: u64,

    /// Directory under which per-media clip folders are created.
    /// When unset, the folder is created next to the media file.
    #[serde(default)]
    pub output_root: Option<PathBuf>,

    /// Extraction tool settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the external extraction tool
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    // @field: ffmpeg executable
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    // @field: Kill an extraction after this many seconds (none = wait forever)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    // @field: Replace existing clips instead of failing on them
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            timeout_secs: None,
            overwrite: false,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
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
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_offset() -> String {
    "00:00:00.000".to_string()
}

fn default_margin_ms() -> u64 {
    DEFAULT_MARGIN_MS
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

impl Config {
    /// Load the configuration file, writing a default one when it is missing
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
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.parsed_offset()?;

        if self.margin_ms > MAX_MARGIN_MS {
            return Err(anyhow!(
                "Margin of {} ms exceeds the maximum of {} ms",
                self.margin_ms,
                MAX_MARGIN_MS
            ));
        }

        if self.extraction.ffmpeg_path.trim().is_empty() {
            return Err(anyhow!("Extraction tool path must not be empty"));
        }

        if self.extraction.timeout_secs == Some(0) {
            return Err(anyhow!("Extraction timeout must be greater than zero"));
        }

        Ok(())
    }

    pub fn parsed_offset(&self) -> Result<Offset> {
        Offset::parse(&self.offset).map_err(|e| anyhow!("{}", e))
    }

    /// Build the normalizer for this run
    pub fn normalizer(&self) -> Result<TimeNormalizer> {
        Ok(TimeNormalizer::new(self.parsed_offset()?, self.margin_ms))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            offset: default_offset(),
            margin_ms: default_margin_ms(),
            output_root: None,
            extraction: ExtractionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
