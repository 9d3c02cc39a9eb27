/*!
 * Explicit reporting context passed through the processing components.
 *
 * Each subtitle/media pair gets its own [`Report`]. Components record what
 * happened on it instead of relying on a process-wide logger, and every entry
 * is also forwarded to the `log` facade so the CLI output stays live.
 */

use std::fmt;
use std::path::{Path, PathBuf};

use log::Level;

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Why a single cue produced no clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipFailure {
    pub cue_id: String,
    pub output_path: PathBuf,
    pub message: String,
}

/// Outcome of processing one subtitle/media pair
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Subtitle file of the pair
    pub subtitle: PathBuf,

    /// Media file of the pair
    pub media: PathBuf,

    /// Number of cues parsed from the subtitle file
    pub cues: usize,

    /// Clips successfully extracted
    pub extracted: usize,

    /// Set when the subtitle file could not be parsed
    pub parse_error: Option<String>,

    /// Set when the output directory could not be created
    pub directory_error: Option<String>,

    /// Cues whose extraction failed
    pub failures: Vec<ClipFailure>,

    /// Everything recorded on this report, in order
    pub entries: Vec<LogEntry>,
}

impl Report {
    pub fn new(subtitle: &Path, media: &Path) -> Self {
        Self {
            subtitle: subtitle.to_path_buf(),
            media: media.to_path_buf(),
            ..Default::default()
        }
    }

    /// Record a message and forward it to the logger
    pub fn log(&mut self, level: Level, message: impl Into<String>) {
        let message = message.into();
        log::log!(level, "{}", message);
        self.entries.push(LogEntry { level, message });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn record_failure(&mut self, failure: ClipFailure) {
        self.error(format!(
            "Cue {} failed ({}): {}",
            failure.cue_id,
            failure.output_path.display(),
            failure.message
        ));
        self.failures.push(failure);
    }

    /// True when any warning or error was recorded
    pub fn has_issues(&self) -> bool {
        self.entries.iter().any(|e| e.level <= Level::Warn)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.level == Level::Warn)
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub pairs: Vec<Report>,
}

impl RunReport {
    pub fn total_extracted(&self) -> usize {
        self.pairs.iter().map(|p| p.extracted).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.pairs.iter().map(|p| p.failures.len()).sum()
    }

    pub fn failed_pairs(&self) -> usize {
        self.pairs.iter().filter(|p| p.parse_error.is_some()).count()
    }
}
