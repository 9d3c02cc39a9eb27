use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::report::Report;

// @module: File and directory utilities

/// Name of the per-folder log written when a pair had problems
pub const ISSUES_LOG_FILE: &str = "subclip.issues.log";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    // @returns: true when the directory was created by this call
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<bool> {
        let path = path.as_ref();
        if Self::dir_exists(path) {
            return Ok(false);
        }
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        Ok(true)
    }

    /// Append a pair's warnings and errors to the issues log in `dir`
    pub fn write_issues_log<P: AsRef<Path>>(dir: P, report: &Report) -> Result<()> {
        let path = dir.as_ref().join(ISSUES_LOG_FILE);
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path))?;

        writeln!(file, "[{}] {} + {}", timestamp, report.subtitle.display(), report.media.display())
            .with_context(|| format!("Failed to write to log file: {:?}", path))?;

        for entry in report.entries.iter().filter(|e| e.level <= log::Level::Warn) {
            writeln!(file, "{}", entry)
                .with_context(|| format!("Failed to write to log file: {:?}", path))?;
        }

        Ok(())
    }
}
