/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;

use anyhow::Result;
use subclip::file_utils::{FileManager, ISSUES_LOG_FILE};
use subclip::report::Report;
use crate::common;

#[test]
fn test_ensure_dir_withNewDir_shouldCreateAndReportIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("clips").join("episode");

    assert!(FileManager::ensure_dir(&target)?);
    assert!(FileManager::dir_exists(&target));

    // Second call finds it already there
    assert!(!FileManager::ensure_dir(&target)?);
    Ok(())
}

#[test]
fn test_ensure_dir_withFileInTheWay_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let blocker = common::create_test_file(temp_dir.path(), "episode", "not a dir")?;
    assert!(FileManager::ensure_dir(&blocker).is_err());
    Ok(())
}

#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
    assert!(!FileManager::dir_exists(Path::new("./non_existent_directory_12345")));
}

#[test]
fn test_write_issues_log_shouldOnlyContainWarningsAndErrors() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut report = Report::new(Path::new("ep.srt"), Path::new("ep.mp4"));
    report.info("all good");
    report.warn("cue 3 skipped");
    report.error("cue 4 failed");

    FileManager::write_issues_log(temp_dir.path(), &report)?;

    let content = fs::read_to_string(temp_dir.path().join(ISSUES_LOG_FILE))?;
    assert!(content.contains("ep.srt + ep.mp4"));
    assert!(content.contains("[WARN] cue 3 skipped"));
    assert!(content.contains("[ERROR] cue 4 failed"));
    assert!(!content.contains("all good"));
    Ok(())
}
