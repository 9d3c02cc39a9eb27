/*!
 * Common test utilities for the subclip test suite
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use subclip::errors::ExtractionError;
use subclip::extraction::{ExtractionDriver, ExtractionRequest};

/// Route library log output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample SRT content with markup and a two-line cue
pub const SAMPLE_SRT: &str = "1
00:00:10,000 --> 00:00:12,000
<i>Hello there.</i>

2
00:00:13,500 --> 00:00:15,000
{\\an8}Where are you going?
Wait for me!

3
00:01:00,250 --> 00:01:02,750
Bye.
";

/// Sample ASS content with a header and three dialogue lines
pub const SAMPLE_ASS: &str = "[Script Info]
Title: Sample
ScriptType: v4.00+

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:03.50,Default,,0,0,0,,{\\i1}First line
Comment: 0,0:00:02.00,0:00:04.00,Default,,0,0,0,,Not a cue
Dialogue: 0,0:00:05.25,0:00:07.00,Default,,0,0,0,,{\\pos(320,50)}Second\u{3000}line
Dialogue: 0,0:00:08.00,0:00:09.00,Default,,0,0,0,,Third
";

/// Creates a sample SRT file
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Creates an empty placeholder media file
pub fn create_test_media(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, "")
}

/// Extraction driver that records requests instead of running a tool
#[derive(Debug, Default)]
pub struct RecordingDriver {
    requests: Mutex<Vec<ExtractionRequest>>,
    failing_calls: HashSet<usize>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the given zero-based calls with a non-zero exit status
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failing_calls: calls.iter().copied().collect(),
        }
    }

    pub fn requests(&self) -> Vec<ExtractionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionDriver for RecordingDriver {
    async fn extract(&self, request: &ExtractionRequest) -> Result<(), ExtractionError> {
        let mut requests = self.requests.lock().unwrap();
        let call = requests.len();
        requests.push(request.clone());

        if self.failing_calls.contains(&call) {
            return Err(ExtractionError::Failed {
                status: Some(1),
                diagnostics: format!("simulated failure for call {}", call),
            });
        }
        Ok(())
    }
}
