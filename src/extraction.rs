/*!
 * Clip extraction.
 *
 * The [`ExtractionDriver`] trait is the seam between planning and the external
 * tool. [`FfmpegDriver`] performs a stream-copy cut with ffmpeg, one blocking
 * invocation per clip.
 */

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::app_config::ExtractionConfig;
use crate::errors::ExtractionError;
use crate::timecode::Timecode;

/// Parameters of a single cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Absolute seek position in the source
    pub seek: Timecode,

    /// Length of the clip
    pub duration: Timecode,

    /// Source media file
    pub input: PathBuf,

    /// Destination clip file
    pub output: PathBuf,
}

/// Executes cuts described by [`ExtractionRequest`]s
#[async_trait]
pub trait ExtractionDriver: Send + Sync {
    /// Cut one clip; returns once the tool has finished
    async fn extract(&self, request: &ExtractionRequest) -> Result<(), ExtractionError>;
}

/// Stream-copy extraction through ffmpeg
#[derive(Debug, Clone)]
pub struct FfmpegDriver {
    program: String,
    timeout: Option<Duration>,
    overwrite: bool,
}

impl FfmpegDriver {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            program: config.ffmpeg_path.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            overwrite: config.overwrite,
        }
    }

    /// Arguments passed to ffmpeg for a request
    pub fn arguments(&self, request: &ExtractionRequest) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            if self.overwrite { "-y" } else { "-n" }.to_string(),
            "-ss".to_string(),
            request.seek.to_string(),
            "-i".to_string(),
            request.input.to_string_lossy().into_owned(),
            "-t".to_string(),
            request.duration.to_string(),
            "-c".to_string(),
            "copy".to_string(),
            request.output.to_string_lossy().into_owned(),
        ]
    }

    /// Printable command line, for logs and dry runs
    pub fn command_line(&self, request: &ExtractionRequest) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.arguments(request).into_iter().map(|arg| {
            if arg.contains(' ') { format!("\"{}\"", arg) } else { arg }
        }));
        parts.join(" ")
    }

    /// Filter ffmpeg stderr to only show meaningful error lines, stripping the
    /// version banner, build configuration, and stream metadata noise.
    pub fn filter_stderr(stderr: &str) -> String {
        let noise_prefixes = [
            "ffmpeg version",
            "built with",
            "configuration:",
            "lib",
            "Input #",
            "Metadata:",
            "Duration:",
            "Chapter",
            "Stream #",
            "Output #",
            "Stream mapping:",
            "Press [q]",
            "frame=",
            "size=",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !noise_prefixes.iter().any(|p| line.starts_with(p)))
            .collect();

        if meaningful.is_empty() {
            "unknown ffmpeg error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}

#[async_trait]
impl ExtractionDriver for FfmpegDriver {
    async fn extract(&self, request: &ExtractionRequest) -> Result<(), ExtractionError> {
        debug!("{}", self.command_line(request));

        let child = Command::new(&self.program)
            .args(self.arguments(request))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExtractionError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => tokio::select! {
                result = wait => result,
                _ = tokio::time::sleep(limit) => {
                    return Err(ExtractionError::TimedOut(limit.as_secs()));
                }
            },
            None => wait.await,
        }
        .map_err(|e| ExtractionError::Spawn {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ExtractionError::Failed {
                status: output.status.code(),
                diagnostics: Self::filter_stderr(&stderr),
            })
        }
    }
}
