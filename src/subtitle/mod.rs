/*!
 * Subtitle loading.
 *
 * Each supported format implements [`SubtitleFormat`]; [`load`] picks the
 * implementation from the file extension and returns the cues in file order.
 */

use std::fmt;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{SubtitleError, TimeError};
use crate::report::Report;
use crate::timecode::Timecode;

pub mod ass;
pub mod srt;

pub use ass::AssFormat;
pub use srt::SrtFormat;

// @const: Angle-bracket markup such as <i> or <font color="...">
static ANGLE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").unwrap());

// @const: Brace override blocks such as {\an8}
static BRACE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{.*?\}").unwrap());

/// One timed subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// SRT numbering line, or a 1-based counter for ASS/SSA
    pub id: String,

    pub start: Timecode,

    pub end: Timecode,

    /// Start timestamp as written in the file (used for naming)
    pub raw_start: String,

    /// End timestamp as written in the file (used for naming)
    pub raw_end: String,

    /// Markup-free text
    pub text: String,
}

impl Cue {
    /// Create a cue from raw timestamps, parsing them into timecodes
    pub fn new(id: impl Into<String>, raw_start: impl Into<String>, raw_end: impl Into<String>, text: impl Into<String>) -> Result<Self, TimeError> {
        let raw_start = raw_start.into();
        let raw_end = raw_end.into();
        Ok(Cue {
            id: id.into(),
            start: Timecode::parse(&raw_start)?,
            end: Timecode::parse(&raw_end)?,
            raw_start,
            raw_end,
            text: text.into(),
        })
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{} {} --> {} {}", self.id, self.raw_start, self.raw_end, self.text)
    }
}

/// A subtitle file format
pub trait SubtitleFormat {
    /// Short format name for log output
    fn name(&self) -> &'static str;

    /// Parse file content into cues, in file order
    fn parse(&self, content: &str, report: &mut Report) -> Result<Vec<Cue>, SubtitleError>;
}

/// Select the parser for a subtitle path. Extensions are case-sensitive.
pub fn format_for_path(path: &Path) -> Result<Box<dyn SubtitleFormat>, SubtitleError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("srt") => Ok(Box::new(SrtFormat)),
        Some("ass") | Some("ssa") => Ok(Box::new(AssFormat)),
        _ => Err(SubtitleError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Read and parse a subtitle file
pub fn load(path: &Path, report: &mut Report) -> Result<Vec<Cue>, SubtitleError> {
    let format = format_for_path(path)?;

    let content = fs::read_to_string(path).map_err(|source| SubtitleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let cues = format.parse(content, report)?;
    report.debug(format!("Parsed {} {} cue(s) from {:?}", cues.len(), format.name(), path));
    Ok(cues)
}

/// Remove `<...>` and `{...}` markup
pub fn strip_tags(text: &str) -> String {
    let text = ANGLE_TAG_REGEX.replace_all(text, "");
    BRACE_TAG_REGEX.replace_all(&text, "").into_owned()
}

/// Keep a cue only if it does not end before it starts
fn push_checked(cues: &mut Vec<Cue>, cue: Cue, report: &mut Report) {
    if cue.end < cue.start {
        report.warn(format!(
            "Skipping cue {}: end {} is before start {}",
            cue.id, cue.raw_end, cue.raw_start
        ));
        return;
    }
    cues.push(cue);
}

fn timestamp_error(line: usize) -> impl FnOnce(TimeError) -> SubtitleError {
    move |source| SubtitleError::InvalidTimestamp { line, source }
}
