use once_cell::sync::Lazy;
use regex::Regex;

use super::{push_checked, strip_tags, timestamp_error, Cue, SubtitleFormat};
use crate::errors::SubtitleError;
use crate::report::Report;

// @const: SRT timing line
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})").unwrap()
});

/// SubRip parser
///
/// A timing line opens a cue; its id is the line just above it. The text is
/// the next line, joined with the one after it unless that one is blank.
#[derive(Debug, Default, Clone, Copy)]
pub struct SrtFormat;

impl SubtitleFormat for SrtFormat {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn parse(&self, content: &str, report: &mut Report) -> Result<Vec<Cue>, SubtitleError> {
        let lines: Vec<&str> = content.lines().collect();
        let mut cues = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let Some(caps) = TIMING_REGEX.captures(line) else {
                continue;
            };

            let id = if idx > 0 { lines[idx - 1] } else { "" };

            let text = match (lines.get(idx + 1), lines.get(idx + 2)) {
                (Some(first), Some(second)) if !second.is_empty() => format!("{}{}", first, second),
                (Some(first), _) => first.to_string(),
                (None, _) => {
                    report.warn(format!("Cue {} has no text line at end of file", id));
                    String::new()
                }
            };

            let cue = Cue::new(id, &caps[1], &caps[2], strip_tags(&text))
                .map_err(timestamp_error(idx + 1))?;
            push_checked(&mut cues, cue, report);
        }

        Ok(cues)
    }
}
