use once_cell::sync::Lazy;
use regex::Regex;

use super::{push_checked, timestamp_error, Cue, SubtitleFormat, BRACE_TAG_REGEX};
use crate::errors::SubtitleError;
use crate::report::Report;

// @const: Leftovers of unbalanced override blocks, up to each closing brace
static BRACE_REMNANT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r".*?\}").unwrap());

const DIALOGUE_PREFIX: &str = "Dialogue:";

/// Advanced SubStation Alpha parser, also used for SSA
///
/// Only `Dialogue:` lines are read. The text is the last comma-separated
/// field, so dialogue text that itself contains commas is truncated to what
/// follows its last comma.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssFormat;

impl SubtitleFormat for AssFormat {
    fn name(&self) -> &'static str {
        "ASS"
    }

    fn parse(&self, content: &str, report: &mut Report) -> Result<Vec<Cue>, SubtitleError> {
        let mut cues = Vec::new();
        let mut next_id = 1usize;

        for (idx, line) in content.lines().enumerate() {
            if !line.starts_with(DIALOGUE_PREFIX) {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 3 {
                return Err(SubtitleError::MalformedLine {
                    line: idx + 1,
                    message: format!("expected start and end fields, found {} field(s)", fields.len()),
                });
            }

            // Centisecond timestamps padded to millisecond width
            let raw_start = format!("{}0", fields[1]);
            let raw_end = format!("{}0", fields[2]);
            let text = clean_text(fields[fields.len() - 1]);

            let cue = Cue::new(next_id.to_string(), raw_start, raw_end, text)
                .map_err(timestamp_error(idx + 1))?;
            next_id += 1;
            push_checked(&mut cues, cue, report);
        }

        Ok(cues)
    }
}

/// Strip override blocks and their remnants, then turn ideographic spaces into
/// plain spaces
pub fn clean_text(text: &str) -> String {
    let text = BRACE_TAG_REGEX.replace_all(text, "");
    let text = BRACE_REMNANT_REGEX.replace_all(&text, "");
    text.replace('\u{3000}', " ")
}
