/*!
 * Subtitle/media selection.
 *
 * Inputs are either literal paths or simple wildcard patterns such as
 * `season1/ep??.srt`. Matches are sorted by file name so that numbered episodes
 * pair up positionally.
 */

use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::errors::SelectionError;

/// Positionally paired subtitle and media files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pairs: Vec<(PathBuf, PathBuf)>,
}

impl Selection {
    /// Pair the two lists. Nothing is opened here; only the list shapes are checked.
    pub fn new(subtitles: Vec<PathBuf>, media: Vec<PathBuf>) -> Result<Self, SelectionError> {
        if subtitles.is_empty() {
            return Err(SelectionError::EmptySubtitles);
        }
        if media.is_empty() {
            return Err(SelectionError::EmptyMedia);
        }
        if subtitles.len() != media.len() {
            return Err(SelectionError::LengthMismatch {
                subtitles: subtitles.len(),
                media: media.len(),
            });
        }

        Ok(Self {
            pairs: subtitles.into_iter().zip(media).collect(),
        })
    }

    /// Expand both inputs and pair the results
    pub fn from_patterns(subtitles: &str, media: &str) -> Result<Self, SelectionError> {
        Self::new(expand_pattern(subtitles)?, expand_pattern(media)?)
    }

    pub fn pairs(&self) -> &[(PathBuf, PathBuf)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Expand a wildcard pattern (`*` and `?` in the file name part) into the
/// matching files, sorted by name. Anything else is taken as a literal path;
/// an empty input selects nothing.
pub fn expand_pattern(input: &str) -> Result<Vec<PathBuf>, SelectionError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    if !input.contains(['*', '?']) {
        return Ok(vec![PathBuf::from(input)]);
    }

    let pattern_path = Path::new(input);
    let dir = match pattern_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_pattern = pattern_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if dir.to_string_lossy().contains(['*', '?']) {
        return Err(SelectionError::InvalidPattern {
            pattern: input.to_string(),
            message: "wildcards are only supported in the file name".to_string(),
        });
    }

    let matcher = wildcard_regex(&file_pattern).map_err(|e| SelectionError::InvalidPattern {
        pattern: input.to_string(),
        message: e.to_string(),
    })?;

    // Hidden files only match patterns that name them explicitly
    let include_hidden = file_pattern.starts_with('.');

    let mut matches: Vec<PathBuf> = WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| include_hidden || !entry.file_name().to_string_lossy().starts_with('.'))
        .filter(|entry| matcher.is_match(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect();

    // Keep the caller's spelling for patterns without a directory part
    if pattern_path.parent().is_none_or(|p| p.as_os_str().is_empty()) {
        matches = matches
            .into_iter()
            .map(|p| p.file_name().map(PathBuf::from).unwrap_or(p))
            .collect();
    }

    Ok(matches)
}

/// Translate a file name wildcard into an anchored regex
fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut expr = String::from("^");
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr)
}
