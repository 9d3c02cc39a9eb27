/*!
 * Tests for input expansion and pairing
 */

use std::path::PathBuf;

use anyhow::Result;
use subclip::errors::SelectionError;
use subclip::selection::{expand_pattern, Selection};
use crate::common;

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn test_selection_new_withEqualLists_shouldPairPositionally() -> Result<()> {
    let selection = Selection::new(paths(&["a.srt", "b.srt"]), paths(&["a.mp4", "b.mp4"]))?;
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.pairs()[1], (PathBuf::from("b.srt"), PathBuf::from("b.mp4")));
    Ok(())
}

#[test]
fn test_selection_new_withMismatchedLists_shouldFailWithoutOpeningFiles() {
    // None of these files exist; only the list lengths are checked
    let result = Selection::new(paths(&["x/1.srt", "x/2.srt"]), paths(&["x/1.mp4"]));
    assert_eq!(result, Err(SelectionError::LengthMismatch { subtitles: 2, media: 1 }));
}

#[test]
fn test_selection_new_withEmptyLists_shouldFail() {
    assert_eq!(Selection::new(vec![], paths(&["a.mp4"])), Err(SelectionError::EmptySubtitles));
    assert_eq!(Selection::new(paths(&["a.srt"]), vec![]), Err(SelectionError::EmptyMedia));
}

#[test]
fn test_expand_pattern_withLiteralPath_shouldReturnItUnchecked() -> Result<()> {
    assert_eq!(expand_pattern("does/not/exist.srt")?, paths(&["does/not/exist.srt"]));
    assert!(expand_pattern("   ")?.is_empty());
    Ok(())
}

#[test]
fn test_expand_pattern_withWildcard_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    for name in ["ep02.srt", "ep01.srt", "ep10.srt", "ep01.mp4", "notes.txt"] {
        common::create_test_file(temp_dir.path(), name, "")?;
    }

    let pattern = temp_dir.path().join("*.srt");
    let matches = expand_pattern(&pattern.to_string_lossy())?;

    assert_eq!(
        matches,
        vec![
            temp_dir.path().join("ep01.srt"),
            temp_dir.path().join("ep02.srt"),
            temp_dir.path().join("ep10.srt"),
        ]
    );
    Ok(())
}

#[test]
fn test_expand_pattern_withLeadingWildcard_shouldSkipHiddenFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    for name in [".ep00.srt", "ep01.srt", "ep02.srt"] {
        common::create_test_file(temp_dir.path(), name, "")?;
    }

    let visible = expand_pattern(&temp_dir.path().join("*.srt").to_string_lossy())?;
    assert_eq!(
        visible,
        vec![temp_dir.path().join("ep01.srt"), temp_dir.path().join("ep02.srt")]
    );

    let hidden = expand_pattern(&temp_dir.path().join(".*.srt").to_string_lossy())?;
    assert_eq!(hidden, vec![temp_dir.path().join(".ep00.srt")]);
    Ok(())
}

#[test]
fn test_expand_pattern_withQuestionMark_shouldMatchSingleCharacter() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    for name in ["ep1.ass", "ep2.ass", "ep10.ass"] {
        common::create_test_file(temp_dir.path(), name, "")?;
    }

    let pattern = temp_dir.path().join("ep?.ass");
    let matches = expand_pattern(&pattern.to_string_lossy())?;
    assert_eq!(matches.len(), 2);
    Ok(())
}

#[test]
fn test_from_patterns_withUnequalMatches_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    for name in ["a.srt", "b.srt", "a.mp4"] {
        common::create_test_file(temp_dir.path(), name, "")?;
    }

    let subs = temp_dir.path().join("*.srt");
    let media = temp_dir.path().join("*.mp4");
    let result = Selection::from_patterns(&subs.to_string_lossy(), &media.to_string_lossy());
    assert_eq!(result, Err(SelectionError::LengthMismatch { subtitles: 2, media: 1 }));
    Ok(())
}

#[test]
fn test_expand_pattern_withWildcardDirectory_shouldBeRejected() {
    let result = expand_pattern("season*/ep01.srt");
    assert!(matches!(result, Err(SelectionError::InvalidPattern { .. })));
}
