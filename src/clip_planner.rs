use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::ExtractionRequest;
use crate::subtitle::Cue;
use crate::timecode::{ClipWindow, TimeNormalizer};

// @module: Output naming and extraction parameters for each cue

// @const: Characters that are unsafe in file names on common platforms
static UNSAFE_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/:?"<>,.|]"#).unwrap());

/// Everything needed to cut one cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPlan {
    /// Folder the clip is written to
    pub output_dir: PathBuf,

    /// Window computed for the cue
    pub window: ClipWindow,

    /// Parameters for the extraction driver
    pub request: ExtractionRequest,
}

impl ClipPlan {
    pub fn output_path(&self) -> &Path {
        &self.request.output
    }
}

/// Plans clips for the cues of a subtitle/media pair
#[derive(Debug, Clone, Default)]
pub struct ClipPlanner {
    normalizer: TimeNormalizer,
    output_root: Option<PathBuf>,
}

impl ClipPlanner {
    pub fn new(normalizer: TimeNormalizer, output_root: Option<PathBuf>) -> Self {
        Self { normalizer, output_root }
    }

    /// Folder for the clips of a media file: the media path without its
    /// extension, or `<output_root>/<stem>` when a root is configured
    pub fn output_dir(&self, media_path: &Path) -> PathBuf {
        match &self.output_root {
            Some(root) => root.join(media_path.file_stem().unwrap_or_default()),
            None => media_path.with_extension(""),
        }
    }

    /// Plan the clip for a single cue
    pub fn plan(&self, cue: &Cue, media_path: &Path) -> ClipPlan {
        let output_dir = self.output_dir(media_path);
        let output = output_dir.join(clip_file_name(cue, media_path));
        let window = self.normalizer.normalize(cue.start, cue.end);

        ClipPlan {
            output_dir,
            window,
            request: ExtractionRequest {
                seek: window.start,
                duration: window.duration,
                input: media_path.to_path_buf(),
                output,
            },
        }
    }
}

/// `<id>_<rawStart>_<rawEnd>_<text>` sanitized, with the media extension
pub fn clip_file_name(cue: &Cue, media_path: &Path) -> String {
    let stem = [
        cue.id.as_str(),
        cue.raw_start.as_str(),
        cue.raw_end.as_str(),
        cue.text.as_str(),
    ]
    .join("_");
    let mut name = sanitize_file_name(&stem);

    if let Some(ext) = media_path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    name
}

/// Replace `\ / : ? " < > , . |` with `-`
pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "-").into_owned()
}
