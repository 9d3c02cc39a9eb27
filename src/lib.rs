/*!
 * # subclip - dialogue clips from subtitle timing
 *
 * A Rust library that cuts a media file into one clip per subtitle cue.
 *
 * ## Features
 *
 * - Parse SubRip (`.srt`) and Advanced SubStation Alpha (`.ass`/`.ssa`) files
 * - Strip formatting markup from cue text
 * - Pad every cue by a margin and shift it by a global signed offset
 * - Name each clip after its cue and cut it with ffmpeg stream copy
 * - Pair several subtitle and media files positionally
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle`: Format parsers behind the `SubtitleFormat` trait
 * - `timecode`: Time-of-day values and clip window computation
 * - `clip_planner`: Output naming and extraction parameters
 * - `extraction`: The `ExtractionDriver` trait and the ffmpeg driver
 * - `selection`: Input expansion and pairing
 * - `app_controller`: Sequential processing of a selection
 * - `report`: Per-pair reporting context
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod clip_planner;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod report;
pub mod selection;
pub mod subtitle;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use clip_planner::{ClipPlan, ClipPlanner};
pub use errors::{AppError, ExtractionError, SelectionError, SubtitleError, TimeError};
pub use extraction::{ExtractionDriver, ExtractionRequest, FfmpegDriver};
pub use selection::Selection;
pub use subtitle::{Cue, SubtitleFormat};
pub use timecode::{normalize, ClipWindow, Offset, TimeNormalizer, Timecode};
