/*!
 * Time-of-day values and clip window computation.
 *
 * Subtitle timestamps are parsed once into a [`Timecode`] and only turned back
 * into text when a clip window is handed to the extraction tool. The window
 * arithmetic works on `chrono::NaiveTime`, whose overflowing addition reports
 * when a shift crosses midnight.
 */

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TimeError;

/// Padding applied before the start and after the end of every cue
pub const DEFAULT_MARGIN_MS: u64 = 500;

/// Largest accepted margin, one day
pub const MAX_MARGIN_MS: u64 = 86_400_000;

// @const: H:MM:SS.mmm with either separator, fraction read as a decimal fraction
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2}):([0-9]{2})[.,]([0-9]{1,3})$").unwrap()
});

/// A time of day with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode(NaiveTime);

impl Timecode {
    /// Build a timecode from its components
    pub fn from_hms_milli(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_milli_opt(hours, minutes, seconds, millis)
            .map(Timecode)
            .ok_or_else(|| TimeError::InvalidTimestamp(
                format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
            ))
    }

    /// Build a timecode from milliseconds since midnight, wrapping at 24h
    pub fn from_millis(ms: u64) -> Self {
        let wrapped = ms % (24 * 3_600_000);
        Timecode(NaiveTime::default() + Duration::milliseconds(wrapped as i64))
    }

    /// Parse `H:MM:SS.mmm` or `HH:MM:SS,mmm`
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let caps = TIMECODE_REGEX
            .captures(text)
            .ok_or_else(|| TimeError::InvalidTimestamp(text.to_string()))?;

        let field = |idx: usize| -> Result<u32, TimeError> {
            caps[idx]
                .parse::<u32>()
                .map_err(|_| TimeError::InvalidTimestamp(text.to_string()))
        };

        let fraction = &caps[4];
        let millis = field(4)? * 10u32.pow(3 - fraction.len() as u32);

        Self::from_hms_milli(field(1)?, field(2)?, field(3)?, millis)
            .map_err(|_| TimeError::InvalidTimestamp(text.to_string()))
    }

    pub fn hours(&self) -> u32 {
        self.0.hour()
    }

    pub fn minutes(&self) -> u32 {
        self.0.minute()
    }

    pub fn seconds(&self) -> u32 {
        self.0.second()
    }

    pub fn millis(&self) -> u32 {
        self.0.nanosecond() / 1_000_000
    }

    /// Milliseconds since midnight
    pub fn as_millis(&self) -> u64 {
        self.0.num_seconds_from_midnight() as u64 * 1_000 + self.millis() as u64
    }

    fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S%.3f"))
    }
}

impl FromStr for Timecode {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Global shift applied to every cue of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    /// Shift towards the start of the media
    pub negative: bool,

    /// Absolute amount of the shift
    pub magnitude: Timecode,
}

impl Offset {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Parse `HH:MM:SS.mmm`, optionally prefixed with a single `-`
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let (negative, magnitude) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let magnitude = Timecode::parse(magnitude)
            .map_err(|_| TimeError::InvalidOffset(text.to_string()))?;

        Ok(Offset { negative, magnitude })
    }

    fn as_duration(&self) -> Duration {
        let ms = Duration::milliseconds(self.magnitude.as_millis() as i64);
        if self.negative { -ms } else { ms }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

impl FromStr for Offset {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Seek position and length of one clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipWindow {
    pub start: Timecode,
    pub duration: Timecode,
}

/// Turns cue bounds into padded, offset clip windows
#[derive(Debug, Clone)]
pub struct TimeNormalizer {
    offset: Offset,
    margin: Duration,
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::new(Offset::zero(), DEFAULT_MARGIN_MS)
    }
}

impl TimeNormalizer {
    /// Margins above [`MAX_MARGIN_MS`] are clamped to one day
    pub fn new(offset: Offset, margin_ms: u64) -> Self {
        Self {
            offset,
            margin: Duration::milliseconds(margin_ms.min(MAX_MARGIN_MS) as i64),
        }
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Compute the clip window of a cue.
    ///
    /// The padded start is only used when it stays on the same day after the
    /// offset is applied. Otherwise the start falls back to `start + offset`
    /// for a positive offset and to the untouched `start` for a negative one,
    /// while the end is always padded and shifted. The duration is taken
    /// modulo 24 hours.
    pub fn normalize(&self, start: Timecode, end: Timecode) -> ClipWindow {
        let shift = self.offset.as_duration();
        let start_time = start.as_naive();

        let (padded, wrapped) = start_time.overflowing_add_signed(shift - self.margin);
        let (clip_start, start_wrap) = if wrapped == 0 {
            (padded, 0)
        } else if self.offset.negative {
            (start_time, 0)
        } else {
            start_time.overflowing_add_signed(shift)
        };

        let (clip_end, end_wrap) = end.as_naive().overflowing_add_signed(self.margin + shift);

        let elapsed = clip_end.signed_duration_since(clip_start)
            + Duration::seconds(end_wrap - start_wrap);

        ClipWindow {
            start: Timecode(clip_start),
            duration: Timecode(NaiveTime::default() + elapsed),
        }
    }
}

/// String-level entry point: `(start, end, offset)` to `(clip_start, clip_duration)`
/// using the default margin
pub fn normalize(start: &str, end: &str, offset: &str) -> Result<(String, String), TimeError> {
    let start = Timecode::parse(start)?;
    let end = Timecode::parse(end)?;
    let offset = Offset::parse(offset)?;

    let window = TimeNormalizer::new(offset, DEFAULT_MARGIN_MS).normalize(start, end);
    Ok((window.start.to_string(), window.duration.to_string()))
}
