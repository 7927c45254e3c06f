//! Clock-time and duration arithmetic.
//!
//! Clock times and break durations share the `HH:MM` notation, but only clock
//! times are bounded to a single day. A break duration is elapsed minutes and
//! may exceed 23 hours when written out.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `H:MM` through `HHHH:MM`. The hour count is unbounded for durations.
static HH_MM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{1,4}):(\d{2})$").unwrap());

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors from parsing `HH:MM` values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The value is not of the form `HH:MM`.
    #[error("invalid time {value:?}: expected HH:MM")]
    Malformed { value: String },

    /// The minute part is 60 or above.
    #[error("invalid time {value:?}: minutes must be below 60")]
    MinutesOutOfRange { value: String },

    /// A clock time outside `00:00..=23:59`.
    #[error("invalid clock time {value:?}: must be between 00:00 and 23:59")]
    NotAClockTime { value: String },
}

/// Converts `HH:MM` to a minute count (`hours * 60 + minutes`).
pub fn minutes_of(time: &str) -> Result<u32, ClockError> {
    let trimmed = time.trim();
    let Some(caps) = HH_MM_RE.captures(trimmed) else {
        return Err(ClockError::Malformed {
            value: time.to_string(),
        });
    };

    // Both groups are short digit runs, so parsing cannot overflow.
    let hours: u32 = caps[1].parse().map_err(|_| ClockError::Malformed {
        value: time.to_string(),
    })?;
    let minutes: u32 = caps[2].parse().map_err(|_| ClockError::Malformed {
        value: time.to_string(),
    })?;

    if minutes >= 60 {
        return Err(ClockError::MinutesOutOfRange {
            value: time.to_string(),
        });
    }

    Ok(hours * 60 + minutes)
}

/// Formats a minute count as `HH:MM`.
///
/// Values of a day or more are not wrapped: 1500 minutes is `"25:00"`.
pub fn time_of(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Hours worked between two clock times on the same day, less the break.
///
/// Never negative. An end before the start (an overnight shift) or a break
/// longer than the span yields zero.
pub fn hours_between(start: ClockTime, end: ClockTime, break_duration: BreakDuration) -> f64 {
    let elapsed = (end.0 - start.0).num_minutes();
    let worked = elapsed - i64::from(break_duration.minutes());

    #[allow(clippy::cast_precision_loss)]
    let hours = worked as f64 / 60.0;
    hours.max(0.0)
}

/// Rounds hours up to whole quarter hours: `ceil(hours * 4)`.
///
/// Negative and NaN input count as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quarter_hours(hours: f64) -> u32 {
    let quarters = (hours * 4.0).ceil();
    if quarters.is_nan() || quarters <= 0.0 {
        0
    } else {
        quarters as u32
    }
}

/// Formats fractional hours as `HH:MM`, rounded to the nearest minute.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_hours(hours: f64) -> String {
    let minutes = (hours * 60.0).round();
    if minutes.is_nan() || minutes <= 0.0 {
        return time_of(0);
    }
    time_of(minutes as u32)
}

/// A wall-clock time of day, `00:00` to `23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Creates a clock time from hours and minutes.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes = minutes_of(s)?;
        if minutes >= MINUTES_PER_DAY {
            return Err(ClockError::NotAClockTime {
                value: s.to_string(),
            });
        }
        Self::from_hm(minutes / 60, minutes % 60).ok_or_else(|| ClockError::NotAClockTime {
            value: s.to_string(),
        })
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Elapsed break time, written `HH:MM`.
///
/// An empty field parses as no break at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BreakDuration(u32);

impl BreakDuration {
    pub const ZERO: Self = Self(0);

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn minutes(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BreakDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", time_of(self.0))
    }
}

impl FromStr for BreakDuration {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::ZERO);
        }
        minutes_of(s).map(Self)
    }
}

impl Serialize for BreakDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BreakDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
