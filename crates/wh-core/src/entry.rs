//! Work entries and the raw input they are built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{self, BreakDuration, ClockError, ClockTime};

/// Identifier of a work entry, unique within its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u32);

impl EntryId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Rejected entry input, naming the offending field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("start time: {0}")]
    Start(ClockError),

    #[error("end time: {0}")]
    End(ClockError),

    #[error("break: {0}")]
    Break(ClockError),
}

/// The four free-text fields of an entry as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub date: String,
    pub start: String,
    pub end: String,
    pub break_duration: String,
}

impl EntryDraft {
    pub fn new(
        date: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        break_duration: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            start: start.into(),
            end: end.into(),
            break_duration: break_duration.into(),
        }
    }
}

/// One recorded work session.
///
/// Only the raw fields are stored. Hours worked and quarter hours are derived
/// on every read, so they cannot drift from the times they come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkEntry {
    pub id: EntryId,
    pub date: String,
    pub start: ClockTime,
    pub end: ClockTime,
    pub break_duration: BreakDuration,
}

impl WorkEntry {
    /// Validates a draft and builds an entry with the given id.
    pub fn from_draft(id: EntryId, draft: &EntryDraft) -> Result<Self, EntryError> {
        let start = draft.start.parse().map_err(EntryError::Start)?;
        let end = draft.end.parse().map_err(EntryError::End)?;
        let break_duration = draft.break_duration.parse().map_err(EntryError::Break)?;

        Ok(Self {
            id,
            date: draft.date.trim().to_string(),
            start,
            end,
            break_duration,
        })
    }

    /// The entry's fields back in editable form.
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft::new(
            self.date.clone(),
            self.start.to_string(),
            self.end.to_string(),
            self.break_duration.to_string(),
        )
    }

    pub fn hours_worked(&self) -> f64 {
        clock::hours_between(self.start, self.end, self.break_duration)
    }

    pub fn quarter_hours_worked(&self) -> u32 {
        clock::quarter_hours(self.hours_worked())
    }

    pub const fn pause_minutes(&self) -> u32 {
        self.break_duration.minutes()
    }
}
