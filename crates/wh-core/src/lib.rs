//! Core domain logic for the work hours tracker.
//!
//! This crate contains:
//! - Clock arithmetic: `HH:MM` parsing, worked hours, quarter-hour rounding
//! - Entries: validated work sessions built from free-text input
//! - Store: the ordered entry collection and its totals
//! - Editing: the single "currently editing" selection

pub mod clock;
pub mod editing;
pub mod entry;
pub mod store;

pub use clock::{
    BreakDuration, ClockError, ClockTime, format_hours, hours_between, minutes_of, quarter_hours,
    time_of,
};
pub use editing::{EditSlot, EntryField, UnknownField};
pub use entry::{EntryDraft, EntryError, EntryId, WorkEntry};
pub use store::{EntryStore, IdPolicy, Totals};
