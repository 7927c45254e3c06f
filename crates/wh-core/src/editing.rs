//! The single "currently editing" selection.
//!
//! Edits are made against a copy of the entry's fields. Nothing reaches the
//! store until [`EditSlot::save`]; [`EditSlot::delete`] removes the selected
//! entry. Both close the slot. With nothing selected they do nothing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::entry::{EntryDraft, EntryError, EntryId, WorkEntry};
use crate::store::EntryStore;

/// An editable field of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Date,
    Start,
    End,
    Break,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Date => "date",
            Self::Start => "start",
            Self::End => "end",
            Self::Break => "break",
        };
        write!(f, "{s}")
    }
}

impl FromStr for EntryField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            "break" | "pause" => Ok(Self::Break),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Error type for unknown field names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field: {0} (expected date, start, end or break)")]
pub struct UnknownField(String);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Editing {
    id: EntryId,
    draft: EntryDraft,
}

/// Holds at most one entry being edited.
#[derive(Debug, Clone, Default)]
pub struct EditSlot {
    current: Option<Editing>,
}

impl EditSlot {
    /// Selects an entry for editing, replacing any previous selection.
    ///
    /// Returns `false` and leaves the slot empty if `id` is not in the store.
    pub fn begin(&mut self, store: &EntryStore, id: EntryId) -> bool {
        self.current = store.get(id).map(|entry| Editing {
            id,
            draft: entry.to_draft(),
        });
        self.current.is_some()
    }

    pub const fn is_editing(&self) -> bool {
        self.current.is_some()
    }

    /// The selected id and its pending fields.
    pub fn current(&self) -> Option<(EntryId, &EntryDraft)> {
        self.current.as_ref().map(|e| (e.id, &e.draft))
    }

    /// Changes one pending field. Returns `false` when nothing is selected.
    pub fn set(&mut self, field: EntryField, value: impl Into<String>) -> bool {
        let Some(editing) = self.current.as_mut() else {
            return false;
        };

        let value = value.into();
        match field {
            EntryField::Date => editing.draft.date = value,
            EntryField::Start => editing.draft.start = value,
            EntryField::End => editing.draft.end = value,
            EntryField::Break => editing.draft.break_duration = value,
        }
        true
    }

    /// Writes the pending fields to the store and closes the slot.
    ///
    /// Returns the id that was updated, or `None` if nothing was selected.
    /// On invalid input the slot stays open so the fields can be corrected.
    pub fn save(&mut self, store: &mut EntryStore) -> Result<Option<EntryId>, EntryError> {
        let Some(editing) = self.current.as_ref() else {
            return Ok(None);
        };

        let applied = store.update(editing.id, &editing.draft)?;
        let id = editing.id;
        self.current = None;
        Ok(applied.then_some(id))
    }

    /// Removes the selected entry from the store and closes the slot.
    pub fn delete(&mut self, store: &mut EntryStore) -> Option<WorkEntry> {
        let editing = self.current.take()?;
        store.remove(editing.id)
    }

    /// Closes the slot without touching the store.
    pub fn cancel(&mut self) -> bool {
        self.current.take().is_some()
    }
}
