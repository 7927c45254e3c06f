//! In-memory, ordered collection of work entries.
//!
//! Entries keep insertion order, which is also display order. The store lives
//! as long as the session that owns it; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::entry::{EntryDraft, EntryError, EntryId, WorkEntry};

/// How the store picks the id of a new entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// One past the highest id currently stored, or 1 when empty.
    ///
    /// Deleting the highest entry frees its id for the next add.
    #[default]
    MaxPlusOne,

    /// A counter owned by the store. Ids are never handed out twice.
    Monotonic,
}

/// Aggregates over every entry in a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total_hours_worked: f64,
    pub total_quarter_hours_worked: u32,
    /// Sum of all break durations, in minutes.
    pub total_pause_minutes: u32,
}

/// Ordered work entries plus id assignment.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<WorkEntry>,
    policy: IdPolicy,
    /// Highest id ever handed out.
    issued: u32,
}

impl EntryStore {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            issued: 0,
        }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[WorkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&WorkEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn candidate_id(&self) -> EntryId {
        let next = match self.policy {
            IdPolicy::MaxPlusOne => self.entries.iter().map(|e| e.id.get()).max().unwrap_or(0) + 1,
            IdPolicy::Monotonic => self.issued + 1,
        };
        EntryId::new(next)
    }

    /// Validates a draft and appends it as a new entry.
    ///
    /// Nothing is stored and no id is consumed when the draft is invalid.
    pub fn add(&mut self, draft: &EntryDraft) -> Result<EntryId, EntryError> {
        let id = self.candidate_id();
        let entry = WorkEntry::from_draft(id, draft)?;

        tracing::debug!(
            %id,
            date = %entry.date,
            start = %entry.start,
            end = %entry.end,
            hours = entry.hours_worked(),
            "added entry"
        );

        self.issued = self.issued.max(id.get());
        self.entries.push(entry);
        Ok(id)
    }

    /// Replaces the fields of an existing entry, keeping its id and position.
    ///
    /// Returns `Ok(false)` without touching anything when `id` is unknown.
    pub fn update(&mut self, id: EntryId, draft: &EntryDraft) -> Result<bool, EntryError> {
        let Some(slot) = self.entries.iter_mut().find(|e| e.id == id) else {
            tracing::debug!(%id, "update ignored: no such entry");
            return Ok(false);
        };

        *slot = WorkEntry::from_draft(id, draft)?;
        tracing::debug!(%id, hours = slot.hours_worked(), "updated entry");
        Ok(true)
    }

    /// Deletes an entry. Unknown ids are ignored.
    pub fn remove(&mut self, id: EntryId) -> Option<WorkEntry> {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            tracing::debug!(%id, "remove ignored: no such entry");
            return None;
        };

        tracing::debug!(%id, "removed entry");
        Some(self.entries.remove(index))
    }

    /// Sums hours, quarter hours and break minutes over all entries.
    pub fn totals(&self) -> Totals {
        self.entries.iter().fold(Totals::default(), |acc, entry| Totals {
            total_hours_worked: acc.total_hours_worked + entry.hours_worked(),
            total_quarter_hours_worked: acc
                .total_quarter_hours_worked
                .saturating_add(entry.quarter_hours_worked()),
            total_pause_minutes: acc
                .total_pause_minutes
                .saturating_add(entry.pause_minutes()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(start: &str, end: &str, brk: &str) -> EntryDraft {
        EntryDraft::new("2024-01-01", start, end, brk)
    }

    fn ids(store: &EntryStore) -> Vec<u32> {
        store.entries().iter().map(|e| e.id.get()).collect()
    }

    #[test]
    fn add_assigns_sequential_ids_in_insertion_order() {
        let mut store = EntryStore::default();
        assert_eq!(store.add(&draft("09:00", "17:00", "00:30")).unwrap().get(), 1);
        assert_eq!(store.add(&draft("09:00", "10:05", "")).unwrap().get(), 2);
        assert_eq!(store.add(&draft("13:00", "14:00", "")).unwrap().get(), 3);
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn invalid_add_leaves_store_unchanged() {
        let mut store = EntryStore::default();
        store.add(&draft("09:00", "17:00", "00:30")).unwrap();

        let err = store.add(&draft("09:00", "", "")).unwrap_err();
        assert!(matches!(err, EntryError::End(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn totals_of_two_entries() {
        let mut store = EntryStore::default();
        store.add(&draft("09:00", "17:00", "00:30")).unwrap();
        store.add(&draft("09:00", "10:05", "00:00")).unwrap();

        let totals = store.totals();
        assert!((totals.total_hours_worked - 8.5833).abs() < 1e-4);
        assert_eq!(totals.total_quarter_hours_worked, 35);
        assert_eq!(totals.total_pause_minutes, 30);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "sums of the same values in the same order")]
    fn totals_match_per_entry_values() {
        let mut store = EntryStore::default();
        store.add(&draft("08:00", "12:10", "00:05")).unwrap();
        store.add(&draft("13:00", "17:59", "00:17")).unwrap();
        store.add(&draft("18:00", "17:00", "")).unwrap();

        let totals = store.totals();
        let hours: f64 = store.entries().iter().map(WorkEntry::hours_worked).sum();
        let quarters: u32 = store.entries().iter().map(WorkEntry::quarter_hours_worked).sum();
        let pause: u32 = store.entries().iter().map(WorkEntry::pause_minutes).sum();

        assert_eq!(totals.total_hours_worked, hours);
        assert_eq!(totals.total_quarter_hours_worked, quarters);
        assert_eq!(totals.total_pause_minutes, pause);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let mut store = EntryStore::new(IdPolicy::Monotonic);
        let long_break = draft("09:00", "17:00", "9999:59");
        for _ in 0..7200 {
            store.add(&long_break).unwrap();
        }

        let totals = store.totals();
        assert_eq!(totals.total_pause_minutes, u32::MAX);
        assert_eq!(totals.total_quarter_hours_worked, 0);
    }

    #[test]
    fn totals_of_empty_store_are_zero() {
        assert_eq!(EntryStore::default().totals(), Totals::default());
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "whole hours are exact")]
    fn update_recomputes_derived_values_and_keeps_id() {
        let mut store = EntryStore::default();
        let id = store.add(&draft("09:00", "17:00", "00:30")).unwrap();
        store.add(&draft("09:00", "10:00", "")).unwrap();

        let applied = store
            .update(id, &EntryDraft::new("2024-01-02", "10:00", "12:00", ""))
            .unwrap();
        assert!(applied);

        let entry = store.get(id).unwrap();
        assert_eq!(entry.date, "2024-01-02");
        assert_eq!(entry.hours_worked(), 2.0);
        assert_eq!(entry.quarter_hours_worked(), 8);
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let mut store = EntryStore::default();
        store.add(&draft("09:00", "17:00", "00:30")).unwrap();
        let before = store.entries().to_vec();

        let applied = store
            .update(EntryId::new(42), &draft("10:00", "11:00", ""))
            .unwrap();
        assert!(!applied);
        assert_eq!(store.entries(), before.as_slice());
    }

    #[test]
    fn invalid_update_keeps_previous_fields() {
        let mut store = EntryStore::default();
        let id = store.add(&draft("09:00", "17:00", "00:30")).unwrap();

        let err = store.update(id, &draft("09:00", "17:00", "0:75")).unwrap_err();
        assert!(matches!(err, EntryError::Break(_)));
        assert_eq!(store.get(id).unwrap().pause_minutes(), 30);
    }

    #[test]
    fn remove_of_unknown_id_leaves_collection_unchanged() {
        let mut store = EntryStore::default();
        store.add(&draft("09:00", "17:00", "00:30")).unwrap();
        store.add(&draft("09:00", "10:05", "")).unwrap();
        let before = store.entries().to_vec();

        assert!(store.remove(EntryId::new(99)).is_none());
        assert_eq!(store.entries(), before.as_slice());
    }

    #[test]
    fn remove_keeps_order_of_remaining_entries() {
        let mut store = EntryStore::default();
        for _ in 0..3 {
            store.add(&draft("09:00", "10:00", "")).unwrap();
        }

        let removed = store.remove(EntryId::new(2)).unwrap();
        assert_eq!(removed.id.get(), 2);
        assert_eq!(ids(&store), vec![1, 3]);
    }

    #[test]
    fn max_plus_one_reuses_id_of_deleted_highest_entry() {
        let mut store = EntryStore::new(IdPolicy::MaxPlusOne);
        store.add(&draft("09:00", "10:00", "")).unwrap();
        let last = store.add(&draft("10:00", "11:00", "")).unwrap();

        store.remove(last);
        let next = store.add(&draft("11:00", "12:00", "")).unwrap();
        assert_eq!(next, last);
    }

    #[test]
    fn max_plus_one_fills_from_highest_not_gaps() {
        let mut store = EntryStore::new(IdPolicy::MaxPlusOne);
        for _ in 0..3 {
            store.add(&draft("09:00", "10:00", "")).unwrap();
        }
        store.remove(EntryId::new(1));

        let next = store.add(&draft("09:00", "10:00", "")).unwrap();
        assert_eq!(next.get(), 4);
    }

    #[test]
    fn monotonic_never_reuses_ids() {
        let mut store = EntryStore::new(IdPolicy::Monotonic);
        store.add(&draft("09:00", "10:00", "")).unwrap();
        let last = store.add(&draft("10:00", "11:00", "")).unwrap();

        store.remove(last);
        let next = store.add(&draft("11:00", "12:00", "")).unwrap();
        assert_eq!(next.get(), 3);

        store.remove(EntryId::new(1));
        store.remove(next);
        assert!(store.is_empty());
        assert_eq!(store.add(&draft("09:00", "10:00", "")).unwrap().get(), 4);
    }

    #[test]
    fn id_policy_uses_snake_case_names() {
        let policy: IdPolicy = serde_json::from_str("\"monotonic\"").unwrap();
        assert_eq!(policy, IdPolicy::Monotonic);
        assert_eq!(
            serde_json::to_string(&IdPolicy::MaxPlusOne).unwrap(),
            "\"max_plus_one\""
        );
    }
}
