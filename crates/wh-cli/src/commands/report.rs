//! Text and JSON rendering of entries and totals.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;
use wh_core::{
    BreakDuration, ClockTime, EntryId, EntryStore, Totals, WorkEntry, format_hours, time_of,
};

use crate::config::HoursFormat;

// ========== Hours Formatting ==========

/// Formats an hour amount as configured.
pub fn format_hours_as(hours: f64, format: HoursFormat) -> String {
    match format {
        HoursFormat::Clock => format_hours(hours),
        HoursFormat::Decimal => format!("{hours:.2}"),
    }
}

// ========== Entry Table ==========

/// Formats entries as a table, one row per entry in store order.
pub fn format_table(entries: &[WorkEntry], format: HoursFormat) -> String {
    let mut output = String::new();

    if entries.is_empty() {
        writeln!(output, "No entries.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<3}  {:<10}  {:<5}  {:<5}  {:<5}  {:>6}  {:>8}",
        "ID", "DATE", "START", "END", "BREAK", "WORKED", "QUARTERS"
    )
    .unwrap();

    for entry in entries {
        writeln!(
            output,
            "{:<3}  {:<10}  {:<5}  {:<5}  {:<5}  {:>6}  {:>8}",
            entry.id.to_string(),
            entry.date,
            entry.start.to_string(),
            entry.end.to_string(),
            entry.break_duration.to_string(),
            format_hours_as(entry.hours_worked(), format),
            entry.quarter_hours_worked()
        )
        .unwrap();
    }

    output
}

// ========== Totals ==========

/// Formats the totals block.
///
/// Pause time is always written `HH:MM`.
pub fn format_totals(totals: &Totals, format: HoursFormat) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "{:<21}{}",
        "Total hours worked:",
        format_hours_as(totals.total_hours_worked, format)
    )
    .unwrap();
    writeln!(
        output,
        "{:<21}{}",
        "Total quarter hours:", totals.total_quarter_hours_worked
    )
    .unwrap();
    writeln!(
        output,
        "{:<21}{}",
        "Total pause time:",
        time_of(totals.total_pause_minutes)
    )
    .unwrap();
    output
}

// ========== JSON Output ==========

/// One entry with its derived values.
#[derive(Debug, Serialize)]
pub struct JsonEntry<'a> {
    pub id: EntryId,
    pub date: &'a str,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub break_duration: BreakDuration,
    pub hours_worked: f64,
    pub quarter_hours_worked: u32,
}

impl<'a> From<&'a WorkEntry> for JsonEntry<'a> {
    fn from(entry: &'a WorkEntry) -> Self {
        Self {
            id: entry.id,
            date: &entry.date,
            start_time: entry.start,
            end_time: entry.end,
            break_duration: entry.break_duration,
            hours_worked: entry.hours_worked(),
            quarter_hours_worked: entry.quarter_hours_worked(),
        }
    }
}

/// Full listing: entries in store order plus totals.
#[derive(Debug, Serialize)]
pub struct JsonListing<'a> {
    pub entries: Vec<JsonEntry<'a>>,
    pub totals: Totals,
}

/// Formats the store's entries and totals as JSON.
pub fn format_json(store: &EntryStore) -> Result<String> {
    let listing = JsonListing {
        entries: store.entries().iter().map(JsonEntry::from).collect(),
        totals: store.totals(),
    };
    Ok(serde_json::to_string_pretty(&listing)?)
}
