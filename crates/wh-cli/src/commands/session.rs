//! Interactive session over an in-memory entry store.
//!
//! Reads one command per line. Entries and the edit selection live only as
//! long as the session; nothing is written to disk.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use wh_core::{EditSlot, EntryDraft, EntryField, EntryId, EntryStore, WorkEntry};

use crate::Config;
use crate::commands::report::{format_hours_as, format_json, format_table, format_totals};
use crate::config::HoursFormat;

pub const HELP: &str = "\
Commands:
  add <date> <start> <end> [break]   add an entry (times as HH:MM, date - for none)
  list [--json]                      show all entries
  totals                             show hours, quarter hours and pause time
  edit <id>                          select an entry for editing
  set <date|start|end|break> [value] change a field of the selected entry
  save                               apply the changes to the selected entry
  delete                             delete the selected entry
  cancel                             discard the selection
  help                               show this help
  quit                               end the session
";

/// Stands in for an empty date on the `add` line.
const NO_DATE: &str = "-";

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Session state: the entry store and the edit selection.
#[derive(Debug)]
pub struct Session {
    store: EntryStore,
    slot: EditSlot,
    hours_format: HoursFormat,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            store: EntryStore::new(config.id_policy),
            slot: EditSlot::default(),
            hours_format: config.hours_format,
        }
    }

    pub const fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Runs a single command line.
    ///
    /// Errors are problems with the command itself; the session stays usable.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match command {
            "add" => self.add(&args, out)?,
            "list" | "ls" => self.list(&args, out)?,
            "totals" => {
                let totals = self.store.totals();
                write!(out, "{}", format_totals(&totals, self.hours_format))?;
            }
            "edit" => self.edit(&args, out)?,
            "set" => self.set(&args, out)?,
            "save" => self.save(out)?,
            "delete" | "rm" => self.delete(out)?,
            "cancel" => {
                if self.slot.cancel() {
                    writeln!(out, "edit cancelled")?;
                }
            }
            "help" | "?" => write!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => bail!("unknown command: {other} (try `help`)"),
        }

        Ok(Flow::Continue)
    }

    fn add<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let (date, start, end, brk) = match *args {
            [date, start, end] => (date, start, end, ""),
            [date, start, end, brk] => (date, start, end, brk),
            _ => bail!("usage: add <date> <start> <end> [break]"),
        };
        let date = if date == NO_DATE { "" } else { date };
        let draft = EntryDraft::new(date, start, end, brk);

        let id = self.store.add(&draft)?;
        if let Some(entry) = self.store.get(id) {
            writeln!(out, "added entry {id}: {}", self.describe(entry))?;
        }
        Ok(())
    }

    fn list<W: Write>(&self, args: &[&str], out: &mut W) -> Result<()> {
        match args {
            [] => write!(out, "{}", format_table(self.store.entries(), self.hours_format))?,
            ["--json"] => writeln!(out, "{}", format_json(&self.store)?)?,
            _ => bail!("usage: list [--json]"),
        }
        Ok(())
    }

    fn edit<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let [id] = args else {
            bail!("usage: edit <id>");
        };
        let id: EntryId = id
            .parse()
            .with_context(|| format!("invalid entry id: {id}"))?;

        if self.slot.begin(&self.store, id) {
            if let Some((_, draft)) = self.slot.current() {
                writeln!(
                    out,
                    "editing entry {id}: {} {}-{} break {}",
                    draft.date, draft.start, draft.end, draft.break_duration
                )?;
            }
        } else {
            writeln!(out, "no entry with id {id}")?;
        }
        Ok(())
    }

    fn set<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let Some((field, value)) = args.split_first() else {
            bail!("usage: set <date|start|end|break> [value]");
        };
        let field: EntryField = field.parse()?;
        let value = value.join(" ");

        if !self.slot.is_editing() {
            bail!("no entry selected; use `edit <id>` first");
        }
        if value.is_empty() {
            writeln!(out, "{field} cleared")?;
        } else {
            writeln!(out, "{field} = {value}")?;
        }
        self.slot.set(field, value);
        Ok(())
    }

    fn save<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(id) = self.slot.save(&mut self.store)? {
            if let Some(entry) = self.store.get(id) {
                writeln!(out, "saved entry {id}: {}", self.describe(entry))?;
            }
        }
        Ok(())
    }

    fn delete<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(entry) = self.slot.delete(&mut self.store) {
            writeln!(out, "deleted entry {}", entry.id)?;
        }
        Ok(())
    }

    fn describe(&self, entry: &WorkEntry) -> String {
        format!(
            "{} worked, {} quarter hours",
            format_hours_as(entry.hours_worked(), self.hours_format),
            entry.quarter_hours_worked()
        )
    }
}

/// Runs the command loop until `quit` or end of input.
///
/// With `prompt` set, a prompt is written before each line is read.
pub fn run<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    config: &Config,
    prompt: bool,
) -> Result<()> {
    let mut session = Session::new(config);
    let mut buf = Vec::new();

    loop {
        if prompt {
            write!(writer, "wh> ")?;
            writer.flush()?;
        }

        buf.clear();
        if reader
            .read_until(b'\n', &mut buf)
            .context("failed to read command")?
            == 0
        {
            break;
        }

        // A line that is not UTF-8 is a bad command, not a broken stream.
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "command is not valid UTF-8");
                writeln!(writer, "error: command is not valid UTF-8: {e}")?;
                continue;
            }
        };

        match session.execute(line, writer) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::warn!(command = %line.trim(), error = %e, "command failed");
                writeln!(writer, "error: {e:#}")?;
            }
        }
    }

    tracing::debug!(entries = session.store().len(), "session ended");
    Ok(())
}
