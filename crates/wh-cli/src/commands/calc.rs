//! One-shot calculation for a single span.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use wh_core::{BreakDuration, ClockTime, hours_between, quarter_hours};

use crate::Config;
use crate::commands::report::format_hours_as;

#[derive(Debug, Serialize)]
struct CalcResult {
    start_time: ClockTime,
    end_time: ClockTime,
    break_duration: BreakDuration,
    hours_worked: f64,
    quarter_hours_worked: u32,
}

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    start: &str,
    end: &str,
    break_duration: &str,
    json: bool,
) -> Result<()> {
    let start_time: ClockTime = start.parse().context("invalid start time")?;
    let end_time: ClockTime = end.parse().context("invalid end time")?;
    let break_duration: BreakDuration = break_duration
        .parse()
        .context("invalid break duration")?;

    let hours_worked = hours_between(start_time, end_time, break_duration);
    let result = CalcResult {
        start_time,
        end_time,
        break_duration,
        hours_worked,
        quarter_hours_worked: quarter_hours(hours_worked),
    };
    tracing::debug!(?result, "calculated span");

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&result)?)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Hours worked:  {}",
        format_hours_as(result.hours_worked, config.hours_format)
    )?;
    writeln!(writer, "Quarter hours: {}", result.quarter_hours_worked)?;

    Ok(())
}
