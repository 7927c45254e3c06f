//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Work hours calculator.
///
/// Logs daily work sessions and totals the hours worked, rounded up to
/// quarter hours for timesheet billing.
#[derive(Debug, Parser)]
#[command(name = "wh", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute hours worked for a single span.
    Calc {
        /// Start time (HH:MM).
        start: String,

        /// End time (HH:MM).
        end: String,

        /// Break duration (HH:MM). Defaults to no break.
        break_duration: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session for logging entries.
    ///
    /// Reads one command per line. Entries live until the session ends.
    Session {
        /// Read commands from a file instead of stdin.
        #[arg(long)]
        script: Option<PathBuf>,
    },
}
