use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wh_cli::commands::{calc, session};
use wh_cli::{Cli, Commands, Config};

/// Load config, applying an explicit config file if one was given.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never interleave with command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Calc {
            start,
            end,
            break_duration,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            calc::run(
                &mut io::stdout().lock(),
                &config,
                start,
                end,
                break_duration.as_deref().unwrap_or_default(),
                *json,
            )?;
        }
        Some(Commands::Session { script }) => {
            let config = load_config(cli.config.as_deref())?;
            let mut stdout = io::stdout().lock();
            if let Some(path) = script {
                let file = File::open(path)
                    .with_context(|| format!("failed to open script {}", path.display()))?;
                session::run(BufReader::new(file), &mut stdout, &config, false)?;
            } else {
                let stdin = io::stdin();
                let prompt = stdin.is_terminal();
                session::run(stdin.lock(), &mut stdout, &config, prompt)?;
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
