//! `bizcal`: business calendar arithmetic from the command line.
//!
//! Every subcommand prints a JSON document on stdout. The calendar comes from
//! `--config <file.json>` (see `bizcal show-config` for the shape) or defaults to
//! Mon-Fri 09:00-17:00 with no holidays.

mod logger;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use business_time::{
    business_time_between, check_business_time, shift_business_time, CalendarConfig,
};
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "bizcal", version, about = "Business calendar arithmetic")]
struct Cli {
    /// Calendar configuration (JSON: schedule, holidays, max_lookahead_days)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a datetime and show the surrounding business time
    Check {
        /// Datetime, e.g. 2021-02-08T09:00:00
        datetime: String,
    },
    /// Add business minutes, hours or days
    Add {
        datetime: String,
        amount: u32,
        /// minute(s), hour(s) or day(s)
        unit: String,
    },
    /// Subtract business minutes, hours or days
    Subtract {
        datetime: String,
        amount: u32,
        /// minute(s), hour(s) or day(s)
        unit: String,
    },
    /// Elapsed business time between two datetimes
    Diff {
        start: String,
        end: String,
        /// minute(s), hour(s) or day(s)
        #[arg(short, long, default_value = "minutes")]
        unit: String,
    },
    /// Print the effective calendar configuration (the default without --config)
    ShowConfig,
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match run(&cli) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Value> {
    let config = load_config(cli.config.as_deref())?;

    let value = match &cli.command {
        Command::Check { datetime } => {
            serde_json::to_value(check_business_time(datetime, &config)?)?
        }
        Command::Add {
            datetime,
            amount,
            unit,
        } => serde_json::to_value(shift_business_time(
            datetime,
            i64::from(*amount),
            unit,
            &config,
        )?)?,
        Command::Subtract {
            datetime,
            amount,
            unit,
        } => serde_json::to_value(shift_business_time(
            datetime,
            -i64::from(*amount),
            unit,
            &config,
        )?)?,
        Command::Diff { start, end, unit } => {
            serde_json::to_value(business_time_between(start, end, unit, &config)?)?
        }
        Command::ShowConfig => serde_json::to_value(&config)?,
    };

    Ok(value)
}

fn load_config(path: Option<&Path>) -> Result<CalendarConfig> {
    match path {
        Some(path) => {
            let config = CalendarConfig::from_path(path)
                .with_context(|| format!("loading calendar from {}", path.display()))?;
            tracing::debug!(
                path = %path.display(),
                holidays = config.holidays().len(),
                "loaded calendar config"
            );
            Ok(config)
        }
        None => Ok(CalendarConfig::default()),
    }
}
