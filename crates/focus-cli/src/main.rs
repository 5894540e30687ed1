//! `focus` CLI — free time and focus-window suggestions from the command line.
//!
//! Events are read as a JSON array of objects with `start` and `end`
//! timestamps (any other fields are ignored), from a file or stdin.
//!
//! ## Usage
//!
//! ```sh
//! # Suggest a 90-minute focus block starting from now
//! focus suggest -i events.json --duration 90
//!
//! # Suggest as if it were a given moment, with custom hours
//! focus suggest -i events.json --now 2026-03-02T08:00:00Z \
//!   --start-hour 8 --end-hour 18 --timezone Europe/Berlin
//!
//! # List free intervals inside a window
//! cat events.json | focus free --from 2026-03-02T09:00:00Z --to 2026-03-02T17:00:00Z
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use focus_engine::freebusy::free_minutes;
use focus_engine::{
    compute_free, parse_timestamp, DurationBounds, FocusWindowResolver, Interval, MemoryEventStore,
    WorkHours,
};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "focus",
    version,
    about = "Free time and focus-window suggestions for a calendar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log search details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest a focus window today, or tomorrow if today is full
    Suggest {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Requested length in minutes (clamped to 15-240)
        #[arg(short, long)]
        duration: Option<i64>,
        /// Current time as RFC 3339 (defaults to the system clock)
        #[arg(long)]
        now: Option<String>,
        /// First working hour
        #[arg(long, default_value_t = 9)]
        start_hour: u32,
        /// Hour the working day ends
        #[arg(long, default_value_t = 17)]
        end_hour: u32,
        /// IANA timezone the working hours are in
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// List the free intervals of a window
    Free {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window start (RFC 3339)
        #[arg(long)]
        from: String,
        /// Window end (RFC 3339)
        #[arg(long)]
        to: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Suggest {
            input,
            output,
            duration,
            now,
            start_hour,
            end_hour,
            timezone,
        } => {
            let store = load_events(input.as_deref())?;
            let hours = WorkHours::from_names(start_hour, end_hour, &timezone)
                .context("Invalid working hours")?;
            let now = match now {
                Some(raw) => parse_datetime(&raw)?,
                None => Utc::now(),
            };
            let duration = DurationBounds::default().clamp(duration);

            let resolution = FocusWindowResolver::new(hours)
                .resolve_with(duration, now, |window| Ok(store.events_in(&window.interval)))
                .context("Failed to resolve a focus window")?;

            let body = serde_json::to_string_pretty(&resolution)?;
            write_output(output.as_deref(), &body)?;
        }
        Commands::Free {
            input,
            output,
            from,
            to,
        } => {
            let store = load_events(input.as_deref())?;
            let window = Interval::new(parse_datetime(&from)?, parse_datetime(&to)?)
                .context("--from must be before --to")?;

            let free = compute_free(window, &store.events_in(&window));
            tracing::info!(
                intervals = free.len(),
                minutes = free_minutes(&free),
                "computed free time"
            );

            let body = serde_json::to_string_pretty(&free)?;
            write_output(output.as_deref(), &body)?;
        }
    }

    Ok(())
}

/// Warnings only unless `--verbose` or `RUST_LOG` says otherwise.
fn init_logging(verbose: bool) {
    let default = if verbose { "focus_engine=debug,info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parse RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(s).with_context(|| format!("Invalid datetime: '{}'", s))
}

fn load_events(path: Option<&str>) -> Result<MemoryEventStore> {
    let json = read_input(path)?;
    MemoryEventStore::from_json(&json).context("Failed to parse events JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
