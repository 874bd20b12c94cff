//! `slotfind` CLI — earliest-fit appointment slot search from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Find a slot for an empty calendar (stdin → stdout)
//! echo '[]' | slotfind find --date 2026-03-16
//!
//! # Find a 1-hour slot from a calendar file
//! slotfind find -i calendar.json --duration 1.0
//!
//! # Custom lunch window and buffer
//! slotfind find -i calendar.json --lunch 11:30-12:30 --buffer 30
//!
//! # Inspect the merged blocked intervals the search runs against
//! slotfind busy -i calendar.json
//! ```
//!
//! Input is a JSON array of events with RFC 3339 `start`/`end` and an
//! optional `name`. Output is a single JSON object: the found slot, or
//! `{"error":"No available slot found"}` when the day is full.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};

use slot_engine::{blocked_intervals, find_slot, normalize, CalendarEvent, Constraints};

#[derive(Parser)]
#[command(
    name = "slotfind",
    version,
    about = "Deterministic earliest-fit appointment slot search"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the earliest slot that satisfies the constraints
    Find {
        /// Input calendar JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
    /// Show the merged blocked intervals for the day
    Busy {
        /// Input calendar JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
}

#[derive(Args)]
struct ConstraintArgs {
    /// Requested duration in hours (may be fractional)
    #[arg(long, default_value_t = 1.5)]
    duration: f64,

    /// IANA timezone the search runs in
    #[arg(long, default_value = "America/New_York")]
    timezone: String,

    /// Lunch blackout window as "HH:MM-HH:MM"
    #[arg(long, default_value = "12:00-13:00")]
    lunch: String,

    /// Minimum minutes between the slot and existing events
    #[arg(long, default_value_t = 15)]
    buffer: u32,

    /// First hour of the working day
    #[arg(long, default_value_t = 8)]
    work_start: u32,

    /// Hour the working day ends
    #[arg(long, default_value_t = 17)]
    work_end: u32,

    /// Reference date (YYYY-MM-DD) used when the calendar is empty;
    /// defaults to today in the target timezone
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl ConstraintArgs {
    fn to_constraints(&self) -> Result<Constraints> {
        let (lunch_start, lunch_end) = self
            .lunch
            .split_once('-')
            .with_context(|| format!("Invalid --lunch '{}': expected HH:MM-HH:MM", self.lunch))?;

        Ok(Constraints {
            timezone: self.timezone.clone(),
            duration_hours: self.duration,
            lunch_start: lunch_start.trim().to_string(),
            lunch_end: lunch_end.trim().to_string(),
            work_start_hour: self.work_start,
            work_end_hour: self.work_end,
            buffer_minutes: self.buffer,
        })
    }

    /// The fallback reference date: --date if given, otherwise today in the
    /// target timezone.
    fn fallback_date(&self, constraints: &Constraints) -> Result<NaiveDate> {
        match self.date {
            Some(date) => Ok(date),
            None => {
                let tz = constraints.tz()?;
                Ok(Utc::now().with_timezone(&tz).date_naive())
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Find {
            input,
            output,
            constraints,
        } => {
            let events = read_events(input.as_deref())?;
            let c = constraints.to_constraints()?;
            c.validate().context("Invalid constraints")?;
            let date = constraints.fallback_date(&c)?;

            let schedule = normalize(&events, &c.timezone, date)?;
            let result = find_slot(&schedule, &c)?;

            let json = serde_json::to_string(&result)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Busy {
            input,
            output,
            constraints,
        } => {
            let events = read_events(input.as_deref())?;
            let c = constraints.to_constraints()?;
            c.validate().context("Invalid constraints")?;
            let date = constraints.fallback_date(&c)?;

            let schedule = normalize(&events, &c.timezone, date)?;
            let blocked = blocked_intervals(&schedule, &c)?;

            let intervals: Vec<serde_json::Value> = blocked
                .iter()
                .map(|&(start, end)| {
                    serde_json::json!({
                        "start": start.format("%H:%M").to_string(),
                        "end": end.format("%H:%M").to_string(),
                    })
                })
                .collect();
            let json = serde_json::to_string(&serde_json::json!({
                "date": schedule.date,
                "blocked": intervals,
            }))?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

/// Read and parse the event list from a file or stdin.
fn read_events(path: Option<&str>) -> Result<Vec<CalendarEvent>> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse calendar JSON")
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
