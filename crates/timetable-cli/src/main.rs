//! `timetable` CLI — materialize a class calendar from session and
//! reschedule records.
//!
//! ## Usage
//!
//! ```sh
//! # Assemble a timetable (stdin → stdout)
//! timetable assemble --reference 2026-01-04T00:00:00Z < records.json
//!
//! # Assemble from file to file, expanding 2 weeks
//! timetable assemble -i records.json -o calendar.json --weeks 2
//!
//! # Validate records and print a diagnostics summary
//! timetable check -i records.json
//! ```
//!
//! The input document is `{"sessions": [...], "exceptions": [...]}` as
//! produced by the timetable storage API.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::{self, Read};
use std::process;
use timetable_engine::{
    assemble_timetable, CourseSession, RescheduleException, DEFAULT_WINDOW_WEEKS,
};

#[derive(Parser)]
#[command(name = "timetable", version, about = "Weekly timetable materializer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the occurrence calendar and print it as JSON
    Assemble {
        /// Input records file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Number of weeks to expand
        #[arg(long, default_value_t = DEFAULT_WINDOW_WEEKS)]
        weeks: u32,
        /// Reference instant anchoring week 0 (RFC 3339; defaults to now)
        #[arg(long)]
        reference: Option<DateTime<Utc>>,
    },
    /// Validate records and print a diagnostics summary
    Check {
        /// Input records file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Number of weeks to expand
        #[arg(long, default_value_t = DEFAULT_WINDOW_WEEKS)]
        weeks: u32,
        /// Reference instant anchoring week 0 (RFC 3339; defaults to now)
        #[arg(long)]
        reference: Option<DateTime<Utc>>,
    },
}

/// The document shape the storage API hands out.
#[derive(Deserialize)]
struct RecordSet {
    #[serde(default)]
    sessions: Vec<CourseSession>,
    #[serde(default)]
    exceptions: Vec<RescheduleException>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble {
            input,
            output,
            weeks,
            reference,
        } => {
            let records = read_records(input.as_deref())?;
            let reference = reference.unwrap_or_else(Utc::now);
            let timetable =
                assemble_timetable(&records.sessions, &records.exceptions, weeks, reference);

            let pretty = serde_json::to_string_pretty(&timetable)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Check {
            input,
            weeks,
            reference,
        } => {
            let records = read_records(input.as_deref())?;
            let reference = reference.unwrap_or_else(Utc::now);
            let timetable =
                assemble_timetable(&records.sessions, &records.exceptions, weeks, reference);
            let diagnostics = &timetable.diagnostics;

            println!("Occurrences:          {}", timetable.occurrences.len());
            println!(
                "Failed sessions:      {}",
                diagnostics.failed_sessions.len()
            );
            println!(
                "Failed exceptions:    {}",
                diagnostics.failed_exceptions.len()
            );
            println!(
                "Unmatched exceptions: {}",
                diagnostics.unmatched_exceptions.len()
            );
            for failure in &diagnostics.failed_sessions {
                println!("  session {}: {}", failure.id, failure.error);
            }
            for failure in &diagnostics.failed_exceptions {
                println!("  exception {}: {}", failure.id, failure.error);
            }
            for id in &diagnostics.unmatched_exceptions {
                println!("  exception {} matched no original occurrence", id);
            }

            if !diagnostics.failed_sessions.is_empty()
                || !diagnostics.failed_exceptions.is_empty()
            {
                process::exit(1);
            }
        }
    }

    Ok(())
}

fn read_records(path: Option<&str>) -> Result<RecordSet> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse input records as JSON")
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
