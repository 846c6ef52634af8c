//! `slots` CLI — compute bookable appointment slots from a JSON schedule dataset.
//!
//! ## Usage
//!
//! ```sh
//! # Hour-long slots for prov1 on a Monday (dataset on stdin)
//! cat schedule.json | slots compute --provider prov1 --date 2024-08-05
//!
//! # Explicit slot length, dataset from file, response to file
//! slots compute -i schedule.json -o slots.json --provider prov1 --date 2024-08-05 --duration 30
//!
//! # Slot length from service type, or from a user's booking history
//! slots compute -i schedule.json --provider prov1 --date 2024-08-05 --service-type quick_checkup
//! slots compute -i schedule.json --provider prov1 --date 2024-08-05 --user user123 --profiles users.json
//!
//! # Report rules whose times do not parse
//! slots check -i schedule.json
//! ```
//!
//! Log output goes to stderr. Set `SLOTS_LOG` (e.g. `SLOTS_LOG=slot_engine=debug`)
//! or pass `-v`/`-vv` to see it.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use slot_engine::duration::FixedDefault;
use slot_engine::query::provider_availability_with_duration;
use slot_engine::{provider_availability, AvailabilityQuery, HistorySuggester, ScheduleData};
use std::io::{self, Read};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "Appointment slot calculator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the available slots for a provider on a date
    Compute {
        /// Schedule dataset (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Provider to look up
        #[arg(long)]
        provider: String,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Slot length in minutes; skips duration resolution
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["service_type", "user"])]
        duration: Option<i64>,
        /// Service type used to pick the slot length
        #[arg(long)]
        service_type: Option<String>,
        /// User whose booking history picks the slot length
        #[arg(long)]
        user: Option<String>,
        /// User profiles JSON for history-based slot lengths
        #[arg(long, requires = "user")]
        profiles: Option<String>,
    },
    /// Validate the time fields of every rule in a dataset
    Check {
        /// Schedule dataset (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compute {
            input,
            output,
            provider,
            date,
            duration,
            service_type,
            user,
            profiles,
        } => {
            let data = load_schedule(input.as_deref())?;

            let response = match duration {
                Some(minutes) => provider_availability_with_duration(&provider, date, &data, minutes),
                None => {
                    let query = AvailabilityQuery {
                        target_date: date,
                        service_type,
                        user_id: user,
                    };
                    match profiles {
                        Some(path) => {
                            let suggester = load_profiles(&path)?;
                            provider_availability(&provider, &query, &data, &suggester)
                        }
                        None => provider_availability(&provider, &query, &data, &FixedDefault),
                    }
                }
            }
            .with_context(|| format!("Failed to compute slots for provider '{}'", provider))?;

            let pretty = serde_json::to_string_pretty(&response)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Check { input } => {
            let data = load_schedule(input.as_deref())?;

            let problems: Vec<String> = data
                .rules
                .iter()
                .enumerate()
                .filter_map(|(i, rule)| {
                    rule.times()
                        .err()
                        .map(|e| format!("rule #{} ({}): {}", i, rule.provider_id, e))
                })
                .collect();

            if problems.is_empty() {
                println!("ok: {} rules", data.rules.len());
            } else {
                for line in &problems {
                    println!("{}", line);
                }
                process::exit(1);
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `SLOTS_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("SLOTS_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_schedule(path: Option<&str>) -> Result<ScheduleData> {
    let json = read_input(path)?;
    let data = ScheduleData::from_json(&json).context("Failed to parse schedule dataset")?;
    tracing::info!(
        rules = data.rules.len(),
        appointments = data.appointments.len(),
        time_offs = data.time_offs.len(),
        "loaded schedule dataset"
    );
    Ok(data)
}

fn load_profiles(path: &str) -> Result<HistorySuggester> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))?;
    serde_json::from_str(&json).context("Failed to parse user profiles")
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
