//! noise-checker - household noise measurement analysis CLI
//!
//! # Usage
//!
//! ```bash
//! # Classify a single reading
//! noise-checker classify 63.5
//!
//! # Compare a reading with the environmental standard
//! noise-checker compare 50 --at 2024-01-01T23:00 --zone residential
//!
//! # Full report for a recorded session
//! noise-checker report session.json
//!
//! # Keep sessions in the local store
//! noise-checker store save session.json
//! noise-checker store list --limit 5
//! noise-checker store list --from 2024-06-01T00:00 --to 2024-06-30T23:59 --min-db 60
//! ```
//!
//! # Environment Variables
//!
//! - `NOISE_CHECKER_CONFIG`: Path to a TOML config file
//! - `NOISE_CHECKER_STORE`: Session store directory
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use tracing::{debug, info};

use noise_checker::analysis::{
    classify, compare_with_standard_str, compute_statistics, estimate_sound_sources,
    generate_report_summary, hourly_distribution, level_distribution, summarize_history,
};
use noise_checker::config::NoiseCheckerConfig;
use noise_checker::history_storage::SessionStore;
use noise_checker::text_report::render_text_report;
use noise_checker::types::{parse_timestamp, MeasurementSession, NoiseLevel, TimeOfDay};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "noise-checker")]
#[command(about = "Noise measurement analysis: levels, standards, statistics and reports")]
#[command(version)]
struct CliArgs {
    /// Config file (overrides NOISE_CHECKER_CONFIG and ./noise_checker.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Session store directory (overrides storage.path)
    #[arg(long, global = true, env = "NOISE_CHECKER_STORE", value_name = "PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Classify a decibel reading into a noise level band
    Classify {
        #[arg(allow_negative_numbers = true)]
        db: f64,
    },

    /// Compare a reading with the environmental standard
    Compare {
        #[arg(allow_negative_numbers = true)]
        db: f64,
        /// Local time of the reading (RFC 3339 or YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        at: String,
        /// residential or commercial (default: site.zone_type from config)
        #[arg(long)]
        zone: Option<String>,
    },

    /// Descriptive statistics over readings
    Stats {
        #[arg(num_args = 1.., allow_negative_numbers = true)]
        readings: Vec<f64>,
    },

    /// Probable sound sources for a peak reading
    Sources {
        #[arg(allow_negative_numbers = true)]
        db: f64,
        /// day or night
        #[arg(long)]
        time_of_day: String,
    },

    /// Report for a session JSON file
    Report {
        session: PathBuf,
        /// Print the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage the local session store
    #[command(subcommand)]
    Store(StoreCommand),
}

#[derive(clap::Subcommand, Debug)]
enum StoreCommand {
    /// Save a session JSON file
    Save { session: PathBuf },
    /// List sessions, newest first
    List {
        /// Default: storage.recent_limit from config
        #[arg(long)]
        limit: Option<usize>,
        /// Only sessions started at or after this time
        #[arg(long, value_parser = parse_timestamp)]
        from: Option<NaiveDateTime>,
        /// Only sessions started at or before this time
        #[arg(long, value_parser = parse_timestamp)]
        to: Option<NaiveDateTime>,
        /// Only sessions whose peak is at least this level (dB)
        #[arg(long, allow_negative_numbers = true)]
        min_db: Option<f64>,
        /// Only sessions whose peak is at most this level (dB)
        #[arg(long, allow_negative_numbers = true)]
        max_db: Option<f64>,
    },
    /// Print the report for a stored session
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored session
    Delete { id: String },
    /// Delete every stored session
    Clear,
    /// Aggregates across all stored sessions
    Summary,
}

// ============================================================================
// Helpers
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<NoiseCheckerConfig> {
    match path {
        Some(p) => NoiseCheckerConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(NoiseCheckerConfig::load()),
    }
}

fn read_session(path: &Path) -> Result<MeasurementSession> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut session: MeasurementSession = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid session JSON in {}", path.display()))?;
    session
        .validate()
        .with_context(|| format!("Invalid session in {}", path.display()))?;
    if session.id.is_empty() {
        session.id = noise_checker::types::default_session_id(&session.start_time);
    }
    debug!(id = %session.id, readings = session.readings.len(), "Session loaded");
    Ok(session)
}

fn print_report(session: &MeasurementSession, json: bool) -> Result<()> {
    let summary = generate_report_summary(session);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let now = chrono::Local::now().naive_local();
        print!("{}", render_text_report(session, &summary, &now));
    }
    Ok(())
}

fn open_store(args_store: Option<&Path>, config: &NoiseCheckerConfig) -> Result<SessionStore> {
    let path = args_store
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.storage.path));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let store = SessionStore::open(&path)
        .with_context(|| format!("Failed to open session store at {}", path.display()))?;
    info!(path = %path.display(), sessions = store.count(), "Session store opened");
    Ok(store)
}

// ============================================================================
// Store Subcommands
// ============================================================================

fn run_store(command: StoreCommand, store: &SessionStore, config: &NoiseCheckerConfig) -> Result<()> {
    match command {
        StoreCommand::Save { session } => {
            let session = read_session(&session)?;
            store.save(&session).context("Failed to save session")?;
            println!("Saved {}", session.id);
        }
        StoreCommand::List { limit, from, to, min_db, max_db } => {
            let limit = limit.unwrap_or(config.storage.recent_limit);
            let peak_filter = min_db.is_some() || max_db.is_some();
            let (min_db, max_db) = (min_db.unwrap_or(f64::NEG_INFINITY), max_db.unwrap_or(f64::INFINITY));

            let mut sessions = if from.is_some() || to.is_some() {
                let mut in_window = store.range(
                    &from.unwrap_or(NaiveDateTime::MIN),
                    &to.unwrap_or(NaiveDateTime::MAX),
                )?;
                in_window.retain(|s| s.peak_within(min_db, max_db));
                in_window
            } else if peak_filter {
                store.by_peak_range(min_db, max_db)?
            } else {
                store.list_recent(limit)?
            };
            sessions.truncate(limit);

            for session in sessions {
                let band = classify(session.max_db());
                println!(
                    "{}  {}  peak {:>5.1} dB  avg {:>5.1} dB  {} {}",
                    session.id,
                    session.start_time.format("%Y-%m-%d %H:%M"),
                    session.max_db(),
                    session.avg_db(),
                    band.icon,
                    band.label
                );
            }
        }
        StoreCommand::Show { id, json } => {
            let session = store
                .get(&id)?
                .with_context(|| format!("No stored session with id '{id}'"))?;
            print_report(&session, json)?;
        }
        StoreCommand::Delete { id } => {
            if store.delete(&id)? {
                println!("Deleted {id}");
            } else {
                anyhow::bail!("No stored session with id '{id}'");
            }
        }
        StoreCommand::Clear => {
            let count = store.count();
            store.clear()?;
            println!("Deleted {count} session(s)");
        }
        StoreCommand::Summary => {
            let sessions = store.all()?;
            let stats = summarize_history(&sessions);
            println!("Sessions:      {}", stats.total);
            println!("Average level: {:.1} dB", stats.average_db);
            println!("Highest peak:  {:.1} dB", stats.max_db);
            println!("Noise events:  {}", stats.noise_count);
            if let Some(id) = &stats.last_measurement_id {
                println!("Last:          {id}");
            }

            let levels = level_distribution(&sessions);
            println!();
            for level in NoiseLevel::ALL {
                let band = level.band();
                println!("{} {:<15} {}", band.icon, band.label, levels.count(level));
            }

            let hourly = hourly_distribution(&sessions);
            if !hourly.is_empty() {
                println!();
                for bucket in hourly {
                    println!(
                        "{:02}:00  {:>3} session(s)  avg {:.1} dB",
                        bucket.hour, bucket.count, bucket.average_db
                    );
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        SubCommand::Classify { db } => {
            let band = classify(db);
            println!("{} {} ({:.1} dB)", band.icon, band.label, db);
            println!("{}", band.description);
            println!("{}", band.action);
        }
        SubCommand::Compare { db, at, zone } => {
            let zone = zone.unwrap_or_else(|| config.site.zone_type.to_string());
            let result = compare_with_standard_str(db, &at, &zone)?;
            println!("{}: {} dB ({})", result.standard_label, result.standard_db, result.zone_type);
            println!("{}", result.message);
        }
        SubCommand::Stats { readings } => {
            let stats = compute_statistics(&readings);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        SubCommand::Sources { db, time_of_day } => {
            let time_of_day: TimeOfDay = time_of_day.parse()?;
            let sources = estimate_sound_sources(db, time_of_day);
            if sources.is_empty() {
                println!("No probable source at {db:.1} dB");
            }
            for source in sources {
                println!(
                    "{} {} ({:.0}%): {}",
                    source.icon,
                    source.label,
                    source.confidence * 100.0,
                    source.description
                );
            }
        }
        SubCommand::Report { session, json } => {
            let mut session = read_session(&session)?;
            if session.address.is_none() && !config.site.address.is_empty() {
                session.address = Some(config.site.address.clone());
            }
            if session.room_number.is_none() && !config.site.room_number.is_empty() {
                session.room_number = Some(config.site.room_number.clone());
            }
            print_report(&session, json)?;
        }
        SubCommand::Store(command) => {
            let store = open_store(args.store.as_deref(), &config)?;
            run_store(command, &store, &config)?;
        }
    }

    Ok(())
}
