//! Confstats - bucketed activity durations from the command line
//!
//! Reads an analytics query (JSON) from a file or stdin and prints the
//! per-bucket duration report.

use anyhow::{Context, Result};
use confstats::{AnalyticsQuery, AppConfig, DurationUnit};
use std::io;
use std::path::PathBuf;
use tracing::error;

fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("confstats=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut query_path: Option<PathBuf> = None;
    let mut force_seconds = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("confstats {}", confstats::VERSION);
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--secs" | "-s" => {
                force_seconds = true;
            }
            "--config" | "-c" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires a path");
                    return Ok(());
                }
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
                continue;
            }
            "-" => query_path = None,
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                return Ok(());
            }
            _ => {
                if query_path.is_none() {
                    query_path = Some(PathBuf::from(&args[i]));
                }
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => AppConfig::load_from(&path)?,
        None => AppConfig::load(),
    };
    if force_seconds {
        config.unit = DurationUnit::Seconds;
    }

    let query = match query_path {
        Some(path) => AnalyticsQuery::load(&path)?,
        None => AnalyticsQuery::from_reader(io::stdin().lock())?,
    };

    let report = match query.run(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("Query rejected: {:#}", e);
            return Err(e);
        }
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{}", json);

    Ok(())
}

fn print_help() {
    println!("Usage: confstats [OPTIONS] [QUERY_FILE]");
    println!();
    println!("Options:");
    println!("  -c, --config PATH   Read settings from PATH instead of the default config");
    println!("  -s, --secs          Report durations in seconds");
    println!("  -v, --version       Show version");
    println!("  -h, --help          Show this help");
    println!();
    println!("Examples:");
    println!("  confstats query.json");
    println!("  cat query.json | confstats --secs");
    println!();
    println!("Without QUERY_FILE (or with -), the query is read from stdin.");
}
