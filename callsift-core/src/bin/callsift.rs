//! callsift - extract structured records from sales-call transcripts.
//!
//! ## Usage
//!
//! ```bash
//! # One transcript, JSON record on stdout
//! callsift call.txt
//!
//! # Bulk mode: JSON array, one record per file, in argument order
//! callsift calls/*.txt
//!
//! # Flat CSV, earliest mention of each category wins
//! callsift --format csv --policy first call.txt
//!
//! # Read from stdin, extra patterns from a config file
//! cat call.txt | callsift --config callsift.toml
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=callsift_core=debug`).

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use callsift_core::export::{batch_to_json_pretty, to_json_pretty, write_csv, write_csv_batch};
use callsift_core::{Engine, EngineConfig, Record, ResolutionPolicy};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Extract customer requirements, company policies and objections from
/// plain-text call transcripts.
#[derive(Debug, Parser)]
#[command(name = "callsift")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Transcript files; reads stdin when none are given
    files: Vec<PathBuf>,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Override the configured resolution policy
    #[arg(short, long, value_enum)]
    policy: Option<Policy>,

    /// Match against the raw text without collapsing whitespace
    #[arg(long)]
    no_normalize: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Last match in the transcript wins
    Last,
    /// First match in the transcript wins
    First,
}

impl From<Policy> for ResolutionPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Last => ResolutionPolicy::LastMatchWins,
            Policy::First => ResolutionPolicy::FirstMatchWins,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(policy) = cli.policy {
        config.resolution = policy.into();
    }
    if cli.no_normalize {
        config.normalize_input = false;
    }

    let engine = Engine::from_config(&config).context("failed to build engine")?;
    let stdout = io::stdout();

    if cli.files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        let record = engine.extract_information(&text)?;
        return emit_single(cli.format, &record, stdout.lock());
    }

    let texts = cli
        .files
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let records = engine
        .extract_batch(&texts)
        .into_iter()
        .zip(&cli.files)
        .map(|(result, path)| result.with_context(|| format!("failed to extract {}", path.display())))
        .collect::<Result<Vec<Record>>>()?;

    info!(files = records.len(), "extraction complete");

    if let [record] = records.as_slice() {
        return emit_single(cli.format, record, stdout.lock());
    }

    let mut out = stdout.lock();
    match cli.format {
        Format::Json => writeln!(out, "{}", batch_to_json_pretty(&records)?)?,
        Format::Csv => {
            let labels: Vec<String> = cli.files.iter().map(|p| p.display().to_string()).collect();
            let rows: Vec<(&str, &Record)> = labels
                .iter()
                .map(String::as_str)
                .zip(records.iter())
                .collect();
            write_csv_batch(&mut out, &rows)?;
        }
    }
    Ok(())
}

fn emit_single(format: Format, record: &Record, mut out: impl Write) -> Result<()> {
    match format {
        Format::Json => writeln!(out, "{}", to_json_pretty(record)?)?,
        Format::Csv => write_csv(&mut out, record)?,
    }
    Ok(())
}
