use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cellscan::{
    config::{self, Config},
    model::HEADER,
    report::Report,
    snapshot::Snapshot,
    Scanner,
};

#[derive(Debug, Parser)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan a recorded device snapshot and print the report
    Scan {
        snapshot: PathBuf,

        /// Print the cell lines only
        #[arg(long)]
        csv: bool,
    },
    /// Read a report from stdin and print its cells as JSON lines
    Parse,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Scan { snapshot, csv } => scan(&config, &snapshot, csv)?,
        Command::Parse => parse()?,
    };

    Ok(())
}

fn scan(config: &Config, path: &Path, csv: bool) -> Result<()> {
    let snapshot = Snapshot::load(path)?;
    let location = snapshot.location;

    let scanner = Scanner::with_config(snapshot, config.scanner);
    let collected_at = Utc::now();
    let cells = scanner.scan().context("Scan failed")?;

    if csv {
        println!("{HEADER}");
        for cell in &cells {
            println!("{cell}");
        }
        return Ok(());
    }

    let fix = location.context("Snapshot has no location fix to report")?;
    let report = Report {
        collected_at: config.report.collection_time.then_some(collected_at),
        device_id: scanner.device_identifier(),
        device_time: Utc::now(),
        fix,
        cells,
    };
    info!(device = %report.device_id, cells = report.cells.len(), "report ready");
    println!("{report}");

    Ok(())
}

fn parse() -> Result<()> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read report")?;

    let report: Report = text.parse().context("Failed to parse report")?;
    for cell in &report.cells {
        println!("{}", serde_json::to_string(cell)?);
    }

    Ok(())
}
