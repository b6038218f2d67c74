use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod aggregates;
mod bands;
mod category;
mod error;
mod models;
mod ranking;
mod report;
mod roster;
mod stats;

#[derive(Parser)]
#[command(name = "school-stats")]
#[command(
    about = "Grade statistics (subjects, populations, classes, mentions) as JSON",
    long_about = None
)]
struct Cli {
    /// CSV export of the sheet, or a directory of per-sheet CSV exports
    source: PathBuf,
    /// Sheet to read (defaults to PremièreTrimestre)
    #[arg(long, env = "SCHOOL_STATS_SHEET")]
    sheet: Option<String>,
    /// Write the JSON document here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Indent the JSON document
    #[arg(long)]
    pretty: bool,
    /// Log debug details to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let students = roster::load(&cli.source, cli.sheet.as_deref())
        .with_context(|| format!("failed to load roster from {}", cli.source.display()))?;

    let json = report::render(&students, cli.pretty).context("failed to serialize statistics")?;

    match cli.out {
        Some(out) => {
            std::fs::write(&out, json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "statistics written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
