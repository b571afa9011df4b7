use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use configuration::{Config, LogLevel, load_config};
use csv_data::CsvSeriesSource;
use dashboard::{DashboardSnapshot, format_number, metric_rows};
use sample_data::RandomWalkGenerator;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

/// The main entry point for the Tickerscope dashboard backend.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Summary(args) => handle_summary(args, config),
        Commands::Export(args) => handle_export(args, config),
        Commands::Serve(args) => handle_serve(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Metrics backend for a single-symbol stock analysis dashboard.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Defaults to ./config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity when RUST_LOG is not set.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a series and print its metric cards.
    Summary(SeriesArgs),
    /// Load a series and write the full dashboard snapshot as JSON.
    Export(ExportArgs),
    /// Serve dashboard snapshots over HTTP.
    Serve(ServeArgs),
}

#[derive(Args)]
struct SeriesArgs {
    /// Seed for the random walk; overrides the configured seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Summarise a Date,Close CSV export instead of a generated series.
    #[arg(long, conflicts_with = "seed")]
    csv: Option<PathBuf>,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    series: SeriesArgs,

    /// Output file. Writes to stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ServeArgs {
    /// Listen address (e.g. 0.0.0.0:3000); overrides the configured host and port.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Builds one snapshot, the equivalent of a single dashboard page load.
fn build_snapshot(args: &SeriesArgs, config: &Config) -> anyhow::Result<DashboardSnapshot> {
    let edges = &config.dashboard.histogram_edges;

    if let Some(path) = args.csv.as_ref().or(config.data.csv_path.as_ref()) {
        let snapshot = DashboardSnapshot::build(&mut CsvSeriesSource::new(path), edges)
            .with_context(|| format!("Failed to summarise {}", path.display()))?;
        return Ok(snapshot);
    }

    let mut settings = config.sample_data.clone();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let mut generator = RandomWalkGenerator::new(settings)?;
    let snapshot = DashboardSnapshot::build(&mut generator, edges)?;
    Ok(snapshot)
}

fn handle_summary(args: SeriesArgs, config: Config) -> anyhow::Result<()> {
    let snapshot = build_snapshot(&args, &config)?;

    if let (Some(first), Some(last)) = (snapshot.series.first(), snapshot.series.last()) {
        println!(
            "{} trading days, {} to {} (last close {:.2})",
            snapshot.series.len(),
            first.date,
            last.date,
            last.close
        );
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    for row in metric_rows(&snapshot.metrics) {
        table.add_row(vec![Cell::new(row.label), Cell::new(row.value)]);
    }
    println!("{table}");

    let mut histogram = Table::new();
    histogram.load_preset(UTF8_FULL).set_header(vec!["Daily Return", "Days"]);
    for bin in &snapshot.returns_histogram.bins {
        histogram.add_row(vec![Cell::new(bin.label()), Cell::new(bin.count)]);
    }
    if snapshot.returns_histogram.out_of_range > 0 {
        histogram.add_row(vec![
            Cell::new("outside bins"),
            Cell::new(snapshot.returns_histogram.out_of_range),
        ]);
    }
    println!("{histogram}");

    let indicators = &snapshot.indicators;
    let mut latest = Table::new();
    latest.load_preset(UTF8_FULL).set_header(vec!["Indicator", "Latest"]);
    latest.add_row(vec![
        Cell::new("RSI (14)"),
        Cell::new(format_number(indicators.latest_rsi())),
    ]);
    if let Some(point) = indicators.macd.last() {
        latest.add_row(vec![Cell::new("MACD (12, 26)"), Cell::new(format_number(Some(point.macd)))]);
        latest.add_row(vec![Cell::new("MACD signal (9)"), Cell::new(format_number(Some(point.signal)))]);
    }
    if let Some(band) = indicators.bollinger.last().copied().flatten() {
        latest.add_row(vec![
            Cell::new("Bollinger (20, 2σ)"),
            Cell::new(format!("{:.2} to {:.2}", band.lower, band.upper)),
        ]);
    }
    println!("{latest}");

    Ok(())
}

fn handle_export(args: ExportArgs, config: Config) -> anyhow::Result<()> {
    let snapshot = build_snapshot(&args.series, &config)?;
    let json = serde_json::to_string_pretty(&snapshot)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
            info!(path = %path.display(), "Snapshot exported.");
        }
        None => println!("{json}"),
    }

    Ok(())
}

async fn handle_serve(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(addr) = args.addr {
        config.server.host = addr.ip().to_string();
        config.server.port = addr.port();
    }
    web_server::run_server(config).await
}
