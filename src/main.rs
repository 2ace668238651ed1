//! Compute a crossover performance report from a JSON file of price records.
//!
//! The file holds either stored OHLCV records or bare `{timestamp, close}` points.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use tickersignal::config::Config;
use tickersignal::models::{price_series, PricePoint, TickerData};
use tickersignal::{compute_performance, logging};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute SMA crossover performance from a JSON price file")]
struct Cli {
    /// JSON array of OHLCV records or `{timestamp, close}` points
    path: PathBuf,

    /// Short moving-average window (defaults to SMA_SHORT_WINDOW or 20)
    #[arg(long)]
    short_window: Option<usize>,

    /// Long moving-average window (defaults to SMA_LONG_WINDOW or 100)
    #[arg(long)]
    long_window: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceFile {
    Records(Vec<TickerData>),
    Points(Vec<PricePoint>),
}

impl PriceFile {
    fn into_series(self) -> Vec<PricePoint> {
        match self {
            PriceFile::Records(records) => price_series(&records),
            PriceFile::Points(points) => points,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let params = Config::from_env()
        .crossover
        .with_overrides(cli.short_window, cli.long_window);

    let file: PriceFile = serde_json::from_str(&fs::read_to_string(&cli.path)?)?;
    let series = file.into_series();
    info!(
        path = %cli.path.display(),
        len = series.len(),
        short_window = params.short_window,
        long_window = params.long_window,
        "Computing crossover performance"
    );

    let report = compute_performance(&series, &params)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
