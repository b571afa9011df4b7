use crate::error::CsvDataError;
use chrono::NaiveDate;
use core_types::{Observation, SeriesSource};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One line of a daily price export. Only `Date` and `Close` are required;
/// columns such as `Open` or `Adj Close` are ignored.
#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "Date", alias = "date")]
    date: NaiveDate,
    #[serde(rename = "Close", alias = "close")]
    close: f64,
    #[serde(rename = "High", alias = "high", default)]
    high: Option<f64>,
    #[serde(rename = "Low", alias = "low", default)]
    low: Option<f64>,
    #[serde(rename = "Volume", alias = "volume", default)]
    volume: Option<f64>,
}

/// Replays a price history stored in a local CSV file.
///
/// The file is re-read on every `load_series` call, so edits show up on the
/// next page load.
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    path: PathBuf,
}

impl CsvSeriesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Vec<Observation>, CsvDataError> {
        let file = File::open(&self.path).map_err(|source| CsvDataError::Open {
            path: self.path.clone(),
            source,
        })?;
        let series = observations_from_reader(file)?;
        info!(path = %self.path.display(), days = series.len(), "Price history loaded.");
        Ok(series)
    }
}

impl SeriesSource for CsvSeriesSource {
    type Error = CsvDataError;

    fn load_series(&mut self) -> Result<Vec<Observation>, Self::Error> {
        self.read()
    }
}

/// Parses a `Date,Close[,High,Low,Volume]` export into observations, oldest first.
///
/// Rows are sorted by date; duplicate dates are left for the metrics engine to
/// reject. `daily_return` is the close-to-close change in percent, 0 on the
/// first row. `volume_ratio` is each volume over the file's mean volume, or 1
/// for every row when any row lacks a positive volume.
pub fn observations_from_reader<R: Read>(reader: R) -> Result<Vec<Observation>, CsvDataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<PriceRow>().enumerate() {
        let row = result?;
        check_row(index + 1, &row)?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(CsvDataError::Empty);
    }
    rows.sort_by_key(|r| r.date);

    let volume_ratios = volume_ratios(&rows);
    let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();

    let series = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let daily_return = match i {
                0 => 0.0,
                _ => (row.close / closes[i - 1] - 1.0) * 100.0,
            };
            let (daily_range_pct, price_position) = intraday(row);

            Observation {
                date: row.date,
                close: row.close,
                daily_return,
                volatility: daily_return.abs(),
                volume_ratio: volume_ratios[i],
                ma20: trailing_mean(&closes, i, 20),
                ma50: trailing_mean(&closes, i, 50),
                daily_range_pct,
                price_position,
            }
        })
        .collect();

    Ok(series)
}

fn check_row(row_number: usize, row: &PriceRow) -> Result<(), CsvDataError> {
    if !row.close.is_finite() || row.close <= 0.0 {
        return Err(CsvDataError::InvalidRow(
            row_number,
            format!("close must be a positive number, got {}", row.close),
        ));
    }
    match (row.high, row.low) {
        (Some(high), Some(low)) if low > high => Err(CsvDataError::InvalidRow(
            row_number,
            format!("low {low} is above high {high}"),
        )),
        _ => Ok(()),
    }
}

fn volume_ratios(rows: &[PriceRow]) -> Vec<f64> {
    let volumes: Option<Vec<f64>> = rows
        .iter()
        .map(|r| r.volume.filter(|v| v.is_finite() && *v > 0.0))
        .collect();

    match volumes {
        Some(volumes) => {
            let mean = volumes.iter().sum::<f64>() / volumes.len() as f64;
            volumes.iter().map(|v| v / mean).collect()
        }
        None => {
            warn!("Volume column missing or incomplete; every volume ratio set to 1.");
            vec![1.0; rows.len()]
        }
    }
}

/// Day range as a percent of the close, and where the close sits in it.
fn intraday(row: &PriceRow) -> (f64, f64) {
    match (row.high, row.low) {
        (Some(high), Some(low)) if high > low => (
            (high - low) / row.close * 100.0,
            ((row.close - low) / (high - low) * 100.0).clamp(0.0, 100.0),
        ),
        _ => (0.0, 50.0),
    }
}

/// Mean of up to `window` closes ending at `i`; shorter at the start of the file.
fn trailing_mean(closes: &[f64], i: usize, window: usize) -> f64 {
    let start = (i + 1).saturating_sub(window);
    let slice = &closes[start..=i];
    slice.iter().sum::<f64>() / slice.len() as f64
}
