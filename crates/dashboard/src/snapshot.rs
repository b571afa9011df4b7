use crate::error::DashboardError;
use analytics::{MetricsEngine, MetricsSummary, ReturnHistogram, TechnicalIndicators};
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{Observation, SeriesSource};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A point of the volume/return scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub date: NaiveDate,
    pub volume_ratio: f64,
    pub daily_return: f64,
}

/// Everything the dashboard renders for one page load.
///
/// The series is passed through untouched for the price charts; the metrics,
/// histogram and scatter points are all derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub series: Vec<Observation>,
    pub metrics: MetricsSummary,
    pub returns_histogram: ReturnHistogram,
    pub scatter: Vec<ScatterPoint>,
    /// RSI, MACD and Bollinger overlays of the closing price.
    pub indicators: TechnicalIndicators,
}

impl DashboardSnapshot {
    /// Loads one series from `source` and derives the full snapshot from it.
    pub fn build<S>(source: &mut S, histogram_edges: &[f64]) -> Result<Self, DashboardError>
    where
        S: SeriesSource,
    {
        let series = source
            .load_series()
            .map_err(|e| DashboardError::Source(Box::new(e)))?;
        Self::from_series(series, histogram_edges)
    }

    /// Derives a snapshot from an already-loaded series.
    pub fn from_series(
        series: Vec<Observation>,
        histogram_edges: &[f64],
    ) -> Result<Self, DashboardError> {
        let metrics = MetricsEngine::new().calculate(&series)?;
        let returns_histogram = ReturnHistogram::from_series(&series, histogram_edges)?;
        let scatter = series
            .iter()
            .map(|o| ScatterPoint {
                date: o.date,
                volume_ratio: o.volume_ratio,
                daily_return: o.daily_return,
            })
            .collect();
        let closes: Vec<f64> = series.iter().map(|o| o.close).collect();
        let indicators = TechnicalIndicators::from_closes(&closes)?;

        info!(
            observations = series.len(),
            degenerate = metrics.is_degenerate(),
            "Dashboard snapshot built."
        );

        Ok(Self {
            generated_at: Utc::now(),
            series,
            metrics,
            returns_histogram,
            scatter,
            indicators,
        })
    }
}
