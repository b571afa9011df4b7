use crate::error::AnalyticsError;
use core_types::Observation;
use serde::{Deserialize, Serialize};

/// Bin edges of the return distribution chart: 1% wide buckets from -5% to 5%.
pub const DEFAULT_RETURN_BIN_EDGES: [f64; 11] =
    [-5.0, -4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

/// One half-open bucket `[lower, upper)` of the distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    /// Chart axis label, e.g. `-1 to 0%`.
    pub fn label(&self) -> String {
        format!("{} to {}%", self.lower, self.upper)
    }
}

/// Distribution of daily returns over fixed bucket edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnHistogram {
    pub bins: Vec<HistogramBin>,
    /// Returns that fall outside every bucket.
    pub out_of_range: usize,
}

impl ReturnHistogram {
    /// Buckets the `daily_return` of every observation.
    ///
    /// `edges` must hold at least two finite, strictly increasing values.
    pub fn from_series(series: &[Observation], edges: &[f64]) -> Result<Self, AnalyticsError> {
        validate_edges(edges)?;

        let mut bins: Vec<HistogramBin> = edges
            .windows(2)
            .map(|w| HistogramBin { lower: w[0], upper: w[1], count: 0 })
            .collect();
        let mut out_of_range = 0;

        for observation in series {
            let value = observation.daily_return;
            match bins.iter_mut().find(|b| value >= b.lower && value < b.upper) {
                Some(bin) => bin.count += 1,
                None => out_of_range += 1,
            }
        }

        Ok(Self { bins, out_of_range })
    }

    /// Number of returns that landed in a bucket.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Checks that `edges` describe at least one bucket in ascending order.
pub fn validate_edges(edges: &[f64]) -> Result<(), AnalyticsError> {
    if edges.len() < 2 {
        return Err(AnalyticsError::InvalidInput(format!(
            "histogram needs at least two bin edges, got {}",
            edges.len()
        )));
    }
    if edges.iter().any(|e| !e.is_finite()) {
        return Err(AnalyticsError::InvalidInput(
            "histogram bin edges must be finite".to_string(),
        ));
    }
    if edges.windows(2).any(|w| w[1] <= w[0]) {
        return Err(AnalyticsError::InvalidInput(
            "histogram bin edges must be strictly increasing".to_string(),
        ));
    }
    Ok(())
}
