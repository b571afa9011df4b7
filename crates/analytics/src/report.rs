use core_types::MetricKind;
use serde::{Deserialize, Serialize};

/// The aggregate metrics of one price series.
///
/// This struct is the output of the `MetricsEngine` and is handed to the
/// presentation layer unchanged. It is never updated in place: a new series
/// means a new summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    // I. Returns
    pub avg_daily_return: f64,
    pub std_deviation: f64,

    // II. Risk
    pub max_drawdown: f64,
    pub avg_volatility: f64,

    // III. Volume
    pub volume_price_correlation: Option<f64>, // None when either side has zero variance
}

impl MetricsSummary {
    /// Looks up a metric by kind. `None` marks a degenerate result.
    pub fn value(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::AvgDailyReturn => Some(self.avg_daily_return),
            MetricKind::StdDeviation => Some(self.std_deviation),
            MetricKind::MaxDrawdown => Some(self.max_drawdown),
            MetricKind::AvgVolatility => Some(self.avg_volatility),
            MetricKind::VolumePriceCorrelation => self.volume_price_correlation,
        }
    }

    /// The metrics that are mathematically undefined for this series.
    pub fn degenerate_metrics(&self) -> Vec<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|kind| self.value(*kind).is_none())
            .collect()
    }

    pub fn is_degenerate(&self) -> bool {
        !self.degenerate_metrics().is_empty()
    }

    /// Metrics whose computed value overflowed to infinity or NaN.
    pub fn non_finite_metrics(&self) -> Vec<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|kind| self.value(*kind).is_some_and(|v| !v.is_finite()))
            .collect()
    }
}
