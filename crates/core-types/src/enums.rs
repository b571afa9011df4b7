use serde::{Deserialize, Serialize};

/// How a metric value is meant to be read by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    Percent,
    Number,
}

/// The aggregate metrics derived from a single price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    AvgDailyReturn,
    StdDeviation,
    MaxDrawdown,
    AvgVolatility,
    VolumePriceCorrelation,
}

impl MetricKind {
    /// Every metric, in the order the dashboard cards show them.
    pub const ALL: [MetricKind; 5] = [
        MetricKind::AvgDailyReturn,
        MetricKind::StdDeviation,
        MetricKind::MaxDrawdown,
        MetricKind::AvgVolatility,
        MetricKind::VolumePriceCorrelation,
    ];

    /// Returns the human-readable label of the metric
    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::AvgDailyReturn => "Avg. Daily Return",
            MetricKind::StdDeviation => "Std. Deviation",
            MetricKind::MaxDrawdown => "Max Drawdown",
            MetricKind::AvgVolatility => "Avg. Volatility",
            MetricKind::VolumePriceCorrelation => "Volume-Price Correlation",
        }
    }

    pub fn unit(&self) -> MetricUnit {
        match self {
            MetricKind::VolumePriceCorrelation => MetricUnit::Number,
            _ => MetricUnit::Percent,
        }
    }
}
