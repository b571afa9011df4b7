use analytics::MetricsSummary;
use core_types::{MetricKind, MetricUnit};
use serde::Serialize;

const NOT_AVAILABLE: &str = "N/A";

/// Formats a percentage value, e.g. `1.234` as `1.23%`.
///
/// Degenerate (`None`) and non-finite values render as `N/A`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Formats a plain number with two decimals, `N/A` when undefined.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// One line of the metric card grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub kind: MetricKind,
    pub label: &'static str,
    pub value: String,
}

/// Display rows for every metric, in card order.
pub fn metric_rows(summary: &MetricsSummary) -> Vec<MetricRow> {
    MetricKind::ALL
        .into_iter()
        .map(|kind| {
            let value = summary.value(kind);
            MetricRow {
                kind,
                label: kind.label(),
                value: match kind.unit() {
                    MetricUnit::Percent => format_percent(value),
                    MetricUnit::Number => format_number(value),
                },
            }
        })
        .collect()
}
