//! # Tickerscope Dashboard
//!
//! The hand-off between the metrics engine and whatever draws the charts.
//! A `DashboardSnapshot` bundles one series with everything derived from it;
//! `format` turns metric values into card text, with `N/A` for degenerate
//! results.

pub mod error;
pub mod format;
pub mod snapshot;

pub use error::DashboardError;
pub use format::{MetricRow, format_number, format_percent, metric_rows};
pub use snapshot::{DashboardSnapshot, ScatterPoint};
