//! # Tickerscope Analytics Engine
//!
//! This crate derives the aggregate metrics shown on the dashboard from a daily
//! price series.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No knowledge of where the series came from. It depends only
//!   on `core-types`.
//! - **Stateless Calculation:** `MetricsEngine` takes an ordered slice of
//!   `Observation`s and produces a `MetricsSummary`. Calling it twice on the same
//!   input yields the same summary.
//! - **Degenerate, not broken:** A metric that is mathematically undefined for a
//!   valid series (correlation against a constant series) is reported as `None`.
//!   Only malformed input is an error.
//!
//! ## Public API
//!
//! - `compute_metrics` / `MetricsEngine`: the metric calculation.
//! - `MetricsSummary`: the five derived values.
//! - `ReturnHistogram`: daily return distribution for the histogram chart.
//! - `stats`: the slice-level helpers the engine is built from.
//! - `indicators`: RSI, MACD and Bollinger bands over the closing price.
//! - `AnalyticsError`: the error type returned from this crate.

pub mod engine;
pub mod error;
pub mod histogram;
pub mod indicators;
pub mod report;
pub mod stats;

pub use engine::{MetricsEngine, compute_metrics, validate_series};
pub use error::AnalyticsError;
pub use histogram::{DEFAULT_RETURN_BIN_EDGES, HistogramBin, ReturnHistogram, validate_edges};
pub use indicators::{BollingerBand, MacdPoint, TechnicalIndicators};
pub use report::MetricsSummary;
