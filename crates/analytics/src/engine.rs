use crate::error::AnalyticsError;
use crate::report::MetricsSummary;
use crate::stats;
use core_types::Observation;
use tracing::{debug, instrument};

/// A stateless calculator for deriving dashboard metrics from a price series.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating the series metrics.
    ///
    /// # Arguments
    ///
    /// * `series` - Daily observations sorted by strictly increasing date.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `MetricsSummary`, or
    /// `AnalyticsError::InvalidInput` if the series is empty or malformed, or
    /// if its magnitudes push a metric out of the finite `f64` range.
    #[instrument(skip_all, fields(observations = series.len()))]
    pub fn calculate(&self, series: &[Observation]) -> Result<MetricsSummary, AnalyticsError> {
        validate_series(series)?;

        let (avg_daily_return, std_deviation) = self.calculate_returns(series)?;
        let max_drawdown = self.calculate_drawdown(series);
        let avg_volatility = self.calculate_volatility(series)?;
        let volume_price_correlation = self.calculate_correlation(series)?;

        let summary = MetricsSummary {
            avg_daily_return,
            std_deviation,
            max_drawdown,
            avg_volatility,
            volume_price_correlation,
        };

        let overflowed = summary.non_finite_metrics();
        if !overflowed.is_empty() {
            return Err(AnalyticsError::InvalidInput(format!(
                "metrics {overflowed:?} overflowed the finite f64 range"
            )));
        }

        if summary.is_degenerate() {
            debug!(degenerate = ?summary.degenerate_metrics(), "Series produced undefined metrics.");
        }
        debug!(?summary, "Metrics calculated.");

        Ok(summary)
    }

    /// Mean and population standard deviation of the daily returns.
    fn calculate_returns(&self, series: &[Observation]) -> Result<(f64, f64), AnalyticsError> {
        let returns: Vec<f64> = series.iter().map(|o| o.daily_return).collect();

        let mean = stats::mean(&returns).ok_or_else(empty_series)?;
        let std_deviation = stats::population_std_dev(&returns, mean).ok_or_else(empty_series)?;

        Ok((mean, std_deviation))
    }

    /// Maximum drawdown of the closing price, in percent.
    fn calculate_drawdown(&self, series: &[Observation]) -> f64 {
        stats::max_drawdown_pct(series.iter().map(|o| o.close))
    }

    fn calculate_volatility(&self, series: &[Observation]) -> Result<f64, AnalyticsError> {
        let volatilities: Vec<f64> = series.iter().map(|o| o.volatility).collect();
        stats::mean(&volatilities).ok_or_else(empty_series)
    }

    /// Correlation between relative volume and closing price.
    fn calculate_correlation(&self, series: &[Observation]) -> Result<Option<f64>, AnalyticsError> {
        let volume_ratios: Vec<f64> = series.iter().map(|o| o.volume_ratio).collect();
        let closes: Vec<f64> = series.iter().map(|o| o.close).collect();
        stats::pearson_correlation(&volume_ratios, &closes)
    }
}

/// Computes the `MetricsSummary` of a series with a default engine.
pub fn compute_metrics(series: &[Observation]) -> Result<MetricsSummary, AnalyticsError> {
    MetricsEngine::new().calculate(series)
}

/// Rejects series the engine cannot summarise.
///
/// A valid series is non-empty, every observation passes
/// `Observation::validate`, and dates strictly increase.
pub fn validate_series(series: &[Observation]) -> Result<(), AnalyticsError> {
    if series.is_empty() {
        return Err(empty_series());
    }

    for (index, observation) in series.iter().enumerate() {
        observation.validate().map_err(|e| {
            AnalyticsError::InvalidInput(format!(
                "observation {} ({}): {}",
                index, observation.date, e
            ))
        })?;
    }

    if let Some((index, pair)) = series
        .windows(2)
        .enumerate()
        .find(|(_, pair)| pair[1].date <= pair[0].date)
    {
        return Err(AnalyticsError::InvalidInput(format!(
            "observation {} dated {} does not follow {}",
            index + 1,
            pair[1].date,
            pair[0].date
        )));
    }

    Ok(())
}

fn empty_series() -> AnalyticsError {
    AnalyticsError::InvalidInput("the observation series is empty".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    const EPS: f64 = 1e-9;

    /// Builds a series from (close, daily_return) pairs on consecutive days.
    fn series(points: &[(f64, f64)]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        points
            .iter()
            .enumerate()
            .map(|(i, &(close, daily_return))| Observation {
                date: start + Duration::days(i as i64),
                close,
                daily_return,
                volatility: daily_return.abs(),
                volume_ratio: 0.5 + (i % 3) as f64 * 0.25,
                ma20: 100.0,
                ma50: 100.0,
                daily_range_pct: 3.0,
                price_position: 50.0,
            })
            .collect()
    }

    #[test]
    fn drawdown_measured_from_running_peak() {
        let data = series(&[(100.0, 0.0), (120.0, 20.0), (90.0, -25.0), (110.0, 22.2)]);
        let summary = compute_metrics(&data).unwrap();
        assert!((summary.max_drawdown - 25.0).abs() < EPS);
    }

    #[test]
    fn alternating_returns() {
        let data = series(&[(100.0, 1.0), (99.0, -1.0), (100.0, 1.0), (99.0, -1.0)]);
        let summary = compute_metrics(&data).unwrap();
        assert!(summary.avg_daily_return.abs() < EPS);
        assert!((summary.std_deviation - 1.0).abs() < EPS);
        assert!((summary.avg_volatility - 1.0).abs() < EPS);
    }

    #[test]
    fn empty_series_is_invalid_input() {
        let err = compute_metrics(&[]).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }

    #[test]
    fn constant_series_has_degenerate_correlation() {
        let mut data = series(&[(50.0, 0.0), (50.0, 0.0), (50.0, 0.0)]);
        for o in &mut data {
            o.volume_ratio = 1.0;
        }
        let summary = compute_metrics(&data).unwrap();
        assert_eq!(summary.volume_price_correlation, None);
        assert_eq!(summary.max_drawdown, 0.0);
        assert_eq!(summary.std_deviation, 0.0);
    }

    #[test]
    fn single_observation_is_summarised() {
        let data = series(&[(42.0, 0.7)]);
        let summary = compute_metrics(&data).unwrap();
        assert!((summary.avg_daily_return - 0.7).abs() < EPS);
        assert_eq!(summary.std_deviation, 0.0);
        assert_eq!(summary.max_drawdown, 0.0);
        assert_eq!(summary.volume_price_correlation, None);
    }

    #[test]
    fn correlation_follows_volume_ratio_against_close() {
        let mut data = series(&[(10.0, 0.0), (20.0, 100.0), (30.0, 50.0), (40.0, 33.3)]);
        for (o, ratio) in data.iter_mut().zip([0.6, 0.8, 1.0, 1.2]) {
            o.volume_ratio = ratio;
        }
        let summary = compute_metrics(&data).unwrap();
        let r = summary.volume_price_correlation.unwrap();
        assert!((r - 1.0).abs() < EPS);
    }

    #[test]
    fn non_finite_field_is_rejected_before_computing() {
        let mut data = series(&[(100.0, 1.0), (101.0, 1.0)]);
        data[1].daily_return = f64::NAN;
        let err = compute_metrics(&data).unwrap_err();
        match err {
            AnalyticsError::InvalidInput(msg) => assert!(msg.contains("observation 1")),
        }
    }

    #[test]
    fn unsorted_dates_are_rejected() {
        let mut data = series(&[(100.0, 1.0), (101.0, 1.0), (102.0, 1.0)]);
        data.swap(1, 2);
        assert!(matches!(validate_series(&data), Err(AnalyticsError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let mut data = series(&[(100.0, 1.0), (101.0, 1.0)]);
        data[1].date = data[0].date;
        assert!(validate_series(&data).is_err());
    }

    #[test]
    fn opposing_huge_returns_keep_a_finite_std_dev() {
        let data = series(&[(100.0, 1e200), (101.0, -1e200)]);
        let summary = compute_metrics(&data).unwrap();
        assert_eq!(summary.avg_daily_return, 0.0);
        assert!((summary.std_deviation / 1e200 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn overflowing_means_are_invalid_input() {
        let data = series(&[(100.0, 1.7e308), (101.0, 1.7e308)]);
        let err = compute_metrics(&data).unwrap_err();
        match err {
            AnalyticsError::InvalidInput(msg) => {
                assert!(msg.contains("AvgDailyReturn"));
                assert!(msg.contains("AvgVolatility"));
            }
        }
    }

    #[test]
    fn huge_closes_are_correlated_not_degenerate() {
        let mut data = series(&[(1e200, 0.0), (2e200, 100.0), (3e200, 50.0)]);
        for (o, ratio) in data.iter_mut().zip([0.5, 0.75, 1.0]) {
            o.volume_ratio = ratio;
        }
        let summary = compute_metrics(&data).unwrap();
        assert!(!summary.is_degenerate());
        assert!((summary.volume_price_correlation.unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let data = series(&[(100.0, 0.0), (97.0, -3.0), (99.5, 2.6), (104.0, 4.5)]);
        let engine = MetricsEngine::new();
        assert_eq!(engine.calculate(&data).unwrap(), engine.calculate(&data).unwrap());
    }
}
