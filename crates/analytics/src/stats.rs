//! Slice-level statistics the metrics engine is assembled from.
//!
//! These helpers work on plain `f64` slices so they can be reused for any
//! column of a series, not only the ones the dashboard summarises.

use crate::error::AnalyticsError;

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Population standard deviation (divisor N) around a precomputed `mean`.
///
/// `None` for an empty slice. A constant slice yields exactly `0.0` and any
/// other slice a strictly positive value. Non-finite input gives a non-finite
/// result.
pub fn population_std_dev(values: &[f64], mean: f64) -> Option<f64> {
    let first = *values.first()?;
    if values.iter().all(|v| *v == first) {
        return Some(0.0);
    }

    // Deviations are divided by the largest one before squaring so the squares
    // neither overflow nor underflow.
    let scale = max_abs_deviation(values, mean);
    let scaled_variance = values
        .iter()
        .map(|v| {
            let d = (v - mean) / scale;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;

    Some(scale * scaled_variance.sqrt())
}

/// Largest peak-to-trough decline, in percent, scanning `closes` in order.
///
/// The running peak starts at the first close. Returns `0.0` for an empty or
/// non-decreasing sequence. The input must already be in date order.
pub fn max_drawdown_pct<I>(closes: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut closes = closes.into_iter();
    let Some(mut peak) = closes.next() else {
        return 0.0;
    };

    let mut max_drawdown = 0.0;
    for close in closes {
        if close > peak {
            peak = close;
        }
        let drawdown = (peak - close) / peak * 100.0;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown
}

/// Pearson correlation coefficient between two paired samples.
///
/// Returns `Ok(None)` when the coefficient is undefined because either side
/// is constant. Empty or unequal-length inputs are rejected, and so are
/// samples whose mean or spread does not fit in an `f64`.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<Option<f64>, AnalyticsError> {
    if x.len() != y.len() {
        return Err(AnalyticsError::InvalidInput(format!(
            "correlation requires paired samples, got {} and {} values",
            x.len(),
            y.len()
        )));
    }
    let (Some(x_mean), Some(y_mean)) = (mean(x), mean(y)) else {
        return Err(AnalyticsError::InvalidInput(
            "correlation requires at least one pair of values".to_string(),
        ));
    };

    if is_constant(x) || is_constant(y) {
        return Ok(None);
    }

    let x_scale = max_abs_deviation(x, x_mean);
    let y_scale = max_abs_deviation(y, y_mean);
    if !(x_mean.is_finite() && y_mean.is_finite() && x_scale.is_finite() && y_scale.is_finite()) {
        return Err(out_of_range());
    }

    // Both sides are rescaled to a largest deviation of 1; the coefficient is
    // invariant under that.
    let mut covariance = 0.0;
    let mut x_variance = 0.0;
    let mut y_variance = 0.0;

    for (xi, yi) in x.iter().zip(y) {
        let x_diff = (xi - x_mean) / x_scale;
        let y_diff = (yi - y_mean) / y_scale;
        covariance += x_diff * y_diff;
        x_variance += x_diff * x_diff;
        y_variance += y_diff * y_diff;
    }

    let denominator = x_variance.sqrt() * y_variance.sqrt();
    let coefficient = covariance / denominator;
    if denominator == 0.0 || !coefficient.is_finite() {
        return Err(out_of_range());
    }

    // Rounding can push a perfect correlation a hair past the bound.
    Ok(Some(coefficient.clamp(-1.0, 1.0)))
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Largest `|v - mean|`. NaN when `mean` is not finite.
fn max_abs_deviation(values: &[f64], mean: f64) -> f64 {
    if !mean.is_finite() {
        return f64::NAN;
    }
    values.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max)
}

fn out_of_range() -> AnalyticsError {
    AnalyticsError::InvalidInput(
        "correlation inputs exceed the floating-point range".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn mean_of_empty_slice_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn alternating_returns_have_unit_std_dev() {
        let returns = [1.0, -1.0, 1.0, -1.0];
        let avg = mean(&returns).unwrap();
        assert!(avg.abs() < EPS);
        let std = population_std_dev(&returns, avg).unwrap();
        assert!((std - 1.0).abs() < EPS);
    }

    #[test]
    fn std_dev_uses_population_divisor() {
        // Sample std dev of this set would be sqrt(32/7); population is 2.
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let avg = mean(&values).unwrap();
        assert!((population_std_dev(&values, avg).unwrap() - 2.0).abs() < EPS);
    }

    #[test]
    fn constant_values_have_zero_std_dev() {
        let values = [0.1, 0.1, 0.1];
        let avg = mean(&values).unwrap();
        assert_eq!(population_std_dev(&values, avg), Some(0.0));
    }

    #[test]
    fn drawdown_tracks_running_peak() {
        let dd = max_drawdown_pct([100.0, 120.0, 90.0, 110.0]);
        assert!((dd - 25.0).abs() < EPS);
    }

    #[test]
    fn rising_series_has_no_drawdown() {
        assert_eq!(max_drawdown_pct([10.0, 10.0, 11.0, 15.0]), 0.0);
        assert_eq!(max_drawdown_pct(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn perfectly_linear_pairs_correlate_to_one() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 20.0, 30.0, 40.0];
        let r = pearson_correlation(&x, &y).unwrap().unwrap();
        assert!((r - 1.0).abs() < EPS);

        let inverse = [4.0, 3.0, 2.0, 1.0];
        let r = pearson_correlation(&x, &inverse).unwrap().unwrap();
        assert!((r + 1.0).abs() < EPS);
    }

    #[test]
    fn constant_side_is_degenerate() {
        let x = [1.0, 1.0, 1.0];
        let y = [5.0, 6.0, 7.0];
        assert_eq!(pearson_correlation(&x, &y), Ok(None));
        assert_eq!(pearson_correlation(&y, &x), Ok(None));
    }

    #[test]
    fn single_pair_is_degenerate() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), Ok(None));
    }

    #[test]
    fn tiny_deviations_keep_a_positive_std_dev() {
        let values = [1e-170, 2e-170, 3e-170];
        let avg = mean(&values).unwrap();
        let std = population_std_dev(&values, avg).unwrap();
        assert!(std > 0.0);
        assert!((std / (2.0f64 / 3.0).sqrt() / 1e-170 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn huge_deviations_do_not_overflow_std_dev() {
        let values = [1e200, -1e200];
        let std = population_std_dev(&values, mean(&values).unwrap()).unwrap();
        assert!(std.is_finite());
        assert!((std / 1e200 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_mean_gives_non_finite_std_dev() {
        let values = [1.0, 2.0];
        assert!(!population_std_dev(&values, f64::INFINITY).unwrap().is_finite());
    }

    #[test]
    fn huge_prices_still_correlate() {
        let closes = [1e200, 2e200, 3e200];
        let ratios = [0.5, 0.75, 1.0];
        let r = pearson_correlation(&ratios, &closes).unwrap().unwrap();
        assert!((r - 1.0).abs() < EPS);
    }

    #[test]
    fn overflowing_mean_is_rejected_not_degenerate() {
        let x = [1.7e308, 1.7e308, 1.0];
        let y = [1.0, 2.0, 3.0];
        assert!(matches!(pearson_correlation(&x, &y), Err(AnalyticsError::InvalidInput(_))));
        assert!(matches!(pearson_correlation(&y, &x), Err(AnalyticsError::InvalidInput(_))));
    }

    #[test]
    fn mismatched_or_empty_samples_are_rejected() {
        assert!(matches!(
            pearson_correlation(&[1.0, 2.0], &[1.0]),
            Err(AnalyticsError::InvalidInput(_))
        ));
        assert!(matches!(
            pearson_correlation(&[], &[]),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }
}
