//! Technical indicators over a closing-price column.
//!
//! Each function returns one entry per input close. Windowed indicators yield
//! `None` until their window has filled.

use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use ta::Next;
use ta::indicators::MovingAverageConvergenceDivergence as Macd;

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_WIDTH: f64 = 2.0;

/// One MACD reading: the fast/slow EMA spread, its signal EMA and their gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBand {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

/// The indicator overlays of a price chart, computed with the standard periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<MacdPoint>,
    pub bollinger: Vec<Option<BollingerBand>>,
}

impl TechnicalIndicators {
    /// RSI(14), MACD(12, 26, 9) and Bollinger bands (20, 2σ) of `closes`.
    pub fn from_closes(closes: &[f64]) -> Result<Self, AnalyticsError> {
        Ok(Self {
            rsi: rsi(closes, RSI_PERIOD)?,
            macd: macd(closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)?,
            bollinger: bollinger_bands(closes, BOLLINGER_PERIOD, BOLLINGER_WIDTH)?,
        })
    }

    /// Most recent RSI reading, if any window has filled.
    pub fn latest_rsi(&self) -> Option<f64> {
        self.rsi.last().copied().flatten()
    }
}

/// Trailing simple moving average over `window` values.
pub fn simple_moving_average(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, AnalyticsError> {
    require_window("moving average", window, 1)?;

    Ok((0..values.len())
        .map(|i| {
            trailing(values, i, window).map(|w| w.iter().sum::<f64>() / window as f64)
        })
        .collect())
}

/// Relative strength index from simple averages of gains and losses.
///
/// The first close has no prior day, so the first reading lands at index
/// `period`. A window without any price movement has no RSI.
pub fn rsi(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, AnalyticsError> {
    require_window("RSI", period, 1)?;

    let mut out = vec![None; closes.len()];
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    for (i, slot) in out.iter_mut().enumerate().skip(period) {
        // deltas[j] is the change into close j + 1
        let window = &deltas[i - period..i];
        let gain = window.iter().map(|d| d.max(0.0)).sum::<f64>() / period as f64;
        let loss = window.iter().map(|d| (-d).max(0.0)).sum::<f64>() / period as f64;

        *slot = match (gain, loss) {
            (g, l) if g == 0.0 && l == 0.0 => None,
            (_, l) if l == 0.0 => Some(100.0),
            (g, l) => Some(100.0 - 100.0 / (1.0 + g / l)),
        };
    }

    Ok(out)
}

/// MACD line, signal line and histogram.
///
/// The EMAs are seeded with the first close, so every close has a reading.
pub fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<Vec<MacdPoint>, AnalyticsError> {
    let mut indicator = Macd::new(fast, slow, signal).map_err(|e| {
        AnalyticsError::InvalidInput(format!(
            "MACD periods ({fast}, {slow}, {signal}) are invalid: {e:?}"
        ))
    })?;

    Ok(closes
        .iter()
        .map(|close| {
            let out = indicator.next(*close);
            MacdPoint {
                macd: out.macd,
                signal: out.signal,
                histogram: out.histogram,
            }
        })
        .collect())
}

/// Moving average with bands `width` sample standard deviations either side.
pub fn bollinger_bands(
    closes: &[f64],
    period: usize,
    width: f64,
) -> Result<Vec<Option<BollingerBand>>, AnalyticsError> {
    // A sample standard deviation needs two values.
    require_window("Bollinger bands", period, 2)?;
    if !width.is_finite() || width < 0.0 {
        return Err(AnalyticsError::InvalidInput(format!(
            "Bollinger band width must be a non-negative number, got {width}"
        )));
    }

    Ok((0..closes.len())
        .map(|i| {
            trailing(closes, i, period).map(|w| {
                let middle = w.iter().sum::<f64>() / period as f64;
                let variance =
                    w.iter().map(|c| (c - middle).powi(2)).sum::<f64>() / (period - 1) as f64;
                let band = width * variance.sqrt();
                BollingerBand {
                    middle,
                    upper: middle + band,
                    lower: middle - band,
                }
            })
        })
        .collect())
}

/// The `window` values ending at index `i`, once that many exist.
fn trailing(values: &[f64], i: usize, window: usize) -> Option<&[f64]> {
    (i + 1 >= window).then(|| &values[i + 1 - window..=i])
}

fn require_window(name: &str, window: usize, min: usize) -> Result<(), AnalyticsError> {
    if window < min {
        return Err(AnalyticsError::InvalidInput(format!(
            "{name} window must be at least {min}, got {window}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn moving_average_waits_for_a_full_window() {
        let sma = simple_moving_average(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(sma[0], None);
        assert_eq!(sma[1], None);
        assert!((sma[2].unwrap() - 2.0).abs() < EPS);
        assert!((sma[3].unwrap() - 3.0).abs() < EPS);
    }

    #[test]
    fn zero_windows_are_rejected() {
        assert!(simple_moving_average(&[1.0], 0).is_err());
        assert!(rsi(&[1.0], 0).is_err());
        assert!(bollinger_bands(&[1.0, 2.0], 1, 2.0).is_err());
        assert!(macd(&[1.0], 0, 26, 9).is_err());
    }

    #[test]
    fn rsi_first_reading_needs_period_changes() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let values = rsi(&closes, 14).unwrap();
        assert!(values[..14].iter().all(Option::is_none));
        assert_eq!(values[14], Some(100.0));
    }

    #[test]
    fn rsi_balances_gains_and_losses() {
        // +2, -1 alternating: average gain 1.0, average loss 0.5 over 4 changes
        let closes = [10.0, 12.0, 11.0, 13.0, 12.0];
        let values = rsi(&closes, 4).unwrap();
        let expected = 100.0 - 100.0 / (1.0 + 2.0);
        assert!((values[4].unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn flat_prices_have_no_rsi_and_falling_prices_hit_zero() {
        assert_eq!(rsi(&[5.0; 6], 3).unwrap()[5], None);
        assert_eq!(rsi(&[6.0, 5.0, 4.0, 3.0], 3).unwrap()[3], Some(0.0));
    }

    #[test]
    fn macd_follows_first_value_seeded_emas() {
        let closes = [10.0, 11.0, 12.5, 12.0, 13.0, 15.0];
        let points = macd(&closes, 2, 4, 3).unwrap();

        let ema = |span: f64, values: &[f64]| -> Vec<f64> {
            let k = 2.0 / (span + 1.0);
            let mut current = values[0];
            values
                .iter()
                .map(|v| {
                    current = k * v + (1.0 - k) * current;
                    current
                })
                .collect()
        };
        let fast = ema(2.0, &closes);
        let slow = ema(4.0, &closes);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema(3.0, &line);

        assert_eq!(points.len(), closes.len());
        assert_eq!(points[0].macd, 0.0);
        for (i, p) in points.iter().enumerate() {
            assert!((p.macd - line[i]).abs() < EPS);
            assert!((p.signal - signal[i]).abs() < EPS);
            assert!((p.histogram - (line[i] - signal[i])).abs() < EPS);
        }
    }

    #[test]
    fn bollinger_bands_use_sample_std_dev() {
        let closes = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = bollinger_bands(&closes, 8, 2.0).unwrap();
        assert!(bands[..7].iter().all(Option::is_none));

        let band = bands[7].unwrap();
        let sample_std = (32.0f64 / 7.0).sqrt();
        assert!((band.middle - 5.0).abs() < EPS);
        assert!((band.upper - (5.0 + 2.0 * sample_std)).abs() < EPS);
        assert!((band.lower - (5.0 - 2.0 * sample_std)).abs() < EPS);
    }

    #[test]
    fn standard_indicators_cover_every_close() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 / 3.0).sin() * 5.0).collect();
        let indicators = TechnicalIndicators::from_closes(&closes).unwrap();

        assert_eq!(indicators.rsi.len(), 40);
        assert_eq!(indicators.macd.len(), 40);
        assert_eq!(indicators.bollinger.len(), 40);
        assert!(indicators.bollinger[18].is_none());
        assert!(indicators.bollinger[19].is_some());

        let latest = indicators.latest_rsi().unwrap();
        assert!((0.0..=100.0).contains(&latest));
    }

    #[test]
    fn empty_closes_give_empty_indicators() {
        let indicators = TechnicalIndicators::from_closes(&[]).unwrap();
        assert!(indicators.rsi.is_empty());
        assert_eq!(indicators.latest_rsi(), None);
    }
}
