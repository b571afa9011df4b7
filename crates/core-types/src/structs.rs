use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single trading day of price and volume data for one symbol.
///
/// Only `close`, `daily_return`, `volatility` and `volume_ratio` feed the
/// metrics. The remaining fields decorate the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub close: f64,
    /// Percentage change of `close` versus the prior day (`1.5` means +1.5%).
    pub daily_return: f64,
    /// Magnitude of the day's price fluctuation, in percent.
    pub volatility: f64,
    /// Traded volume relative to a baseline volume.
    pub volume_ratio: f64,

    // Chart decoration
    pub ma20: f64,
    pub ma50: f64,
    pub daily_range_pct: f64,
    /// Where the close sits inside the day's range, 0-100.
    pub price_position: f64,
}

impl Observation {
    /// Checks the fields the metrics engine reads.
    ///
    /// Presentation-only fields are not inspected.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_finite("close", self.close)?;
        require_finite("daily_return", self.daily_return)?;
        require_finite("volatility", self.volatility)?;
        require_finite("volume_ratio", self.volume_ratio)?;

        if self.close <= 0.0 {
            return Err(CoreError::InvalidInput(
                "close".to_string(),
                format!("must be positive, got {}", self.close),
            ));
        }
        if self.volatility < 0.0 {
            return Err(CoreError::InvalidInput(
                "volatility".to_string(),
                format!("must not be negative, got {}", self.volatility),
            ));
        }
        if self.volume_ratio <= 0.0 {
            return Err(CoreError::InvalidInput(
                "volume_ratio".to_string(),
                format!("must be positive, got {}", self.volume_ratio),
            ));
        }
        Ok(())
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(
            field.to_string(),
            format!("must be finite, got {}", value),
        ))
    }
}
