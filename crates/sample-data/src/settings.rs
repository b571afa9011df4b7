use crate::error::SampleDataError;
use chrono::NaiveDate;
use serde::Deserialize;

/// Longest series the generator will produce, about a century of calendar days.
pub const MAX_DAYS: usize = 36_500;

/// Parameters of the random-walk generator.
///
/// Deserialized from the `[sample_data]` table of `config.toml`. Every field
/// has a default, so the table may be omitted entirely.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Number of trading days to generate.
    pub days: usize,
    /// Closing price the walk starts from, also the base of the moving averages.
    pub base_price: f64,
    /// Bound of the uniform daily change, in percent. 3.0 means changes in [-3%, 3%).
    pub max_daily_change_pct: f64,
    /// Fixes the random sequence. Without a seed every series is different.
    pub seed: Option<u64>,
    /// The series ends the day before this date. Defaults to today (UTC).
    pub end_date: Option<NaiveDate>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            days: 100,
            base_price: 100.0,
            max_daily_change_pct: 3.0,
            seed: None,
            end_date: None,
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), SampleDataError> {
        if self.days == 0 || self.days > MAX_DAYS {
            return Err(SampleDataError::InvalidSetting(
                "days".to_string(),
                format!("must be within 1..={MAX_DAYS}, got {}", self.days),
            ));
        }
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(SampleDataError::InvalidSetting(
                "base_price".to_string(),
                format!("must be a positive number, got {}", self.base_price),
            ));
        }
        // A change of -100% or worse would drive the price to zero or below.
        if !(self.max_daily_change_pct > 0.0 && self.max_daily_change_pct < 100.0) {
            return Err(SampleDataError::InvalidSetting(
                "max_daily_change_pct".to_string(),
                format!("must be within (0, 100), got {}", self.max_daily_change_pct),
            ));
        }
        Ok(())
    }
}
