use crate::error::SampleDataError;
use crate::settings::GeneratorSettings;
use chrono::{Days, NaiveDate, Utc};
use core_types::{Observation, SeriesSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Simulates a single stock as a compounding random walk.
///
/// Only the close, return, volatility and volume ratio follow the walk. The
/// moving averages are smooth sine waves around the base price and the
/// intraday fields are independent noise; they exist to decorate the charts.
pub struct RandomWalkGenerator {
    settings: GeneratorSettings,
    rng: StdRng,
}

impl RandomWalkGenerator {
    pub fn new(settings: GeneratorSettings) -> Result<Self, SampleDataError> {
        settings.validate()?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { settings, rng })
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generates a fresh series, oldest day first.
    ///
    /// Successive calls on the same generator continue the random sequence, so
    /// they produce different walks even when seeded.
    pub fn generate(&mut self) -> Result<Vec<Observation>, SampleDataError> {
        let days = self.settings.days;
        let base_price = self.settings.base_price;
        let max_change = self.settings.max_daily_change_pct;
        let end_date = self
            .settings
            .end_date
            .unwrap_or_else(|| Utc::now().date_naive());

        // The earliest date is checked up front so a bad window fails before allocating.
        trading_day(end_date, days).ok_or(SampleDataError::DateOutOfRange(days))?;

        let mut series = Vec::with_capacity(days);
        let mut price = base_price;

        for i in 0..days {
            let date = trading_day(end_date, days - i).ok_or(SampleDataError::DateOutOfRange(days))?;

            let daily_change = self.rng.gen_range(-max_change..max_change) / 100.0;
            price *= 1.0 + daily_change;

            let step = i as f64;
            series.push(Observation {
                date,
                close: price,
                daily_return: daily_change * 100.0,
                volatility: (daily_change * 100.0).abs(),
                volume_ratio: self.rng.gen_range(0.5..1.5),
                ma20: base_price * (1.0 + (step / 10.0).sin() * 0.1),
                ma50: base_price * (1.0 + (step / 25.0).sin() * 0.15),
                daily_range_pct: self.rng.gen_range(2.0..5.0),
                price_position: self.rng.gen_range(0.0..100.0),
            });
        }

        if let (Some(first), Some(last)) = (series.first(), series.last()) {
            debug!(
                from = %first.date,
                to = %last.date,
                last_close = last.close,
                "Generated random walk."
            );
        }
        info!(days, seed = ?self.settings.seed, "Sample series generated.");

        Ok(series)
    }
}

impl SeriesSource for RandomWalkGenerator {
    type Error = SampleDataError;

    fn load_series(&mut self) -> Result<Vec<Observation>, Self::Error> {
        self.generate()
    }
}

/// The date `offset` days before `end_date`.
fn trading_day(end_date: NaiveDate, offset: usize) -> Option<NaiveDate> {
    end_date.checked_sub_days(Days::new(offset as u64))
}

/// Generates one series with the given settings.
pub fn generate_sample_data(settings: GeneratorSettings) -> Result<Vec<Observation>, SampleDataError> {
    RandomWalkGenerator::new(settings)?.generate()
}
