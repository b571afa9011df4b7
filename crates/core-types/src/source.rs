use crate::structs::Observation;

/// A producer of daily observation series.
///
/// Implementations must return observations sorted by strictly increasing
/// date. The metrics engine trusts that ordering for drawdown computation.
pub trait SeriesSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produces the next full series. Each call stands for one page load.
    fn load_series(&mut self) -> Result<Vec<Observation>, Self::Error>;
}

/// A fixed, already-loaded series. Useful for replaying recorded data.
impl SeriesSource for Vec<Observation> {
    type Error = std::convert::Infallible;

    fn load_series(&mut self) -> Result<Vec<Observation>, Self::Error> {
        Ok(self.clone())
    }
}
