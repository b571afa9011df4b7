//! # Tickerscope Sample Data
//!
//! A stand-in data source for the dashboard: a seedable random walk that
//! produces the same `Observation` shape a market-data feed would. The metrics
//! engine never knows which one it is fed.

pub mod error;
pub mod generator;
pub mod settings;

pub use error::SampleDataError;
pub use generator::{RandomWalkGenerator, generate_sample_data};
pub use settings::{GeneratorSettings, MAX_DAYS};
