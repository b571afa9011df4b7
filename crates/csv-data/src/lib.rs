//! # Tickerscope CSV Data
//!
//! Loads a recorded daily price history from a local CSV export and derives
//! the same `Observation` fields the sample generator produces, so a real
//! series can stand in for the random walk.

pub mod error;
pub mod source;

pub use error::CsvDataError;
pub use source::{CsvSeriesSource, observations_from_reader};
