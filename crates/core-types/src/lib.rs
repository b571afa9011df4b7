pub mod enums;
pub mod error;
pub mod source;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{MetricKind, MetricUnit};
pub use error::CoreError;
pub use source::SeriesSource;
pub use structs::Observation;
