use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// The series (or a slice derived from it) cannot be analysed at all:
    /// it is empty, malformed, or out of date order.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
