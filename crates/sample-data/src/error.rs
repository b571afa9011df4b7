use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleDataError {
    #[error("Invalid generator setting '{0}': {1}")]
    InvalidSetting(String, String),

    #[error("Date arithmetic overflowed while generating {0} days")]
    DateOutOfRange(usize),
}
