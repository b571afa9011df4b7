use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvDataError {
    #[error("Failed to open price file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed price file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid price row {0}: {1}")]
    InvalidRow(usize, String),

    #[error("The price file contains no rows")]
    Empty,
}
