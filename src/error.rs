use std::io;
use thiserror::Error;

/// Error type for guess operations.
///
/// Only conditions the engine cannot recover from are errors. A sample that
/// yields no usable dialect is not an error; it produces an empty guess.
#[derive(Error, Debug)]
pub enum GuessError {
    /// IO error while capturing a sample.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error while parsing with a guessed dialect.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON configuration.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The sample bytes could not be decoded as text.
    #[error("Sample is not decodable as text: {0}")]
    Undecodable(String),

    /// The seed configuration contradicts itself.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for guess operations.
pub type Result<T> = std::result::Result<T, GuessError>;
