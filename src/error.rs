use std::io;
use thiserror::Error;

/// Error type for CSV encoding and decoding operations.
#[derive(Error, Debug)]
pub enum CsvError {
    /// IO error while reading the source or writing the destination.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The temporary file of a rewrite could not be moved over the destination.
    #[error("Could not replace destination: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// A physical line read from bytes is not valid UTF-8.
    #[error("Line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    /// A row processor asked to stop reading.
    #[error("Reading aborted by processor at row {row}")]
    Aborted { row: usize },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CsvError>;
